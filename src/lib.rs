//! CyberStream Library
//!
//! Command dispatch and upstream response normalization for the CyberStream
//! terminal.

pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod http;
pub mod processor;
pub mod render;
pub mod response;
pub mod services;
pub mod session;
pub mod state;
pub mod terminal;
pub mod utils;
