//! Core processing modules
//!
//! Generative text backend and the assistant that answers unrecognized
//! commands.

pub mod assist;
pub mod gemini;
