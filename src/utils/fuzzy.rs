//! Fuzzy matching utilities
//!
//! Used to recover from typos in command verbs when the generative
//! backend cannot produce a suggestion.

use strsim::normalized_levenshtein;

/// Result of a fuzzy match with the matched value and score
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    pub value: String,
    pub score: f64,
}

/// Find matches in a list of candidates
///
/// Returns up to `n` matches with scores at or above `cutoff`, best first
pub fn find_matches<'a, I>(
    search_term: &str,
    candidates: I,
    n: usize,
    cutoff: f64,
) -> Vec<FuzzyMatch>
where
    I: IntoIterator<Item = &'a str>,
{
    let search_lower = search_term.trim().to_lowercase();

    let mut matches: Vec<FuzzyMatch> = Vec::new();
    for candidate in candidates {
        if matches.iter().any(|m| m.value == candidate) {
            continue;
        }

        let score = normalized_levenshtein(&search_lower, &candidate.to_lowercase());
        if score >= cutoff {
            matches.push(FuzzyMatch {
                value: candidate.to_string(),
                score,
            });
        }
    }

    // Stable sort keeps table order among equal scores
    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches.truncate(n);

    matches
}

/// Find the best match above a minimum score
pub fn find_best_match<'a, I>(search_term: &str, candidates: I, cutoff: f64) -> Option<FuzzyMatch>
where
    I: IntoIterator<Item = &'a str>,
{
    find_matches(search_term, candidates, 1, cutoff)
        .into_iter()
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_matches_orders_by_score() {
        let candidates = ["video", "pin", "pinterest", "quote"];
        let matches = find_matches("pintrest", candidates, 5, 0.6);
        assert!(!matches.is_empty());
        assert_eq!(matches[0].value, "pinterest");
    }

    #[test]
    fn test_find_best_match() {
        let best = find_best_match("videp", ["video", "song", "roast"], 0.6);
        assert_eq!(best.map(|m| m.value), Some("video".to_string()));
    }

    #[test]
    fn test_no_match_below_cutoff() {
        assert!(find_best_match("xyzzy", ["video", "song", "roast"], 0.6).is_none());
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let best = find_best_match("VIDEO", ["video", "song"], 0.6).unwrap();
        assert_eq!(best.score, 1.0);
    }
}
