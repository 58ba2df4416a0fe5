use nucleo::pattern::{CaseMatching, Normalization, Pattern};
use nucleo::{Config, Matcher};

/// Ranks candidate paths against a query.
///
/// Enumeration never calls this; the picker does, every time the query
/// changes.
pub trait FuzzyMatcher {
    /// Returns the candidates matching `query`, best match first.
    ///
    /// An empty query matches everything in the original order.
    fn rank(&mut self, query: &str, candidates: &[String]) -> Vec<String>;
}

/// [`FuzzyMatcher`] backed by nucleo's path-tuned scoring
pub struct NucleoMatcher {
    matcher: Matcher,
}

impl NucleoMatcher {
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT.match_paths()),
        }
    }
}

impl Default for NucleoMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyMatcher for NucleoMatcher {
    fn rank(&mut self, query: &str, candidates: &[String]) -> Vec<String> {
        if query.is_empty() {
            return candidates.to_vec();
        }

        let pattern = Pattern::parse(query, CaseMatching::Smart, Normalization::Smart);
        pattern
            .match_list(candidates.iter(), &mut self.matcher)
            .into_iter()
            .map(|(path, _score)| path.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<String> {
        ["src/main.rs", "src/lib.rs", "README.md", "tests/main_test.rs"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let mut matcher = NucleoMatcher::new();
        assert_eq!(matcher.rank("", &candidates()), candidates());
    }

    #[test]
    fn test_query_filters_candidates() {
        let mut matcher = NucleoMatcher::new();
        let ranked = matcher.rank("main", &candidates());
        assert_eq!(ranked.len(), 2);
        assert!(ranked.contains(&"src/main.rs".to_string()));
        assert!(ranked.contains(&"tests/main_test.rs".to_string()));
    }

    #[test]
    fn test_no_match() {
        let mut matcher = NucleoMatcher::new();
        assert!(matcher.rank("zzzz", &candidates()).is_empty());
    }

    #[test]
    fn test_fuzzy_subsequence() {
        let mut matcher = NucleoMatcher::new();
        let ranked = matcher.rank("rdme", &candidates());
        assert_eq!(ranked, vec!["README.md".to_string()]);
    }
}
