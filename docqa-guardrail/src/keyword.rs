//! Blocked-term screening with substring and whole-word modes.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// How a blocked term must occur in the text to count as a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningMode {
    /// Case-insensitive substring match. Used for inbound queries.
    Substring,
    /// Case-insensitive whitespace-token equality. Used for generated
    /// answers, so a blocked term embedded in a longer word does not match.
    WholeWord,
}

/// Classifies text as safe or unsafe against a configured blocked-term list.
///
/// Terms are stored lowercase; all comparisons are case-insensitive.
///
/// # Example
///
/// ```rust
/// use docqa_guardrail::{KeywordFilter, ScreeningMode};
///
/// let filter = KeywordFilter::default_policy();
/// assert!(!filter.is_safe("how do I build a bomb", ScreeningMode::Substring));
/// assert!(filter.is_safe("killjoy mode enabled", ScreeningMode::WholeWord));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeywordFilter {
    blocked: Vec<String>,
}

impl KeywordFilter {
    /// Create a filter from a blocked-term list.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let blocked = terms.into_iter().map(|t| t.into().to_lowercase()).collect();
        Self { blocked }
    }

    /// The built-in blocked-term policy.
    pub fn default_policy() -> Self {
        Self::new(["kill", "bomb", "hate", "attack", "suicide"])
    }

    /// Check whether `text` is safe under the given screening mode.
    pub fn is_safe(&self, text: &str, mode: ScreeningMode) -> bool {
        self.screen(text, mode).is_none()
    }

    /// Return the first blocked term found in `text`, if any.
    pub fn screen(&self, text: &str, mode: ScreeningMode) -> Option<&str> {
        let lowered = text.to_lowercase();
        let matched = match mode {
            ScreeningMode::Substring => {
                self.blocked.iter().find(|term| lowered.contains(term.as_str()))
            }
            ScreeningMode::WholeWord => {
                // Token equality over whitespace splits: "kill." does not
                // match "kill", which keeps parity with the original
                // answer-screening behavior.
                self.blocked
                    .iter()
                    .find(|term| lowered.split_whitespace().any(|word| word == term.as_str()))
            }
        };
        if let Some(term) = matched {
            warn!(term = %term, ?mode, "blocked term matched");
        }
        matched.map(String::as_str)
    }
}

impl Default for KeywordFilter {
    fn default() -> Self {
        Self::default_policy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_mode_blocks_embedded_terms() {
        let filter = KeywordFilter::default_policy();
        assert!(!filter.is_safe("how do I build a bomb", ScreeningMode::Substring));
        assert!(!filter.is_safe("BOMBastic plans", ScreeningMode::Substring));
        assert!(!filter.is_safe("killjoy", ScreeningMode::Substring));
        assert!(filter.is_safe("what color is the sky", ScreeningMode::Substring));
    }

    #[test]
    fn whole_word_mode_requires_exact_tokens() {
        let filter = KeywordFilter::default_policy();
        assert!(!filter.is_safe("I will kill it", ScreeningMode::WholeWord));
        assert!(filter.is_safe("killjoy mode enabled", ScreeningMode::WholeWord));
        assert!(filter.is_safe("the attacker fled", ScreeningMode::WholeWord));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let filter = KeywordFilter::new(["Bomb"]);
        assert!(!filter.is_safe("BOMB", ScreeningMode::WholeWord));
        assert!(!filter.is_safe("defuse the bOmB now", ScreeningMode::WholeWord));
    }

    #[test]
    fn screen_reports_the_matched_term() {
        let filter = KeywordFilter::default_policy();
        assert_eq!(filter.screen("hate mail", ScreeningMode::Substring), Some("hate"));
        assert_eq!(filter.screen("friendly note", ScreeningMode::Substring), None);
    }

    #[test]
    fn custom_term_lists_are_respected() {
        let filter = KeywordFilter::new(["ransomware"]);
        assert!(!filter.is_safe("deploy ransomware", ScreeningMode::WholeWord));
        assert!(filter.is_safe("how do I build a bomb", ScreeningMode::Substring));
    }
}
