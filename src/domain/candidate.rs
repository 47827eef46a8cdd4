use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::reserved::is_reserved;

static HANDLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]{4,31}$").expect("valid handle regex"));

/// Whether `raw` is a legal handle that is not reserved.
pub fn validate(raw: &str) -> bool {
    HANDLE_REGEX.is_match(raw) && !is_reserved(raw)
}

/// A validated, lowercased handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Candidate(String);

impl Candidate {
    pub fn parse(raw: &str) -> Option<Self> {
        validate(raw).then(|| Self(raw.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_legal_handles_and_lowercases() {
        assert!(validate("abcde"));
        assert!(validate("Durov_fan_2024"));
        let candidate = Candidate::parse("MiXeD_Case9").expect("valid");
        assert_eq!(candidate.as_str(), "mixed_case9");
    }

    #[test]
    fn rejects_bad_lengths() {
        assert!(!validate(""));
        assert!(!validate("abcd"));
        assert!(validate(&format!("a{}", "b".repeat(31))));
        assert!(!validate(&format!("a{}", "b".repeat(32))));
    }

    #[test]
    fn rejects_bad_characters() {
        assert!(!validate("1abcde"));
        assert!(!validate("_abcde"));
        assert!(!validate("abc-de"));
        assert!(!validate("abc de"));
        assert!(!validate("abcdé"));
        assert!(!validate("abcde\n"));
    }

    #[test]
    fn rejects_reserved_words_case_insensitively() {
        assert!(!validate("telegram"));
        assert!(!validate("TeLeGrAm"));
        assert!(!validate("Support"));
        assert!(Candidate::parse("settings").is_none());
    }
}
