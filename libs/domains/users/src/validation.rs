use regex::Regex;
use std::sync::LazyLock;

/// local-part "@" domain, where the domain holds at least one dot and every
/// label is non-empty.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .unwrap()
});

/// Syntactic email check. Never fails; anything unparseable is simply invalid.
pub fn is_email_valid(email: &str) -> bool {
    EMAIL.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_addresses() {
        for email in [
            "a@b.com",
            "x@y.com",
            "first.last@example.co.uk",
            "user+tag@sub.domain.io",
            "o'neil@example.org",
        ] {
            assert!(is_email_valid(email), "{email} should be valid");
        }
    }

    #[test]
    fn test_rejects_missing_at_sign() {
        assert!(!is_email_valid("example.com"));
        assert!(!is_email_valid(""));
    }

    #[test]
    fn test_rejects_domain_without_dot() {
        assert!(!is_email_valid("user@localhost"));
        assert!(!is_email_valid("user@"));
    }

    #[test]
    fn test_rejects_malformed_domains_and_whitespace() {
        assert!(!is_email_valid("user@.com"));
        assert!(!is_email_valid("user@example..com"));
        assert!(!is_email_valid("user@-example.com"));
        assert!(!is_email_valid(" user@example.com"));
        assert!(!is_email_valid("us er@example.com"));
        assert!(!is_email_valid("a@b@c.com"));
    }
}
