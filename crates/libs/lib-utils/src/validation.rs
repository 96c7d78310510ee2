//! # Validation Utilities
//!
//! Input validation helpers.

use regex::Regex;
use std::sync::OnceLock;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[\w\-\.]+@([\w\-]+\.)+[\w\-]{2,4}$").expect("email pattern is valid")
    })
}

/// Validate that a string's length (in characters) is within `min..=max`.
pub fn validate_length(value: &str, min: usize, max: usize, field_name: &str) -> Result<(), String> {
    let len = value.chars().count();
    if len < min || len > max {
        Err(format!("{} must be between {} and {} characters", field_name, min, max))
    } else {
        Ok(())
    }
}

/// Validate email address syntax.
pub fn validate_email(email: &str) -> Result<(), String> {
    if email_regex().is_match(email) {
        Ok(())
    } else {
        Err("Invalid email format".to_string())
    }
}

/// Validate that a string is an absolute http(s) URL with a host.
pub fn validate_url(value: &str, field_name: &str) -> Result<(), String> {
    let parsed = url::Url::parse(value).map_err(|_| format!("{} must be a valid URL", field_name))?;

    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some_and(|h| h.contains('.')) => Ok(()),
        _ => Err(format!("{} must be a valid URL", field_name)),
    }
}
