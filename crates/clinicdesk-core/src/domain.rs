//! Vanity domain input handling.
//!
//! Clinics paste their domain in whatever form they have it: with a scheme,
//! a trailing slash, uppercase, a port. Normalization reduces that to a bare
//! lowercase hostname and rejects anything that cannot be a DNS name.
//!
//! ## Rules
//! - Labels are 1 to 63 characters of `a-z`, `0-9` and `-`
//! - Labels neither start nor end with `-`
//! - At least two labels, at most 253 characters overall

use thiserror::Error;

const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Domain is required")]
    Empty,

    #[error("Domain is longer than 253 characters")]
    TooLong,

    #[error("Domain needs at least two labels, e.g. portal.example.com")]
    MissingTld,

    #[error("Invalid domain label {label:?}: {reason}")]
    InvalidLabel { label: String, reason: &'static str },
}

/// Reduce user input to a bare lowercase hostname.
///
/// ```ignore
/// assert_eq!(
///     normalize_domain(" HTTPS://Portal.Example.com/welcome ").unwrap(),
///     "portal.example.com"
/// );
/// ```
pub fn normalize_domain(input: &str) -> Result<String, DomainError> {
    let mut host = input.trim().to_ascii_lowercase();

    for scheme in ["https://", "http://"] {
        if let Some(rest) = host.strip_prefix(scheme) {
            host = rest.to_string();
            break;
        }
    }

    // Drop path, query, fragment, then port
    if let Some(end) = host.find(['/', '?', '#']) {
        host.truncate(end);
    }
    if let Some(colon) = host.find(':') {
        host.truncate(colon);
    }

    let host = host.trim_end_matches('.');

    if host.is_empty() {
        return Err(DomainError::Empty);
    }
    if host.len() > MAX_DOMAIN_LEN {
        return Err(DomainError::TooLong);
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return Err(DomainError::MissingTld);
    }
    for label in &labels {
        validate_label(label)?;
    }

    Ok(host.to_string())
}

fn validate_label(label: &str) -> Result<(), DomainError> {
    let invalid = |reason| DomainError::InvalidLabel {
        label: label.to_string(),
        reason,
    };

    if label.is_empty() {
        return Err(invalid("empty label"));
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(invalid("longer than 63 characters"));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(invalid("starts or ends with a hyphen"));
    }
    if !label
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(invalid("only letters, digits and hyphens are allowed"));
    }
    Ok(())
}

/// True for a registrable apex such as `example.com`, which most DNS
/// providers cannot point at the platform with a CNAME.
pub fn is_apex(domain: &str) -> bool {
    domain.split('.').count() == 2
}

/// Whether a CNAME record value points at `target`, ignoring case, scheme
/// and trailing dots.
pub fn cname_points_to(record: &str, target: &str) -> bool {
    match (normalize_domain(record), normalize_domain(target)) {
        (Ok(record), Ok(target)) => record == target,
        _ => false,
    }
}
