//! Domain name checks and canonicalisation.
//!
//! Index keys are canonical names: lowercase, with the root dot.

use crate::errors::DomainError;

const MAX_NAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Returns the label count when `name` is a syntactically valid domain name.
pub fn label_count(name: &str) -> Option<usize> {
    if name == "." {
        return Some(0);
    }

    let trimmed = name.strip_suffix('.').unwrap_or(name);
    if trimmed.is_empty() || trimmed.len() > MAX_NAME_LEN {
        return None;
    }

    let mut count = 0;
    for label in trimmed.split('.') {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return None;
        }
        if label
            .bytes()
            .any(|b| b.is_ascii_whitespace() || b.is_ascii_control() || !b.is_ascii())
        {
            return None;
        }
        count += 1;
    }
    Some(count)
}

pub fn is_domain_name(name: &str) -> bool {
    label_count(name).is_some()
}

/// Appends the root dot if missing.
pub fn fqdn(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

/// Validates and canonicalises in one step.
pub fn canonical(name: &str) -> Result<String, DomainError> {
    if is_domain_name(name) {
        Ok(fqdn(&name.to_ascii_lowercase()))
    } else {
        Err(DomainError::BadParam(format!(
            "{} is not a valid domain name",
            name
        )))
    }
}

/// Labels of `name` from leftmost to rightmost, without the root.
pub fn split_labels(name: &str) -> Vec<&str> {
    let trimmed = name.strip_suffix('.').unwrap_or(name);
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('.').collect()
}

/// True when `name` equals `zone` or sits below it (case-insensitive).
pub fn is_subdomain_of(name: &str, zone: &str) -> bool {
    let name = name.trim_end_matches('.').to_ascii_lowercase();
    let zone = zone.trim_end_matches('.').to_ascii_lowercase();

    if zone.is_empty() {
        return true;
    }
    name == zone || name.ends_with(&format!(".{}", zone))
}

/// Case-insensitive comparison of two names, ignoring the trailing dot.
pub fn same_name(a: &str, b: &str) -> bool {
    a.trim_end_matches('.')
        .eq_ignore_ascii_case(b.trim_end_matches('.'))
}
