//! Resource slug validation.

use crate::error::{Error, Result};

/// Normalize and validate a resource slug.
///
/// Slugs are lowercased and trimmed, must not be empty, and may only contain
/// lowercase letters, digits, `-`, and `_`.
///
/// # Errors
///
/// Returns [`Error::InvalidSlug`] naming the offending slug or character.
pub fn validate_slug(slug: &str) -> Result<String> {
    let slug = slug.trim().to_lowercase();

    if slug.is_empty() {
        return Err(Error::InvalidSlug("slug must not be empty".to_string()));
    }

    if let Some(invalid) = slug
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_'))
    {
        return Err(Error::InvalidSlug(format!(
            "slug `{slug}` contains invalid character `{invalid}`"
        )));
    }

    Ok(slug)
}
