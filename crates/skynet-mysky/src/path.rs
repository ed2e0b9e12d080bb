//! MySky file paths.
//!
//! A path is `domain/segment/...`. The first component names the app domain
//! that owns the file and is case-insensitive.

use crate::error::{MyskyError, Result};

/// Normalize a path: collapse repeated slashes, drop a trailing slash and
/// lowercase the domain. Empty and absolute paths are rejected.
pub fn sanitize_path(path: &str) -> Result<String> {
    let trimmed = path.trim();
    if trimmed.is_empty() || trimmed.starts_with('/') {
        return Err(MyskyError::InvalidPath(path.to_string()));
    }

    let mut components = trimmed.split('/').filter(|c| !c.is_empty());
    let domain = components
        .next()
        .ok_or_else(|| MyskyError::InvalidPath(path.to_string()))?
        .to_lowercase();

    let mut sanitized = domain;
    for component in components {
        sanitized.push('/');
        sanitized.push_str(component);
    }
    Ok(sanitized)
}

/// The domain that owns a path.
pub fn get_path_domain(path: &str) -> Result<String> {
    let sanitized = sanitize_path(path)?;
    Ok(sanitized
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string())
}

/// Split a sanitized path into its components.
pub(crate) fn split_path(sanitized: &str) -> impl Iterator<Item = &str> {
    sanitized.split('/')
}
