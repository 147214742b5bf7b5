//! Application-level handle policy.
//!
//! The graph container only demands non-empty-after-trim handles; this
//! application additionally requires the `@` sigil. The two checks are kept
//! separable so the container stays reusable for other naming schemes.

use crate::{Error, Result};

pub const SIGIL: char = '@';

/// Validates a handle against the application convention and returns it
/// trimmed.
pub fn validate_handle(handle: &str) -> Result<&str> {
    let trimmed = shoal_graphlib::validate_handle(handle)?;
    if !trimmed.starts_with(SIGIL) {
        return Err(Error::MissingSigil {
            handle: trimmed.to_string(),
        });
    }
    Ok(trimmed)
}
