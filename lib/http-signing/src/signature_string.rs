//!
//! Utilities for handling signature strings
//!

use crate::{component::Component, Result, SignRequest};
use std::fmt::Write;

/// Construct the signing string of a request
///
/// Components are resolved in the exact order they were requested in.
/// Duplicates are kept, the order is never normalised.
#[inline]
pub fn construct<K>(request: &SignRequest<'_, K>) -> Result<String> {
    let mut signature_string = String::new();
    for component in request.include.iter().copied().map(Component::parse) {
        let line = component.resolve(request)?;
        let _ = writeln!(signature_string, "{line}");
    }

    // Remove the last new-line
    signature_string.pop();

    Ok(signature_string)
}
