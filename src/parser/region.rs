//! Marker-bounded slicing of rendered page HTML.
//!
//! None of the fields we need are exposed by the API, so they are cut out of
//! the page by literal markers. Every lookup returns a typed error instead of
//! panicking on a missing marker.

use crate::error::{FcError, Result};

fn missing(marker: &str) -> FcError {
    FcError::MarkerNotFound {
        marker: marker.to_string(),
    }
}

/// Text starting at the first occurrence of `marker` (marker included).
pub fn from<'a>(text: &'a str, marker: &str) -> Result<&'a str> {
    let start = text.find(marker).ok_or_else(|| missing(marker))?;
    Ok(&text[start..])
}

/// Text following the first occurrence of `marker` (marker excluded).
pub fn after<'a>(text: &'a str, marker: &str) -> Result<&'a str> {
    let start = text.find(marker).ok_or_else(|| missing(marker))?;
    Ok(&text[start + marker.len()..])
}

/// Text before the first occurrence of `terminator`.
pub fn until<'a>(text: &'a str, terminator: &str) -> Result<&'a str> {
    let end = text.find(terminator).ok_or_else(|| missing(terminator))?;
    Ok(&text[..end])
}

/// From the first `marker` up to (not including) the next `terminator`.
pub fn bounded<'a>(text: &'a str, marker: &str, terminator: &str) -> Result<&'a str> {
    until(from(text, marker)?, terminator)
}

/// From the first `open` through the following `close`, both included.
pub fn enclosed<'a>(text: &'a str, open: &str, close: &str) -> Result<&'a str> {
    let region = from(text, open)?;
    let end = region.find(close).ok_or_else(|| missing(close))?;
    Ok(&region[..end + close.len()])
}

/// Content strictly between `open` and the next `close`.
pub fn inner<'a>(text: &'a str, open: &str, close: &str) -> Result<&'a str> {
    until(after(text, open)?, close)
}
