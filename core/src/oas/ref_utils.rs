//! # Reference Utilities
//!
//! Helpers for turning local `$ref` pointers (`#/definitions/Pet`) into
//! document paths, and for building pointers back from path segments.
//!
//! External documents are never fetched; only pointers into the current
//! document are understood.

use crate::error::{AppError, AppResult};
use percent_encoding::percent_decode_str;

/// Splits a local `$ref` pointer into decoded segments.
///
/// `#` addresses the document root and yields no segments.
/// Anything that is not a local pointer is reported as `NotFound` naming the pointer.
pub(crate) fn parse_local_pointer(ref_str: &str) -> AppResult<Vec<String>> {
    if ref_str == "#" {
        return Ok(Vec::new());
    }
    let Some(pointer) = ref_str.strip_prefix("#/") else {
        return Err(AppError::NotFound(format!(
            "unsupported $ref '{}' (only local '#/...' pointers are resolved)",
            ref_str
        )));
    };

    Ok(pointer.split('/').map(decode_pointer_segment).collect())
}

/// Decodes a JSON Pointer segment (handles `~1`, `~0` and percent encoding).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}

/// Encodes a key so it can be embedded in a JSON Pointer.
pub(crate) fn encode_pointer_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Builds a local pointer (`#/a/b`) from raw segments.
pub(crate) fn build_local_pointer<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut pointer = String::from("#");
    for segment in segments {
        pointer.push('/');
        pointer.push_str(&encode_pointer_segment(segment.as_ref()));
    }
    pointer
}
