//! Version gate for directive overrides.

use super::Directives;

/// Oldest node version that reads directive overrides from its YAML config.
pub const MIN_DIRECTIVE_VERSION: f64 = 1.2;

/// Returns true if a node at `version` accepts YAML config directives.
pub fn version_supported(version: f64) -> bool {
    version >= MIN_DIRECTIVE_VERSION
}

/// Returns true if overrides should be merged at all: the version supports
/// them and there is at least one directive.
pub fn supports_overrides(version: f64, overrides: &Directives) -> bool {
    version_supported(version) && !overrides.is_empty()
}

/// Reads the leading numeric part of a version string.
///
/// Parsing stops at the first character that cannot continue a plain
/// decimal, so `"2.1.3"` reads as `2.1` and `"3.11-beta"` as `3.11`. Text
/// without a leading number reads as `0.0`.
pub fn parse_version(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let has_int = end > int_start;

    if end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    } else if !has_int {
        return 0.0;
    }

    text[..end].parse().unwrap_or(0.0)
}
