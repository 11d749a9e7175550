//! Base path encoding.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped in a base path.
///
/// Letters, digits and every printable ASCII punctuation character are left as
/// they are, so that an already-significant `%`, `?` or `#` is never encoded twice
/// once request paths get appended.
const BASE_PATH: &AsciiSet = &CONTROLS.add(b' ');

/// Percent-encode a base path, keeping reserved characters intact.
pub fn encode_base_path(path: &str) -> String {
    utf8_percent_encode(path, BASE_PATH).to_string()
}
