pub(crate) const CRLF: &[u8] = b"\r\n";

pub(crate) fn compare_lowercase_ascii(a: &str, lowercased: &str) -> bool {
    if a.len() != lowercased.len() {
        return false;
    }

    for (a, b) in a.chars().zip(lowercased.chars()) {
        if !a.is_ascii() {
            return false;
        }
        let norm = a.to_ascii_lowercase();
        if norm != b {
            return false;
        }
    }

    true
}

/// Position of the first occurrence of `needle` in `haystack`.
///
/// `needle` must not be empty.
pub(crate) fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    debug_assert!(!needle.is_empty());
    haystack.windows(needle.len()).position(|w| w == needle)
}

pub(crate) fn trim_end_ascii_whitespace(mut b: &[u8]) -> &[u8] {
    while let [rest @ .., last] = b {
        if !last.is_ascii_whitespace() {
            break;
        }
        b = rest;
    }
    b
}
