//! Scanners for the response status line and header lines.
//!
//! Status line: `PROTOCOL/VERSION SP STATUS-CODE SP STATUS-MESSAGE CRLF`
//!
//! * PROTOCOL is one or more ASCII letters.
//! * VERSION is digits with at most one `.`, which must read as a number.
//! * STATUS-CODE is an optional `-` followed by digits.
//! * STATUS-MESSAGE is the non-empty rest of the line.
//!
//! Header line: `NAME: VALUE`, where NAME is any run without `:` or `.`,
//! any spaces after the colon are skipped and trailing whitespace is
//! trimmed off VALUE. The line ends in CRLF or a bare LF.

use std::str;

use crate::error::ParseError;
use crate::util::{trim_end_ascii_whitespace, CRLF};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StatusLine {
    pub protocol: String,
    pub version: f64,
    pub status_code: i32,
    pub status_message: String,
}

/// Parse a status line including its CRLF.
pub(crate) fn parse_status_line(line: &[u8]) -> Result<StatusLine, ParseError> {
    let malformed = || ParseError::StatusLine(lossy(line));

    let rest = line.strip_suffix(CRLF).ok_or_else(malformed)?;

    let (protocol, rest) = split_once(rest, b'/').ok_or_else(malformed)?;
    if protocol.is_empty() || !protocol.iter().all(u8::is_ascii_alphabetic) {
        return Err(malformed());
    }

    let (version, rest) = split_once(rest, b' ').ok_or_else(malformed)?;
    let version = parse_version(version).ok_or_else(malformed)?;

    let (status_code, status_message) = split_once(rest, b' ').ok_or_else(malformed)?;
    let status_code = parse_status_code(status_code).ok_or_else(malformed)?;

    if status_message.is_empty() || status_message.iter().any(|c| *c == b'\r' || *c == b'\n') {
        return Err(malformed());
    }

    Ok(StatusLine {
        // Checked to be ascii letters above.
        protocol: lossy(protocol),
        version,
        status_code,
        status_message: lossy(status_message),
    })
}

/// Parse a header line, with or without its terminator.
pub(crate) fn parse_header_line(line: &[u8]) -> Result<(String, String), ParseError> {
    let malformed = || ParseError::Header(lossy(line));

    let content = line.strip_suffix(CRLF).unwrap_or(line);

    let end_of_name = content
        .iter()
        .position(|c| *c == b':' || *c == b'.')
        .ok_or_else(malformed)?;

    if content[end_of_name] != b':' {
        return Err(malformed());
    }

    let name = &content[..end_of_name];

    let value = &content[end_of_name + 1..];
    let leading = value.iter().take_while(|c| **c == b' ').count();
    let value = trim_end_ascii_whitespace(&value[leading..]);

    if value.iter().any(|c| *c == b'\r' || *c == b'\n') {
        return Err(malformed());
    }

    Ok((lossy(name), lossy(value)))
}

/// The empty line ending a header block.
pub(crate) fn is_header_end(line: &[u8]) -> bool {
    line == CRLF
}

fn split_once(b: &[u8], sep: u8) -> Option<(&[u8], &[u8])> {
    let i = b.iter().position(|c| *c == sep)?;
    Some((&b[..i], &b[i + 1..]))
}

fn parse_version(v: &[u8]) -> Option<f64> {
    let dots = v.iter().filter(|c| **c == b'.').count();
    if dots > 1 || !v.iter().all(|c| c.is_ascii_digit() || *c == b'.') {
        return None;
    }
    // Rejects "" and "." which pass the character check.
    str::from_utf8(v).ok()?.parse().ok()
}

fn parse_status_code(v: &[u8]) -> Option<i32> {
    let digits = v.strip_prefix(b"-").unwrap_or(v);
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    str::from_utf8(v).ok()?.parse().ok()
}

fn lossy(b: &[u8]) -> String {
    String::from_utf8_lossy(b).into_owned()
}
