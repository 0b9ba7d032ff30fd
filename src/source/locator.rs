use std::path::PathBuf;

use crate::error::BridgeError;

/// Where an image comes from. Only local files are resolvable here; other
/// URI schemes belong to platform resolvers this crate does not have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLocator {
    File(PathBuf),
}

impl ImageLocator {
    /// Accepts `file://<path>` (percent-encoded) or a bare filesystem path.
    pub fn parse(raw: &str) -> Result<ImageLocator, BridgeError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(BridgeError::SourceUnavailable("empty image locator".into()));
        }

        if let Some(rest) = strip_scheme(raw, "file") {
            // file://localhost/path and file:///path both name /path.
            let (authority, path) = match rest.find('/') {
                Some(pos) => rest.split_at(pos),
                None => (rest, ""),
            };
            if !authority.is_empty() && !authority.eq_ignore_ascii_case("localhost") {
                return Err(BridgeError::SourceUnavailable(format!(
                    "remote file host '{authority}' in {raw}"
                )));
            }
            if path.is_empty() {
                return Err(BridgeError::SourceUnavailable(format!("no path in {raw}")));
            }
            return Ok(ImageLocator::File(PathBuf::from(percent_decode(path)?)));
        }

        if let Some(scheme) = uri_scheme(raw) {
            return Err(BridgeError::SourceUnavailable(format!(
                "unsupported locator scheme '{scheme}'"
            )));
        }

        Ok(ImageLocator::File(PathBuf::from(raw)))
    }
}

fn strip_scheme<'a>(raw: &'a str, scheme: &str) -> Option<&'a str> {
    let (head, rest) = raw.split_once("://")?;
    if head.eq_ignore_ascii_case(scheme) { Some(rest) } else { None }
}

/// Returns the scheme of `scheme://...`; single letters are treated as
/// Windows drive prefixes, not schemes.
fn uri_scheme(raw: &str) -> Option<&str> {
    let (head, _) = raw.split_once("://")?;
    let valid = head.len() > 1
        && head.starts_with(|c: char| c.is_ascii_alphabetic())
        && head.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(head)
}

/// Decodes `%XX` escapes. Unlike form decoding, `+` stays a literal plus.
fn percent_decode(s: &str) -> Result<String, BridgeError> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hi = (bytes[i + 1] as char).to_digit(16);
            let lo = (bytes[i + 2] as char).to_digit(16);
            if let (Some(h), Some(l)) = (hi, lo) {
                out.push(((h << 4) | l) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(out)
        .map_err(|_| BridgeError::SourceUnavailable(format!("locator path is not UTF-8: {s}")))
}
