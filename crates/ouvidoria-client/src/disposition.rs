//! `Content-Disposition` filename extraction.

use percent_encoding::percent_decode_str;

/// Extract the filename from a `Content-Disposition` header value.
///
/// Handles `filename="quoted"`, `filename=bare` and the RFC 5987
/// `filename*=charset'lang'percent%20encoded` form, preferring the latter.
pub fn filename(header: &str) -> Option<String> {
    let mut plain = None;
    for part in header.split(';').map(str::trim) {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                if let Some(decoded) = extended_value(value.trim()) {
                    return Some(decoded);
                }
            }
            "filename" => {
                let value = value.trim().trim_matches('"');
                if !value.is_empty() {
                    plain = Some(value.to_string());
                }
            }
            _ => {}
        }
    }
    plain
}

/// Decode an RFC 5987 `charset'language'value` triple. Only UTF-8 is accepted.
fn extended_value(raw: &str) -> Option<String> {
    let mut fields = raw.splitn(3, '\'');
    let charset = fields.next()?;
    let _language = fields.next()?;
    let encoded = fields.next()?;
    if !charset.eq_ignore_ascii_case("utf-8") {
        return None;
    }
    percent_decode_str(encoded)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
        .filter(|s| !s.is_empty())
}
