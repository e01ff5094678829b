//! Shared URL/form parsing utilities for route handlers.

use crate::dashboard::effect::{to_json, Effect};

/// Parse URL-encoded form body into key-value pairs.
/// Handles `key=value&key2=value2` format (from HTMX POST bodies).
pub fn parse_form_body(body: &str) -> Vec<(String, String)> {
    if body.is_empty() {
        return Vec::new();
    }
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next()?;
            let val = parts.next().unwrap_or("");
            Some((percent_decode(key), percent_decode(val)))
        })
        .collect()
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Percent-decode a URL-encoded value. Multi-byte UTF-8 sequences are
/// reassembled; invalid escapes are kept literally.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hi = bytes.get(i + 1).copied().and_then(hex_val);
                let lo = bytes.get(i + 2).copied().and_then(hex_val);
                match (hi, lo) {
                    (Some(h), Some(l)) => {
                        out.push(h << 4 | l);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Parse a query string into key-value pairs.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let q = query.strip_prefix('?').unwrap_or(query);
    parse_form_body(q)
}

/// Helper to get a value by key from a list of key-value pairs.
pub fn get_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// `true`/`1`/`on` → true; anything else (or absent) → false.
pub fn get_flag(params: &[(String, String)], key: &str) -> bool {
    matches!(get_param(params, key), Some("true" | "1" | "on"))
}

/// Parse a numeric timestamp parameter (host `performance.now()`), default 0.
pub fn get_millis(params: &[(String, String)], key: &str) -> f64 {
    get_param(params, key)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// JSON response body for an effect list.
pub fn effects_response(effects: Vec<Effect>) -> String {
    to_json(&effects)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_form_body_works() {
        let pairs = parse_form_body("id=moes-tavern&index=2&action=toggle");
        assert_eq!(pairs.len(), 3);
        assert_eq!(get_param(&pairs, "id"), Some("moes-tavern"));
        assert_eq!(get_param(&pairs, "index"), Some("2"));
    }

    #[test]
    fn parse_form_body_empty() {
        assert!(parse_form_body("").is_empty());
        assert!(parse_form_body("&&").is_empty());
    }

    #[test]
    fn percent_decode_plus_as_space() {
        assert_eq!(percent_decode("evergreen+terrace"), "evergreen terrace");
    }

    #[test]
    fn percent_decode_hex() {
        assert_eq!(percent_decode("moe%27s%20tavern"), "moe's tavern");
    }

    #[test]
    fn percent_decode_utf8() {
        assert_eq!(percent_decode("%F0%9F%8D%A9"), "\u{1F369}");
    }

    #[test]
    fn percent_decode_invalid_escape_kept() {
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
    }

    #[test]
    fn parse_query_strips_prefix() {
        let pairs = parse_query("?search=burns");
        assert_eq!(get_param(&pairs, "search"), Some("burns"));
    }

    #[test]
    fn flags_and_millis() {
        let pairs = parse_query("favorites=true&now=1500.5&bad=NaN");
        assert!(get_flag(&pairs, "favorites"));
        assert!(!get_flag(&pairs, "missing"));
        assert_eq!(get_millis(&pairs, "now"), 1500.5);
        assert_eq!(get_millis(&pairs, "bad"), 0.0);
    }
}
