//! Address-bar input handling.

/// Schemes loaded verbatim; anything else is treated as a search query.
const URL_PREFIXES: [&str; 4] = ["http://", "https://", "file://", "about:"];

pub fn has_url_prefix(input: &str) -> bool {
    URL_PREFIXES.iter().any(|prefix| input.starts_with(prefix))
}

/// Turns address-bar input into a loadable URI.
///
/// `https://x.com` loads as-is; `openai.com` becomes
/// `https://duckduckgo.com/?q=openai.com` with the default search prefix.
pub fn normalize_input(input: &str, search_url: &str) -> String {
    let trimmed = input.trim();
    if has_url_prefix(trimmed) {
        return trimmed.to_string();
    }
    format!("{}{}", search_url, url_encode(trimmed))
}

/// Percent-encodes a query component, spaces as `+`.
pub fn url_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push('+'),
            _ => {
                out.push('%');
                out.push(char::from(b"0123456789ABCDEF"[(b >> 4) as usize]));
                out.push(char::from(b"0123456789ABCDEF"[(b & 0xf) as usize]));
            }
        }
    }
    out
}
