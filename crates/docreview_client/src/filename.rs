use sha2::{Digest, Sha256};
use url::Url;

const MAX_STEM_LEN: usize = 80;

/// Windows-safe local name for a server-published file.
///
/// Uses the URL's last path segment; falls back to
/// `{fallback_stem}--{short_hash(url)}.{extension}` when the segment is empty.
pub fn download_filename(url: &Url, fallback_stem: &str, extension: &str) -> String {
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();
    let segment = percent_decode(segment);

    let (stem, ext) = match segment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && is_plain_extension(ext) => (stem, ext),
        _ => (segment.as_str(), extension),
    };
    let stem = sanitize_stem(stem);
    if stem.is_empty() {
        return format!("{fallback_stem}--{}.{extension}", short_hash(url.as_str()));
    }
    let mut name = format!("{stem}.{ext}");
    if is_reserved_windows_name(&stem) {
        name = format!("{stem}_.{ext}");
    }
    name
}

fn is_plain_extension(ext: &str) -> bool {
    !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric())
}

fn sanitize_stem(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]);

    // Collapse multiple underscores
    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars() {
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }
    compacted.chars().take(MAX_STEM_LEN).collect()
}

fn is_forbidden(c: char) -> bool {
    matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') || c.is_control()
}

fn is_reserved_windows_name(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    matches!(upper.as_str(), "CON" | "PRN" | "AUX" | "NUL")
        || ["COM", "LPT"].iter().any(|prefix| {
            upper.len() == 4
                && upper.starts_with(prefix)
                && upper.as_bytes()[3].is_ascii_digit()
                && upper.as_bytes()[3] != b'0'
        })
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest.iter().take(4).map(|b| format!("{b:02x}")).collect()
}

fn percent_decode(segment: &str) -> String {
    url::form_urlencoded::parse(format!("x={segment}").as_bytes())
        .next()
        .map(|(_, value)| value.into_owned())
        .unwrap_or_else(|| segment.to_string())
}
