/// Name used when sanitizing leaves nothing usable
pub const FALLBACK_FILENAME: &str = "uploaded_video";

const RESERVED: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Reduce a client-supplied filename to a safe single path component.
///
/// Directory segments are discarded, NUL bytes removed and reserved
/// characters replaced with `_`. The result is never empty, `.` or `..`.
pub fn sanitize_filename(name: &str) -> String {
    let last = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let cleaned: String = last
        .chars()
        .filter(|&c| c != '\0')
        .map(|c| if RESERVED.contains(&c) { '_' } else { c })
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => FALLBACK_FILENAME.to_string(),
        _ => cleaned,
    }
}

/// Name of the compressed file produced for an uploaded `<stem>.<ext>`
pub fn compressed_name(sanitized: &str) -> String {
    let stem = std::path::Path::new(sanitized)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| sanitized.to_string());
    format!("{}_compressed.mp4", stem)
}

/// ASCII-only form of a filename for use in a Content-Disposition header
pub fn ascii_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() && c != '"' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
