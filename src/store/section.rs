//! Entry formatting and section-aware insertion.
//!
//! A section starts at the first verbatim occurrence of its header and runs
//! up to the next `"\n##"` (or end of document). Header matching is an exact
//! substring match, so a header that also appears inside ordinary text is
//! found there too.

use chrono::NaiveDateTime;

/// Rendered form of entry timestamps: second precision, no zone suffix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Marker that begins the next second-level header.
pub const SECTION_BOUNDARY: &str = "\n##";

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Render an entry as it is stored on disk: `\n[<timestamp>] - <entry>\n`.
pub fn format_entry(timestamp: &str, entry: &str) -> String {
    format!("\n[{}] - {}\n", timestamp, entry)
}

/// Insert a formatted entry at the end of the section named by `header`.
///
/// When the header is missing the header and entry are appended to the end
/// of the body, leaving all prior content as a prefix.
pub fn insert_under_section(body: &str, header: &str, formatted: &str) -> String {
    let Some(start) = body.find(header) else {
        return format!("{}\n{}\n{}", body, header, formatted.trim_start());
    };

    let search_from = start + header.len();
    let insert_at = body[search_from..]
        .find(SECTION_BOUNDARY)
        .map(|offset| search_from + offset)
        .unwrap_or(body.len());

    let (head, tail) = body.split_at(insert_at);
    let mut out = String::with_capacity(body.len() + formatted.len() + 1);
    out.push_str(head.trim_end());
    out.push('\n');
    let entry = formatted.trim_start();
    if tail.is_empty() {
        out.push_str(entry);
    } else {
        // The tail already opens with the newline that ends our entry line.
        out.push_str(entry.strip_suffix('\n').unwrap_or(entry));
        out.push_str(tail);
    }
    out
}
