//! Just enough HTML tokenizing to find the `message_id` of every `<div>`,
//! the way a `div[message_id]` selector sees them.

/// Elements whose content is text, not markup.
const RAW_TEXT: [&str; 4] = ["script", "style", "textarea", "title"];

struct StartTag<'a> {
    name: &'a str,
    message_id: Option<&'a str>,
    /// Byte offset just past the closing `>`.
    end: usize,
}

/// Returns the `message_id` attribute values of all `<div>` start tags, in
/// document order.
///
/// Quoted attribute values, comments, and raw-text elements are skipped, so
/// text that merely looks like an attribute never yields an id.
pub(crate) fn div_message_ids(html: &str) -> Vec<&str> {
    let bytes = html.as_bytes();
    let mut ids = Vec::new();
    let mut pos = 0;

    while let Some(offset) = html[pos..].find('<') {
        let start = pos + offset;
        let rest = &html[start..];

        if let Some(comment) = rest.strip_prefix("<!--") {
            pos = comment.find("-->").map_or(html.len(), |end| start + 4 + end + 3);
        } else if rest.starts_with("</") || rest.starts_with("<!") || rest.starts_with("<?") {
            pos = rest.find('>').map_or(html.len(), |end| start + end + 1);
        } else if bytes.get(start + 1).is_some_and(u8::is_ascii_alphabetic) {
            let tag = scan_start_tag(html, start + 1);
            if tag.name.eq_ignore_ascii_case("div") {
                ids.extend(tag.message_id);
            }
            pos = tag.end;
            if RAW_TEXT.iter().any(|raw| tag.name.eq_ignore_ascii_case(raw)) {
                pos = skip_raw_text(html, pos, tag.name);
            }
        } else {
            // A bare `<` in text.
            pos = start + 1;
        }
    }
    ids
}

fn is_name_end(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'/' || b == b'>'
}

/// Scans a start tag whose name begins at `from`.
fn scan_start_tag(html: &str, from: usize) -> StartTag<'_> {
    let bytes = html.as_bytes();
    let len = bytes.len();
    let mut i = from;
    while i < len && !is_name_end(bytes[i]) {
        i += 1;
    }
    let name = &html[from..i];
    let mut message_id = None;

    loop {
        while i < len && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= len {
            break;
        }
        if bytes[i] == b'>' {
            i += 1;
            break;
        }

        let attr_start = i;
        while i < len && !is_name_end(bytes[i]) && bytes[i] != b'=' {
            i += 1;
        }
        let attr = &html[attr_start..i];
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let mut value = "";
        if bytes.get(i) == Some(&b'=') {
            i += 1;
            while i < len && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            match bytes.get(i) {
                Some(&quote) if quote == b'"' || quote == b'\'' => {
                    let value_start = i + 1;
                    let value_end = html[value_start..]
                        .find(quote as char)
                        .map_or(len, |end| value_start + end);
                    value = &html[value_start..value_end];
                    i = (value_end + 1).min(len);
                }
                _ => {
                    let value_start = i;
                    while i < len && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                        i += 1;
                    }
                    value = &html[value_start..i];
                }
            }
        }

        // Duplicate attributes: the first one wins.
        if message_id.is_none() && attr.eq_ignore_ascii_case("message_id") {
            message_id = Some(value);
        }
    }

    StartTag { name, message_id, end: i }
}

/// Returns the offset of the `</name` that closes a raw-text element.
fn skip_raw_text(html: &str, from: usize, name: &str) -> usize {
    let closing = format!("</{}", name.to_ascii_lowercase());
    html[from..]
        .to_ascii_lowercase()
        .find(&closing)
        .map_or(html.len(), |offset| from + offset)
}
