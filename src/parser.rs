//! Parses a WSDOT pass report summary into an ordered key/value record.
//!
//! The feed delivers each report as markup where `<strong>` headings split
//! the text into sections, e.g.
//! `<strong>Eastbound:</strong> Open<br/><strong>Westbound:</strong> ...`.
//! Each heading starts a chunk that runs until the next heading; the
//! heading text is split on its first colon into the key and the start of
//! the value, and the chunk's remaining text is appended to the value.

use crate::types::PassRecord;
use tracing::debug;

enum Node {
    Heading(String),
    Text(String),
}

/// Turns a feed entry summary into a [`PassRecord`].
///
/// Malformed markup degrades rather than fails: input without any heading
/// yields an empty record, and text before the first heading is dropped.
pub fn parse_pass_summary(summary: &str) -> PassRecord {
    let mut chunks: Vec<(String, Vec<String>)> = Vec::new();
    for node in tokenize(summary) {
        match node {
            Node::Heading(heading) => chunks.push((heading, Vec::new())),
            Node::Text(text) => {
                if let Some((_, rest)) = chunks.last_mut() {
                    rest.push(text);
                }
            }
        }
    }

    let mut record = PassRecord::new();
    for (heading, rest) in chunks {
        let (key, value) = chunk_to_kv(&heading, &rest);
        record.insert(key, value);
    }
    debug!("parsed pass summary into {} section(s)", record.len());
    record
}

fn chunk_to_kv(heading: &str, rest: &[String]) -> (String, String) {
    let (head, tail) = match heading.split_once(':') {
        Some((head, tail)) => (head, tail),
        None => (heading, ""),
    };

    let mut parts: Vec<&str> = Vec::new();
    let tail = tail.trim();
    if !tail.is_empty() {
        parts.push(tail);
    }
    parts.extend(rest.iter().map(|s| s.as_str()));

    (head.trim().to_uppercase(), parts.join(" "))
}

/// Splits markup into heading and text nodes. Tags other than
/// `<strong>`/`</strong>` only act as word separators; an unterminated
/// heading is closed at end of input.
fn tokenize(summary: &str) -> Vec<Node> {
    fn flush(buffer: &mut String, in_heading: bool, nodes: &mut Vec<Node>) {
        let text = collapse(&decode_entities(buffer));
        buffer.clear();
        if in_heading {
            // headings are kept even when empty: an empty-key chunk
            nodes.push(Node::Heading(text));
        } else if !text.is_empty() {
            nodes.push(Node::Text(text));
        }
    }

    let mut nodes = Vec::new();
    let mut buffer = String::new();
    let mut in_heading = false;

    let mut rest = summary;
    while let Some(open) = rest.find('<') {
        let (before, after) = rest.split_at(open);
        buffer.push_str(before);

        let Some(close) = after[1..].find('>') else {
            // stray '<' with no closing '>': treat the remainder as text
            buffer.push_str(after);
            rest = "";
            break;
        };
        let tag = after[1..1 + close].trim().to_ascii_lowercase();
        rest = &after[close + 2..];

        if tag.starts_with("strong") {
            flush(&mut buffer, in_heading, &mut nodes);
            in_heading = true;
        } else if tag.starts_with("/strong") {
            if in_heading {
                flush(&mut buffer, true, &mut nodes);
                in_heading = false;
            }
        } else {
            buffer.push(' ');
        }
    }
    buffer.push_str(rest);
    flush(&mut buffer, in_heading, &mut nodes);

    nodes
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
