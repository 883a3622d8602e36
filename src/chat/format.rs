//! Light formatting for assistant replies.
//!
//! Replies are plain text written by a CLI. The formatter turns them into a small block
//! model the TUI can style:
//!
//! - fenced code (```` ```lang ````) becomes [`Block::Code`]
//! - `` `inline` `` spans become [`Inline::Code`]
//! - lines starting with `-` or `•` are grouped into [`Block::List`]
//! - short lines ending in `:` become [`Block::Header`]
//! - every other non-blank line is its own [`Block::Paragraph`]
//!
//! Terminal escape sequences and leftover prompt markers (`12m>`) are removed first.

use crate::utils::strip_ansi_codes;

/// Lines at least this long are never treated as headers
const HEADER_MAX_CHARS: usize = 50;
const FENCE: &str = "```";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Code(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Header(Vec<Inline>),
    List(Vec<Vec<Inline>>),
    Code { language: Option<String>, code: String },
}

enum Segment<'a> {
    Text(&'a str),
    Code { language: &'a str, code: &'a str },
}

/// Format an assistant reply into display blocks
pub fn format_reply(content: &str) -> Vec<Block> {
    let cleaned = strip_prompt_artifacts(&strip_ansi_codes(content));
    let mut blocks = Vec::new();

    for segment in split_fences(&cleaned) {
        match segment {
            Segment::Text(text) => format_text(text, &mut blocks),
            Segment::Code { language, code } => blocks.push(Block::Code {
                language: (!language.is_empty()).then(|| language.to_string()),
                code: code.trim().to_string(),
            }),
        }
    }

    blocks
}

/// Remove `<digits>m>` markers the server-side CLI leaves behind after stripping colors
fn strip_prompt_artifacts(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(|c: char| c.is_ascii_digit()) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let digits = tail.bytes().take_while(|b| b.is_ascii_digit()).count();
        if tail[digits..].starts_with("m>") {
            rest = &tail[digits + 2..];
        } else {
            out.push_str(&tail[..digits]);
            rest = &tail[digits..];
        }
    }

    out.push_str(rest);
    out
}

/// Split text into plain runs and fenced code blocks.
///
/// A fence is three backticks, an optional word-character language tag, then a newline.
/// An opening fence with no closing fence is left as text.
fn split_fences(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    let mut search_from = 0;

    while let Some(rel) = text[search_from..].find(FENCE) {
        let open = search_from + rel;
        let lang_start = open + FENCE.len();
        let lang_len: usize = text[lang_start..]
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .map(char::len_utf8)
            .sum();
        let lang_end = lang_start + lang_len;

        if !text[lang_end..].starts_with('\n') {
            search_from = lang_start;
            continue;
        }

        let body_start = lang_end + 1;
        let Some(close_rel) = text[body_start..].find(FENCE) else {
            break;
        };
        let close = body_start + close_rel;

        if open > cursor {
            segments.push(Segment::Text(&text[cursor..open]));
        }
        segments.push(Segment::Code {
            language: &text[lang_start..lang_end],
            code: &text[body_start..close],
        });

        cursor = close + FENCE.len();
        search_from = cursor;
    }

    if cursor < text.len() {
        segments.push(Segment::Text(&text[cursor..]));
    }

    segments
}

fn flush_list(list: &mut Vec<Vec<Inline>>, blocks: &mut Vec<Block>) {
    if !list.is_empty() {
        blocks.push(Block::List(std::mem::take(list)));
    }
}

fn format_text(text: &str, blocks: &mut Vec<Block>) {
    let mut list: Vec<Vec<Inline>> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();

        // Blank lines end paragraphs, and with them any open list
        if trimmed.is_empty() {
            flush_list(&mut list, blocks);
            continue;
        }

        if let Some(item) = list_item(trimmed) {
            list.push(parse_inline(item));
            continue;
        }

        flush_list(&mut list, blocks);

        if trimmed.ends_with(':') && trimmed.chars().count() < HEADER_MAX_CHARS {
            blocks.push(Block::Header(parse_inline(trimmed)));
        } else {
            blocks.push(Block::Paragraph(parse_inline(trimmed)));
        }
    }

    flush_list(&mut list, blocks);
}

/// `- item` or `• item` → `item`; the marker must be followed by whitespace
fn list_item(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('-').or_else(|| line.strip_prefix('•'))?;
    if rest.starts_with(char::is_whitespace) { Some(rest.trim_start()) } else { None }
}

fn push_text(spans: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text(last)) = spans.last_mut() {
        last.push_str(text);
    } else {
        spans.push(Inline::Text(text.to_string()));
    }
}

/// Split a line into text and `` `code` `` spans. Unpaired or empty backtick pairs stay text.
fn parse_inline(line: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut rest = line;

    while let Some(start) = rest.find('`') {
        let after = &rest[start + 1..];
        match after.find('`') {
            Some(end) if end > 0 => {
                push_text(&mut spans, &rest[..start]);
                spans.push(Inline::Code(after[..end].to_string()));
                rest = &after[end + 1..];
            }
            _ => {
                push_text(&mut spans, &rest[..=start]);
                rest = after;
            }
        }
    }

    push_text(&mut spans, rest);
    spans
}

fn inline_plain(spans: &[Inline]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Inline::Text(t) => t.clone(),
            Inline::Code(c) => format!("`{}`", c),
        })
        .collect()
}

/// Render blocks back to readable plain text (used by the one-shot `chat` command)
pub fn to_plain_text(blocks: &[Block]) -> String {
    let mut out = Vec::new();

    for block in blocks {
        match block {
            Block::Paragraph(spans) | Block::Header(spans) => out.push(inline_plain(spans)),
            Block::List(items) => {
                for item in items {
                    out.push(format!("  • {}", inline_plain(item)));
                }
            }
            Block::Code { code, .. } => {
                for line in code.lines() {
                    out.push(format!("    {}", line));
                }
            }
        }
    }

    out.join("\n")
}
