//! Time-tagged lyric document parser
//!
//! The input is the XML karaoke format: one or more `<data>` blocks, each
//! block's child elements are lines, and each `<i va="seconds">text</i>`
//! inside a line is one timed token. Parsing is a one-shot synchronous
//! transform; the caller supplies the document text, the parser performs no
//! I/O of its own.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::timeline::{LyricLine, LyricTimeline, LyricToken};

/// Errors that can occur while loading a lyric document
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The document is not well-formed markup; no partial recovery is
    /// attempted
    Malformed(String),
    /// The document parsed but yielded no usable lines
    EmptyDocument,
    /// A token element is missing its `va` timing attribute, or carries a
    /// value that is not a non-negative number
    MissingTiming { line: usize, token: usize },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Malformed(e) => write!(f, "malformed lyric document: {}", e),
            ParseError::EmptyDocument => write!(f, "lyric document contains no usable lines"),
            ParseError::MissingTiming { line, token } => write!(
                f,
                "missing or invalid timing attribute at line {}, token {}",
                line, token
            ),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseStatus {
    None,
    InBlock,
    InLine,
    InToken,
    Skipping,
}

/// Parse a lyric document into a timeline
///
/// Blocks may appear anywhere in the document and are concatenated in
/// document order. Lines keep their document order; the parser never sorts,
/// since reordering would mask malformed input. A line with no timed tokens
/// is dropped with a warning. A non-monotonic line start is kept but logged.
pub fn parse_document(text: &str) -> Result<LyricTimeline, ParseError> {
    let mut reader = Reader::from_reader(text.as_bytes());
    let mut buf = Vec::with_capacity(256);
    let mut str_buf = String::with_capacity(64);

    let mut status = ParseStatus::None;
    // Where to resume after skipping a subtree the format does not time
    let mut skip_resume = ParseStatus::None;
    let mut skip_depth = 0usize;

    let mut lines: Vec<LyricLine> = Vec::new();
    let mut cur_tokens: Vec<LyricToken> = Vec::new();
    let mut cur_line_index = 0usize;
    let mut lines_seen = 0usize;
    let mut dropped = 0usize;
    let mut last_start = f64::NEG_INFINITY;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => match status {
                ParseStatus::Skipping => skip_depth += 1,
                ParseStatus::None => {
                    if e.name().as_ref() == b"data" {
                        status = ParseStatus::InBlock;
                    }
                }
                ParseStatus::InBlock => {
                    cur_tokens.clear();
                    cur_line_index = lines_seen;
                    lines_seen += 1;
                    status = ParseStatus::InLine;
                }
                ParseStatus::InLine => {
                    if e.name().as_ref() == b"i" {
                        let start_secs = read_timing(&e).ok_or(ParseError::MissingTiming {
                            line: cur_line_index,
                            token: cur_tokens.len(),
                        })?;
                        cur_tokens.push(LyricToken {
                            start_secs,
                            text: String::new(),
                        });
                        str_buf.clear();
                        status = ParseStatus::InToken;
                    } else {
                        skip_resume = ParseStatus::InLine;
                        skip_depth = 1;
                        status = ParseStatus::Skipping;
                    }
                }
                ParseStatus::InToken => {
                    skip_resume = ParseStatus::InToken;
                    skip_depth = 1;
                    status = ParseStatus::Skipping;
                }
            },
            Ok(Event::Empty(e)) => match status {
                ParseStatus::InBlock => {
                    // Self-closing line element: no tokens, dropped below
                    tracing::warn!("dropping line {} with no timed tokens", lines_seen);
                    lines_seen += 1;
                    dropped += 1;
                }
                ParseStatus::InLine => {
                    if e.name().as_ref() == b"i" {
                        // Empty token: no visible text, still advances timing
                        let start_secs = read_timing(&e).ok_or(ParseError::MissingTiming {
                            line: cur_line_index,
                            token: cur_tokens.len(),
                        })?;
                        cur_tokens.push(LyricToken {
                            start_secs,
                            text: String::new(),
                        });
                    }
                }
                _ => {}
            },
            Ok(Event::End(_)) => match status {
                ParseStatus::Skipping => {
                    skip_depth -= 1;
                    if skip_depth == 0 {
                        status = skip_resume;
                    }
                }
                ParseStatus::InToken => {
                    if let Some(token) = cur_tokens.last_mut() {
                        token.text = str_buf.clone();
                    }
                    str_buf.clear();
                    status = ParseStatus::InLine;
                }
                ParseStatus::InLine => {
                    if cur_tokens.is_empty() {
                        tracing::warn!("dropping line {} with no timed tokens", cur_line_index);
                        dropped += 1;
                    } else {
                        let line = LyricLine {
                            tokens: std::mem::take(&mut cur_tokens),
                        };
                        if line.start_secs() < last_start {
                            tracing::warn!(
                                "line {} starts at {:.3}s, earlier than the line before it",
                                cur_line_index,
                                line.start_secs()
                            );
                        }
                        last_start = line.start_secs();
                        lines.push(line);
                    }
                    status = ParseStatus::InBlock;
                }
                ParseStatus::InBlock => status = ParseStatus::None,
                ParseStatus::None => {}
            },
            Ok(Event::Text(e)) => {
                if status == ParseStatus::InToken {
                    if let Ok(txt) = e.unescape() {
                        str_buf.push_str(&txt);
                    }
                }
            }
            Err(e) => return Err(ParseError::Malformed(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if status != ParseStatus::None {
        return Err(ParseError::Malformed(
            "unexpected end of document".to_string(),
        ));
    }

    if lines.is_empty() {
        return Err(ParseError::EmptyDocument);
    }

    tracing::debug!(
        "parsed lyric document: {} lines, {} dropped",
        lines.len(),
        dropped
    );

    Ok(LyricTimeline::new(lines))
}

/// Read the required `va` timing attribute from a token element
///
/// Returns None when the attribute is absent, not a number, negative, or
/// not finite; the caller turns that into a located error.
fn read_timing(e: &BytesStart<'_>) -> Option<f64> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"va" {
            let raw = String::from_utf8_lossy(&attr.value);
            let value: f64 = raw.trim().parse().ok()?;
            if value.is_finite() && value >= 0.0 {
                return Some(value);
            }
            return None;
        }
    }
    None
}
