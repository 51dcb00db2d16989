//! Lyric timeline data model and playback-position resolution
//!
//! The timeline is built once per loaded document and never mutated
//! afterwards; everything the renderer sees is derived fresh from
//! `(timeline, current_secs)` on each tick. No resolution state is cached
//! between ticks, so seeking backward can never observe stale indices.

use serde::{Deserialize, Serialize};

/// A single timed token (syllable or word fragment) within a lyric line
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricToken {
    /// Instant at which this token begins being sung, in seconds
    pub start_secs: f64,
    /// Token text; may be empty, in which case the token still advances
    /// timing but contributes no visible highlight
    pub text: String,
}

/// One visual row of lyrics: an ordered, non-empty group of tokens
///
/// The line's effective start time is its first token's start time.
/// Document order is assumed non-decreasing in start time; the parser
/// preserves whatever order the document carries rather than sorting.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricLine {
    /// Tokens in singing order
    pub tokens: Vec<LyricToken>,
}

impl LyricLine {
    /// Start time of the line (its first token's start time)
    pub fn start_secs(&self) -> f64 {
        self.tokens.first().map(|t| t.start_secs).unwrap_or(0.0)
    }

    /// Full line text by joining all tokens
    pub fn to_text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }
}

/// The full parsed, time-ordered structure of lines for one lyric document
///
/// Immutable for the duration of a playback session; loading a new document
/// replaces the whole timeline, never patches it in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricTimeline {
    lines: Vec<LyricLine>,
}

/// Error returned by resolution queries on a timeline with no lines
///
/// The parser never produces such a timeline, but a hand-constructed one
/// could; resolution refuses to invent a meaningless index for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyTimeline;

impl std::fmt::Display for EmptyTimeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timeline has no lines")
    }
}

impl std::error::Error for EmptyTimeline {}

/// Highlight state of a single token at some playback position
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenState {
    /// Playback has not reached this token yet
    Unstarted,
    /// This token is being sung; progress is the fractional highlight in [0, 1]
    Active { progress: f64 },
    /// Playback has moved past this token
    Complete,
}

impl TokenState {
    /// Fractional highlight progress: 0 for unstarted, 1 for complete
    pub fn progress(&self) -> f64 {
        match self {
            TokenState::Unstarted => 0.0,
            TokenState::Active { progress } => *progress,
            TokenState::Complete => 1.0,
        }
    }
}

/// Resolved per-token highlight for one line, borrowed from the timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineHighlight<'a> {
    /// The line this highlight was resolved for
    pub line: &'a LyricLine,
    /// One state per token, in token order
    pub states: Vec<TokenState>,
}

/// The two-line view handed to the renderer each tick: the active line and
/// the one immediately following it, so the viewer sees what comes next
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayWindow<'a> {
    /// Index of the active line within the timeline
    pub line_index: usize,
    /// Highlight of the active line
    pub current: LineHighlight<'a>,
    /// Highlight of the following line, or None when the active line is last
    pub next: Option<LineHighlight<'a>>,
}

impl LyricTimeline {
    /// Build a timeline from already-parsed lines
    pub fn new(lines: Vec<LyricLine>) -> Self {
        Self { lines }
    }

    /// All lines in document order
    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the timeline has no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Find the active line for a playback position
    ///
    /// Returns the index of the last line whose start time is <= the given
    /// position. Before the first line the index clamps to 0 (the renderer
    /// shows line 0 fully unstarted instead of reading out of range); past
    /// the last line it stays at the last index. When several lines share a
    /// start time the later one wins, consistent with a single
    /// left-to-right scan.
    pub fn resolve_active_line(&self, current_secs: f64) -> Result<usize, EmptyTimeline> {
        if self.lines.is_empty() {
            return Err(EmptyTimeline);
        }

        let mut current = 0;
        for (idx, line) in self.lines.iter().enumerate() {
            if line.start_secs() <= current_secs {
                current = idx;
            }
        }

        Ok(current)
    }

    /// Resolve the two-line display window for a playback position
    ///
    /// Pure function of `(self, current_secs)`; both lines are resolved
    /// against the same timestamp, so the upcoming line naturally comes out
    /// unstarted until playback reaches it.
    pub fn display_window(&self, current_secs: f64) -> Result<DisplayWindow<'_>, EmptyTimeline> {
        let line_index = self.resolve_active_line(current_secs)?;
        let current = LineHighlight {
            line: &self.lines[line_index],
            states: resolve_highlight(&self.lines[line_index], current_secs),
        };
        let next = self.lines.get(line_index + 1).map(|line| LineHighlight {
            line,
            states: resolve_highlight(line, current_secs),
        });

        Ok(DisplayWindow {
            line_index,
            current,
            next,
        })
    }
}

/// Resolve per-token highlight states for one line at a playback position
///
/// Per token i:
/// - before its start: unstarted
/// - between its start and the next token's start: active, with progress
///   interpolated linearly over that span and clamped to [0, 1]
/// - at or past the next token's start: complete
///
/// The last token of a line has no following boundary to interpolate
/// against and is instantly complete (progress 1) once reached. A pair of
/// tokens with equal start times (zero-duration token) resolves straight to
/// progress 1 rather than dividing by zero.
pub fn resolve_highlight(line: &LyricLine, current_secs: f64) -> Vec<TokenState> {
    line.tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            if current_secs < token.start_secs {
                return TokenState::Unstarted;
            }
            match line.tokens.get(i + 1) {
                None => TokenState::Active { progress: 1.0 },
                Some(next) if current_secs < next.start_secs => {
                    let span = next.start_secs - token.start_secs;
                    let progress = if span <= 0.0 {
                        1.0
                    } else {
                        ((current_secs - token.start_secs) / span).clamp(0.0, 1.0)
                    };
                    TokenState::Active { progress }
                }
                Some(_) => TokenState::Complete,
            }
        })
        .collect()
}
