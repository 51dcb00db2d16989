//! Karaline - word-by-word karaoke lyrics synchronization
//!
//! Parses a time-tagged lyric document into a [`LyricTimeline`] and, for
//! any playback position, resolves which line is active, which tokens have
//! been sung, and the fractional highlight of the token being sung right
//! now. The surrounding player supplies time through [`PlaybackClock`] and
//! paints frames through [`HighlightRenderer`]; [`KaraokeWidget`] ties the
//! three together once per tick.
//!
//! [`LyricTimeline`]: lyrics::LyricTimeline
//! [`PlaybackClock`]: playback::PlaybackClock
//! [`HighlightRenderer`]: render::HighlightRenderer
//! [`KaraokeWidget`]: widget::KaraokeWidget

pub mod lyrics;
pub mod playback;
pub mod render;
pub mod utils;
pub mod widget;

pub use lyrics::{
    DisplayWindow, LineHighlight, LyricLine, LyricTimeline, LyricToken, ParseError, TokenState,
    parse_document,
};
pub use playback::{ManualClock, PlaybackClock};
pub use render::HighlightRenderer;
pub use widget::KaraokeWidget;
