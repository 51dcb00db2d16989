//! Tick-driven karaoke widget glue
//!
//! Owns the parsed timeline and wires the two collaborator boundaries
//! together: once per playback tick it reads the clock, resolves the
//! display window, and hands it to the renderer. Single-threaded and
//! synchronous; nothing is cached across ticks except the timeline itself.

use crate::lyrics::{LyricTimeline, ParseError, parse_document};
use crate::playback::PlaybackClock;
use crate::render::HighlightRenderer;

/// A lyrics widget bound to a playback clock and a renderer
pub struct KaraokeWidget<C, R> {
    timeline: Option<LyricTimeline>,
    clock: C,
    renderer: R,
    ended: bool,
}

impl<C: PlaybackClock, R: HighlightRenderer> KaraokeWidget<C, R> {
    /// Create a widget with no lyrics loaded yet
    pub fn new(clock: C, renderer: R) -> Self {
        Self {
            timeline: None,
            clock,
            renderer,
            ended: false,
        }
    }

    /// Load a lyric document, replacing the current timeline atomically
    ///
    /// On failure the previous timeline (if any) stays in place and the
    /// error is returned for the caller to report; the next tick observes
    /// either the old timeline or the new one, never a partial mix.
    pub fn load_document(&mut self, text: &str) -> Result<(), ParseError> {
        match parse_document(text) {
            Ok(timeline) => {
                tracing::debug!("loaded lyric document with {} lines", timeline.len());
                self.timeline = Some(timeline);
                self.ended = false;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("lyric document rejected: {}", e);
                Err(e)
            }
        }
    }

    /// The currently loaded timeline, if any
    pub fn timeline(&self) -> Option<&LyricTimeline> {
        self.timeline.as_ref()
    }

    /// Mutable access to the clock, for hosts driving a [`ManualClock`]
    ///
    /// [`ManualClock`]: crate::playback::ManualClock
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Handle one playback-time update
    ///
    /// Reads the clock once, resolves the display window for that instant,
    /// and hands it to the renderer. Does nothing before a document is
    /// loaded. After the clock reports the end of the track the final frame
    /// is rendered once and further ticks are ignored until a new document
    /// is loaded.
    pub fn tick(&mut self) {
        let Some(timeline) = &self.timeline else {
            return;
        };
        if self.ended {
            return;
        }

        let now = self.clock.current_secs();
        if let Ok(window) = timeline.display_window(now) {
            self.renderer.render(&window);
        }

        if self.clock.has_ended() {
            self.ended = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::{DisplayWindow, TokenState};
    use crate::playback::ManualClock;

    /// Records what each rendered frame looked like
    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<(usize, Vec<TokenState>, bool)>,
    }

    impl HighlightRenderer for RecordingRenderer {
        fn render(&mut self, window: &DisplayWindow<'_>) {
            self.frames.push((
                window.line_index,
                window.current.states.clone(),
                window.next.is_some(),
            ));
        }
    }

    const DOC: &str = r#"<data>
  <l><i va="0.0">Mái</i><i va="0.5">Tóc</i></l>
  <l><i va="2.0">Người</i><i va="2.5">Thương</i></l>
</data>"#;

    fn widget() -> KaraokeWidget<ManualClock, RecordingRenderer> {
        let mut w = KaraokeWidget::new(ManualClock::new(), RecordingRenderer::default());
        w.load_document(DOC).unwrap();
        w
    }

    #[test]
    fn test_tick_renders_resolved_window() {
        let mut w = widget();
        w.clock_mut().set_secs(0.25);
        w.tick();

        let (line_index, states, has_next) = w.renderer.frames[0].clone();
        assert_eq!(line_index, 0);
        assert_eq!(states[0], TokenState::Active { progress: 0.5 });
        assert_eq!(states[1], TokenState::Unstarted);
        assert!(has_next);
    }

    #[test]
    fn test_tick_without_document_renders_nothing() {
        let mut w = KaraokeWidget::new(ManualClock::new(), RecordingRenderer::default());
        w.tick();
        assert!(w.renderer.frames.is_empty());
    }

    #[test]
    fn test_failed_load_keeps_previous_timeline() {
        let mut w = widget();
        let before = w.timeline().unwrap().clone();

        assert!(w.load_document("<data><l></l></data>").is_err());
        assert_eq!(w.timeline(), Some(&before));

        // Still renders from the old timeline
        w.clock_mut().set_secs(2.2);
        w.tick();
        assert_eq!(w.renderer.frames[0].0, 1);
    }

    #[test]
    fn test_end_of_track_renders_final_frame_once() {
        let mut w = widget();
        w.clock_mut().set_secs(10.0);
        w.clock_mut().set_ended(true);

        w.tick();
        w.tick();
        w.tick();
        assert_eq!(w.renderer.frames.len(), 1, "final frame rendered exactly once");
        assert_eq!(w.renderer.frames[0].0, 1);
    }

    #[test]
    fn test_reload_resumes_ticking_after_end() {
        let mut w = widget();
        w.clock_mut().set_ended(true);
        w.tick();
        assert_eq!(w.renderer.frames.len(), 1);

        w.clock_mut().set_ended(false);
        w.clock_mut().set_secs(0.0);
        w.load_document(DOC).unwrap();
        w.tick();
        assert_eq!(w.renderer.frames.len(), 2);
    }
}
