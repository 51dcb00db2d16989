//! Renderer boundary and highlight color semantics
//!
//! The drawing surface (canvas, GPU pipeline, terminal) is host-provided;
//! the core hands it a resolved [`DisplayWindow`] once per tick and leaves
//! text metrics and layout to the implementation. The color helpers here
//! carry the widget's highlight semantics so every renderer paints tokens
//! the same way.

use crate::lyrics::{DisplayWindow, TokenState};

/// Paints the resolved two-line window each playback tick
///
/// Implementations receive a read-only derived view; nothing in it aliases
/// mutable timeline state.
pub trait HighlightRenderer {
    /// Draw one resolved frame
    fn render(&mut self, window: &DisplayWindow<'_>);
}

/// Color of a token that playback has not reached yet
pub const UNSUNG_COLOR: (u8, u8, u8) = (128, 128, 128);

/// Highlight color for a token at the given state
///
/// Sung text ramps from black to full red as the token's highlight
/// progresses: `rgb(floor(255 * progress), 0, 0)`. Unstarted tokens render
/// in the unsung gray.
pub fn token_color(state: &TokenState) -> (u8, u8, u8) {
    match state {
        TokenState::Unstarted => UNSUNG_COLOR,
        state => {
            let red = (255.0 * state.progress()).floor() as u8;
            (red, 0, 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unstarted_token_is_gray() {
        assert_eq!(token_color(&TokenState::Unstarted), UNSUNG_COLOR);
    }

    #[test]
    fn test_complete_token_is_full_red() {
        assert_eq!(token_color(&TokenState::Complete), (255, 0, 0));
    }

    #[test]
    fn test_active_token_ramps_red() {
        // floor(255 * 0.5) = 127
        assert_eq!(
            token_color(&TokenState::Active { progress: 0.5 }),
            (127, 0, 0)
        );
        assert_eq!(token_color(&TokenState::Active { progress: 0.0 }), (0, 0, 0));
        assert_eq!(
            token_color(&TokenState::Active { progress: 1.0 }),
            (255, 0, 0)
        );
    }
}
