use super::keys::{Key, KeyEvent, KeyLocation};
use crate::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChordState {
    #[default]
    Idle,
    PendingChord,
}

/// Turns Ctrl+Shift presses into direction requests.
///
/// The chord fires on release of Shift or Control, and the side of the
/// released key picks the direction: right for RTL, left for LTR. Any other
/// key pressed in between cancels it, so Ctrl+Shift+Tab never fires. Nothing
/// is recognised while Alt is held.
#[derive(Debug, Clone, Default)]
pub struct ChordDetector {
    state: ChordState,
}

impl ChordDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ChordState {
        self.state
    }

    pub fn key_down(&mut self, event: &KeyEvent) {
        if event.modifiers.alt {
            self.state = ChordState::Idle;
            return;
        }
        let completes_chord = (event.key == Key::Shift && event.modifiers.ctrl)
            || (event.key == Key::Control && event.modifiers.shift);
        self.state = if completes_chord {
            ChordState::PendingChord
        } else {
            ChordState::Idle
        };
    }

    /// Returns the requested direction when this release completes a chord.
    pub fn key_up(&mut self, event: &KeyEvent) -> Option<Direction> {
        if self.state == ChordState::Idle {
            return None;
        }
        self.state = ChordState::Idle;
        if !matches!(event.key, Key::Shift | Key::Control) {
            return None;
        }
        let direction = match event.location {
            KeyLocation::Right => Direction::Rtl,
            KeyLocation::Left | KeyLocation::Standard => Direction::Ltr,
        };
        log::debug!("chord released on {:?}, requesting {direction}", event.location);
        Some(direction)
    }
}
