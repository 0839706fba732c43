//! Sound cues.
//!
//! A terminal has no mixer, so the only backend rings the bell for the
//! events worth interrupting the player for.

use std::io::Write;

use crate::core::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Rotate,
    Drop,
    LineClear,
    GameOver,
}

impl SoundCue {
    /// Cue for a session event, if it has one.
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Rotated => Some(SoundCue::Rotate),
            GameEvent::HardDropped | GameEvent::Locked => Some(SoundCue::Drop),
            GameEvent::LinesCleared(_) => Some(SoundCue::LineClear),
            GameEvent::GameOver => Some(SoundCue::GameOver),
            GameEvent::LevelUp(_) => None,
        }
    }
}

/// Audio output. Muting is handled by the caller.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Rings the terminal bell on line clears and game over.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: SoundCue) {
        if matches!(cue, SoundCue::LineClear | SoundCue::GameOver) {
            // A missing bell is not worth interrupting the game for.
            let _ = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
        }
    }
}

/// Discards every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _cue: SoundCue) {}
}
