//! Per-frame input collection for terminal environments.
//!
//! Collects the discrete commands that arrived during one frame and tracks
//! soft drop as a held state. Many terminals never report key releases, so a
//! Down press or repeat keeps soft drop engaged for a short grace window
//! instead of until a release that may never come.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{handle_key_event, is_soft_drop_key};
use crate::types::{Command, SOFT_DROP_GRACE_FRAMES};

/// Most commands kept for one frame; extra key events are dropped.
pub const MAX_COMMANDS_PER_FRAME: usize = 16;

/// Soft drop held-state for terminals with or without key releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftDropLatch {
    remaining: u32,
    grace_frames: u32,
}

impl SoftDropLatch {
    pub fn new() -> Self {
        Self::with_grace_frames(SOFT_DROP_GRACE_FRAMES)
    }

    pub fn with_grace_frames(grace_frames: u32) -> Self {
        Self {
            remaining: 0,
            grace_frames,
        }
    }

    /// A press or auto-repeat of a soft drop key.
    pub fn press(&mut self) {
        self.remaining = self.grace_frames;
    }

    /// An explicit release, on terminals that report one.
    pub fn release(&mut self) {
        self.remaining = 0;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Sample the state for this frame, then age the latch by one frame.
    pub fn sample(&mut self) -> bool {
        let active = self.is_active();
        self.remaining = self.remaining.saturating_sub(1);
        active
    }
}

impl Default for SoftDropLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Input gathered for one frame: commands in arrival order plus soft drop.
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    commands: ArrayVec<Command, MAX_COMMANDS_PER_FRAME>,
    latch: SoftDropLatch,
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latch(latch: SoftDropLatch) -> Self {
        Self {
            commands: ArrayVec::new(),
            latch,
        }
    }

    /// Feed one key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if is_soft_drop_key(key.code) {
            match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => self.latch.press(),
                KeyEventKind::Release => self.latch.release(),
            }
            return;
        }

        if key.kind != KeyEventKind::Press {
            return;
        }
        if let Some(command) = handle_key_event(key) {
            let _ = self.commands.try_push(command);
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn soft_drop_active(&self) -> bool {
        self.latch.is_active()
    }

    /// Hand the frame's commands and soft drop flag to `f`, then start the
    /// next frame.
    pub fn drain<T>(&mut self, f: impl FnOnce(&[Command], bool) -> T) -> T {
        let soft_drop = self.latch.sample();
        let out = f(&self.commands, soft_drop);
        self.commands.clear();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn commands_keep_arrival_order_and_reset_per_frame() {
        let mut frame = InputFrame::new();
        frame.handle_key(key(KeyCode::Left, KeyEventKind::Press));
        frame.handle_key(key(KeyCode::Up, KeyEventKind::Press));
        frame.handle_key(key(KeyCode::Char(' '), KeyEventKind::Press));

        let seen = frame.drain(|cmds, soft| (cmds.to_vec(), soft));
        assert_eq!(
            seen,
            (
                vec![Command::MoveLeft, Command::RotateCw, Command::HardDrop],
                false
            )
        );
        assert!(frame.commands().is_empty());
    }

    #[test]
    fn releases_do_not_produce_commands() {
        let mut frame = InputFrame::new();
        frame.handle_key(key(KeyCode::Left, KeyEventKind::Release));
        assert!(frame.commands().is_empty());
    }

    #[test]
    fn overflowing_commands_are_dropped() {
        let mut frame = InputFrame::new();
        for _ in 0..(MAX_COMMANDS_PER_FRAME + 4) {
            frame.handle_key(key(KeyCode::Right, KeyEventKind::Press));
        }
        assert_eq!(frame.commands().len(), MAX_COMMANDS_PER_FRAME);
    }

    #[test]
    fn soft_drop_latch_expires_without_release() {
        let mut latch = SoftDropLatch::with_grace_frames(3);
        latch.press();
        assert!(latch.sample());
        assert!(latch.sample());
        assert!(latch.sample());
        assert!(!latch.sample());
    }

    #[test]
    fn soft_drop_repeat_refreshes_and_release_clears() {
        let mut frame = InputFrame::with_latch(SoftDropLatch::with_grace_frames(2));
        frame.handle_key(key(KeyCode::Down, KeyEventKind::Press));
        assert!(frame.drain(|_, soft| soft));
        frame.handle_key(key(KeyCode::Down, KeyEventKind::Repeat));
        assert!(frame.drain(|_, soft| soft));
        assert!(frame.drain(|_, soft| soft));
        assert!(!frame.drain(|_, soft| soft));

        frame.handle_key(key(KeyCode::Char('s'), KeyEventKind::Press));
        frame.handle_key(key(KeyCode::Char('s'), KeyEventKind::Release));
        assert!(!frame.drain(|_, soft| soft));
    }
}
