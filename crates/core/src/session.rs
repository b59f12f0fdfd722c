//! Session module - one complete match, advanced once per frame
//!
//! A `Session` is an ordinary owned value: construct as many as you like,
//! each with its own random source. Per frame the driver calls
//! [`Session::step`] (or [`Session::apply_input`] then [`Session::tick`]),
//! then polls [`Session::snapshot`] for rendering.

use tracing::info;

use crate::board::Board;
use crate::rng::{RandomSource, SevenBag, SimpleRng};
use crate::simulation::{LockEvent, Simulation};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::Command;

/// Result of the gravity / soft-drop step of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityStep {
    /// The match is over; nothing happened.
    Halted,
    /// Counter advanced but the interval has not elapsed.
    Waiting,
    /// The piece moved down one row.
    Fell,
    /// The piece could not move down and was locked.
    Locked,
}

#[derive(Debug, Clone)]
pub struct Session<R = SimpleRng> {
    sim: Simulation<R>,
    /// Frames since the last gravity step.
    gravity_counter: u32,
}

impl Session<SimpleRng> {
    /// New match driven by the built-in LCG.
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> Session<R> {
    /// New match on an empty board with an injected random source.
    pub fn with_rng(rng: R) -> Self {
        Self::with_board(Board::new(), rng)
    }

    /// New match on a prepared board. Useful for puzzles and tests; `reset`
    /// still returns to an empty board.
    pub fn with_board(board: Board, rng: R) -> Self {
        Self {
            sim: Simulation::with_board(board, SevenBag::new(rng)),
            gravity_counter: 0,
        }
    }

    pub fn simulation(&self) -> &Simulation<R> {
        &self.sim
    }

    pub fn is_game_over(&self) -> bool {
        self.sim.is_game_over()
    }

    pub fn score(&self) -> u32 {
        self.sim.scoring().score()
    }

    pub fn lines(&self) -> u32 {
        self.sim.scoring().lines()
    }

    pub fn level(&self) -> u32 {
        self.sim.scoring().level()
    }

    pub fn gravity_counter(&self) -> u32 {
        self.gravity_counter
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.sim.take_last_event()
    }

    /// Apply this frame's discrete commands in arrival order.
    ///
    /// After game over only restart-class commands do anything (they reset);
    /// while playing, `Restart` is ignored.
    pub fn apply_input(&mut self, commands: &[Command]) {
        if self.sim.is_game_over() {
            if commands.iter().any(Command::is_restart_class) {
                self.reset();
            }
            return;
        }

        for &command in commands {
            match command {
                Command::MoveLeft => {
                    self.sim.try_move(-1, 0);
                }
                Command::MoveRight => {
                    self.sim.try_move(1, 0);
                }
                Command::RotateCw => {
                    self.sim.try_rotate(true);
                }
                Command::RotateCcw => {
                    self.sim.try_rotate(false);
                }
                Command::HardDrop => {
                    self.sim.hard_drop();
                    self.gravity_counter = 0;
                }
                Command::Restart => {}
            }
        }
    }

    /// Advance gravity by one frame.
    ///
    /// With soft drop held the piece steps down every frame; otherwise it
    /// steps once the level's interval has elapsed. A step that cannot move
    /// locks the piece.
    pub fn tick(&mut self, soft_drop: bool) -> GravityStep {
        if self.sim.is_game_over() {
            return GravityStep::Halted;
        }

        self.gravity_counter += 1;
        if !soft_drop && self.gravity_counter < self.sim.scoring().gravity_frames() {
            return GravityStep::Waiting;
        }

        self.gravity_counter = 0;
        if self.sim.try_move(0, 1) {
            GravityStep::Fell
        } else {
            self.sim.lock();
            GravityStep::Locked
        }
    }

    /// One full frame: inputs first, then gravity.
    pub fn step(&mut self, commands: &[Command], soft_drop: bool) -> GravityStep {
        self.apply_input(commands);
        self.tick(soft_drop)
    }

    /// Start over: empty board, zeroed counters, new bag, first piece.
    pub fn reset(&mut self) {
        info!(
            final_score = self.score(),
            final_lines = self.lines(),
            "session reset"
        );
        self.sim.reset();
        self.gravity_counter = 0;
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.sim.board().write_u8_grid(&mut out.board);

        let playing = !self.sim.is_game_over();
        out.active = playing.then(|| ActiveSnapshot::from(self.sim.active()));
        out.ghost_y = playing.then(|| self.sim.ghost_y());
        out.next = self.sim.next_kind();
        out.score = self.score();
        out.lines = self.lines();
        out.level = self.level();
        out.gravity_frames = self.sim.scoring().gravity_frames();
        out.piece_id = self.sim.piece_id();
        out.game_over = !playing;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Session<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}
