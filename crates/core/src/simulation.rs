//! Simulation module - the active piece lifecycle
//!
//! Owns the board, the randomizer, the scoring counters and the falling
//! piece, and moves the piece through spawn → move/rotate/drop → lock.
//! Locking is atomic: place, clear rows, score, spawn the next piece. A
//! blocked spawn or a lock above the top edge ends the match; after that
//! nothing mutates until [`Simulation::reset`].
//!
//! Gravity is not timed here. The driver calls [`Simulation::try_move`]
//! with `(0, 1)` and locks on failure.

use tracing::{debug, info, trace};

use crate::board::{Board, Placement};
use crate::pieces::{try_rotate, Tetromino};
use crate::rng::{RandomSource, SevenBag};
use crate::scoring::Scoring;
use crate::types::PieceKind;

/// Lifecycle state of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Falling,
    GameOver,
}

/// What happened when a piece locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub rows_cleared: u8,
    pub points: u32,
    /// The piece locked partly above the board and ended the match.
    pub overflow: bool,
}

#[derive(Debug, Clone)]
pub struct Simulation<R> {
    board: Board,
    active: Tetromino,
    next: PieceKind,
    bag: SevenBag<R>,
    scoring: Scoring,
    phase: Phase,
    /// Monotonic id of the active piece (increments on every spawn).
    piece_id: u32,
    last_event: Option<LockEvent>,
}

impl<R: RandomSource> Simulation<R> {
    /// Start a match on an empty board.
    pub fn new(bag: SevenBag<R>) -> Self {
        Self::with_board(Board::new(), bag)
    }

    /// Start a match on a prepared board. The first piece spawns immediately
    /// and may already end the match if the spawn area is blocked.
    pub fn with_board(board: Board, mut bag: SevenBag<R>) -> Self {
        let next = bag.next();
        let mut sim = Self {
            board,
            active: Tetromino::new(next),
            next,
            bag,
            scoring: Scoring::new(),
            phase: Phase::Falling,
            piece_id: 0,
            last_event: None,
        };
        sim.spawn();
        sim
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Tetromino {
        self.active
    }

    /// Kind reserved for the next spawn (the preview).
    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn scoring(&self) -> &Scoring {
        &self.scoring
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Promote the reserved kind to the active piece and reserve a new one.
    ///
    /// Returns false (and ends the match) if the spawn anchor is blocked.
    pub fn spawn(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }

        self.active = Tetromino::new(self.next);
        self.next = self.bag.next();
        self.piece_id = self.piece_id.wrapping_add(1);

        if !self.board.is_valid_placement(&self.active) {
            info!(kind = ?self.active.kind, piece_id = self.piece_id, "spawn blocked, game over");
            self.phase = Phase::GameOver;
            return false;
        }

        debug!(kind = ?self.active.kind, next = ?self.next, piece_id = self.piece_id, "spawned");
        true
    }

    /// Translate the active piece; commits only if the result is valid.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.is_game_over() {
            return false;
        }

        let moved = self.active.shifted(dx, dy);
        if self.board.is_valid_placement(&moved) {
            self.active = moved;
            return true;
        }
        false
    }

    /// Rotate the active piece with the horizontal kick search.
    pub fn try_rotate(&mut self, clockwise: bool) -> bool {
        if self.is_game_over() {
            return false;
        }

        let board = &self.board;
        match try_rotate(self.active, clockwise, |p| board.is_valid_placement(p)) {
            Some((rotated, kick)) => {
                trace!(kind = ?rotated.kind, rotation = ?rotated.rotation, kick, "rotated");
                self.active = rotated;
                true
            }
            None => false,
        }
    }

    /// Lowest row the active piece can reach by falling straight down.
    pub fn ghost_y(&self) -> i8 {
        let mut ghost = self.active;
        loop {
            let below = ghost.shifted(0, 1);
            if !self.board.is_valid_placement(&below) {
                return ghost.y;
            }
            ghost = below;
        }
    }

    /// Drop the active piece as far as it goes and lock it.
    pub fn hard_drop(&mut self) -> Option<LockEvent> {
        if self.is_game_over() {
            return None;
        }

        while self.try_move(0, 1) {}
        self.lock()
    }

    /// Commit the active piece to the board, clear rows, score and respawn.
    pub fn lock(&mut self) -> Option<LockEvent> {
        if self.is_game_over() {
            return None;
        }

        let piece = self.active;
        let event = match self.board.place(&piece) {
            Placement::Overflow => {
                info!(
                    kind = ?piece.kind,
                    x = piece.x,
                    y = piece.y,
                    "locked above the board, game over"
                );
                self.phase = Phase::GameOver;
                LockEvent {
                    kind: piece.kind,
                    rows_cleared: 0,
                    points: 0,
                    overflow: true,
                }
            }
            Placement::Locked => {
                let rows = self.board.clear_full_rows();
                let points = self.scoring.record_clear(rows);
                debug!(
                    kind = ?piece.kind,
                    x = piece.x,
                    y = piece.y,
                    rows,
                    points,
                    score = self.scoring.score(),
                    "locked"
                );
                self.spawn();
                LockEvent {
                    kind: piece.kind,
                    rows_cleared: rows as u8,
                    points,
                    overflow: false,
                }
            }
        };

        self.last_event = Some(event);
        Some(event)
    }

    /// Empty board, zeroed counters, a new bag, and a fresh first piece.
    pub fn reset(&mut self) {
        self.board.clear();
        self.scoring = Scoring::new();
        self.bag.reset();
        self.phase = Phase::Falling;
        self.piece_id = 0;
        self.last_event = None;
        self.next = self.bag.next();
        self.spawn();
    }
}
