//! Game state: board, active piece, tick state machine.

use crate::GameConfig;
use crate::board::Board;
use crate::input::Action;
use crate::piece::{PIECE_SIZE, Piece};
use crate::placement::{fits, fix, try_rotate};
use rand::rngs::StdRng;

/// Where the controller is in its tick cycle. Between ticks it is always
/// `Falling` or `GameOver`; the other two are passed through inside `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Spawning,
    Falling,
    Locking,
    GameOver,
}

/// Falling piece and the board position of its box's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub piece: Piece,
    pub x: i32,
    pub y: i32,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tick {
    /// The active piece was fixed into the board.
    pub locked: bool,
    pub lines_cleared: usize,
    pub game_over: bool,
}

#[derive(Debug)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    phase: Phase,
    rng: StdRng,
}

impl GameState {
    pub fn new(config: &GameConfig, rng: StdRng) -> Self {
        Self::with_board(Board::new(config.width, config.height), rng)
    }

    /// Start on a prepared board. The first piece spawns immediately; if it
    /// is already blocked the game starts over.
    pub fn with_board(board: Board, rng: StdRng) -> Self {
        let mut state = Self {
            board,
            active: None,
            phase: Phase::Spawning,
            rng,
        };
        state.spawn();
        state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    /// Spawn column: box centred on the board.
    pub fn spawn_x(&self) -> i32 {
        (self.board.width() / 2) as i32 - (PIECE_SIZE / 2) as i32
    }

    /// Advance one tick: apply at most one action, lock the piece if it can
    /// no longer fall, clear rows and spawn the next piece.
    pub fn step(&mut self, action: Option<Action>) -> Tick {
        let mut tick = Tick::default();
        let mut action = action;
        loop {
            match self.phase {
                Phase::Falling => {
                    if let Some(action) = action.take() {
                        self.apply_action(action);
                    }
                    if self.can_fall() {
                        break;
                    }
                    self.phase = Phase::Locking;
                }
                Phase::Locking => {
                    tick.lines_cleared = self.lock();
                    tick.locked = true;
                    self.phase = Phase::Spawning;
                }
                Phase::Spawning => {
                    self.spawn();
                    break;
                }
                Phase::GameOver => break,
            }
        }
        tick.game_over = self.is_game_over();
        tick
    }

    fn apply_action(&mut self, action: Action) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let (dx, dy) = match action {
            Action::MoveLeft => (-1, 0),
            Action::MoveRight => (1, 0),
            Action::SoftDrop => (0, 1),
            Action::Rotate => {
                if let Some(turned) = try_rotate(&active.piece, active.x, active.y, &self.board) {
                    active.piece = turned;
                }
                return;
            }
            Action::Quit | Action::None => return,
        };
        if fits(&active.piece, active.x + dx, active.y + dy, &self.board) {
            active.x += dx;
            active.y += dy;
        }
    }

    /// Virtual one-row-down move; false means the piece has landed.
    fn can_fall(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| fits(&a.piece, a.x, a.y + 1, &self.board))
    }

    /// Fix the active piece and clear full rows. Returns rows cleared.
    fn lock(&mut self) -> usize {
        let Some(active) = self.active.take() else {
            return 0;
        };
        fix(&active.piece, active.x, active.y, &mut self.board);
        self.board.clear_full_rows()
    }

    fn spawn(&mut self) {
        let piece = Piece::random(&mut self.rng);
        let (x, y) = (self.spawn_x(), 0);
        if fits(&piece, x, y, &self.board) {
            self.active = Some(ActivePiece { piece, x, y });
            self.phase = Phase::Falling;
        } else {
            self.active = None;
            self.phase = Phase::GameOver;
        }
    }

    /// Board occupancy plus the active piece's on-grid cells, as `(x, y)`.
    pub fn visible_cells(&self) -> Vec<(usize, usize)> {
        let mut cells: Vec<_> = self.board.occupied_cells().collect();
        if let Some(a) = &self.active {
            cells.extend(a.piece.cells().filter_map(|(row, col)| {
                let x = a.x + col as i32;
                let y = a.y + row as i32;
                (x >= 0 && y >= 0).then_some((x as usize, y as usize))
            }));
        }
        cells
    }

    #[cfg(test)]
    fn set_active(&mut self, piece: Piece, x: i32, y: i32) {
        self.active = Some(ActivePiece { piece, x, y });
        self.phase = Phase::Falling;
    }
}
