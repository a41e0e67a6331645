//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! from the simulation, the game loop driver, input mapping and rendering alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn column**: `BOARD_WIDTH / 2 - 1` (4), spawn row 0
//!
//! # Game Rule Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_DROP_MS` | 800 | Gravity interval at level 1 |
//! | `SPEED_INCREASE_FACTOR` | 0.95 | Interval multiplier per level-up |
//! | `SCORE_PER_LINE` | 100 | Flat points per cleared row |
//! | `LEVEL_UP_SCORE` | 500 | Points per level threshold |
//! | `LINE_CLEAR_DELAY_MS` | 500 | Staged clear window before rows are removed |
//! | `TICK_MS` | 16 | Fixed timestep of the loop driver |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
//! assert_eq!(Command::from_str("bogus"), None);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Column where a freshly spawned shape's left edge sits.
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 1;

/// Row where a freshly spawned shape's top edge sits.
pub const SPAWN_Y: i8 = 0;

/// Gravity interval at the start of a game (level 1).
pub const INITIAL_DROP_MS: f64 = 800.0;

/// Multiplier applied to the gravity interval on every level-up.
pub const SPEED_INCREASE_FACTOR: f64 = 0.95;

/// Points awarded per cleared row (no multi-line bonus).
pub const SCORE_PER_LINE: u32 = 100;

/// Score span of one level.
pub const LEVEL_UP_SCORE: u32 = 500;

/// Delay between marking full rows and structurally removing them.
pub const LINE_CLEAR_DELAY_MS: u32 = 500;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Level a new game starts at.
pub const START_LEVEL: u32 = 1;


/// The seven piece kinds
///
/// Each kind has one canonical shape and a fixed color token:
/// - **I**: Cyan, 1x4 bar
/// - **J**: Blue
/// - **L**: Orange
/// - **O**: Yellow, 2x2 square
/// - **S**: Green
/// - **T**: Purple
/// - **Z**: Red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in declaration order (the order a uniform pick indexes into).
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Fixed color token of this kind.
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Orange,
            PieceKind::O => Color::Yellow,
            PieceKind::S => Color::Green,
            PieceKind::T => Color::Purple,
            PieceKind::Z => Color::Red,
        }
    }
}

/// Opaque color/identity token written into locked board cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Green,
    Purple,
    Red,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Cyan => "cyan",
            Color::Blue => "blue",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Purple => "purple",
            Color::Red => "red",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell locked with the color of the piece that filled it
pub type Cell = Option<Color>;

/// Discrete commands accepted by the dispatcher.
///
/// Raw input (keyboard, scripts) is translated into these tokens upstream;
/// the engine never sees raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down; locks it when blocked
    SoftDrop,
    /// Rotate piece 90° clockwise with the simple kick sequence
    Rotate,
    /// Pause or resume a running game
    TogglePause,
    /// Begin a game from the not-started state
    Start,
    /// Discard the current game and return to not-started
    Reset,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::Rotate,
        Command::TogglePause,
        Command::Start,
        Command::Reset,
    ];

    /// Parse a command token (case-insensitive).
    ///
    /// Unrecognized tokens yield `None` and are dropped by callers.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("rotate"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("TOGGLEPAUSE"), Some(Command::TogglePause));
    /// assert_eq!(Command::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "rotate" => Some(Command::Rotate),
            "togglepause" => Some(Command::TogglePause),
            "start" => Some(Command::Start),
            "reset" => Some(Command::Reset),
            _ => None,
        }
    }

    /// Convert to camelCase token
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::Rotate => "rotate",
            Command::TogglePause => "togglePause",
            Command::Start => "start",
            Command::Reset => "reset",
        }
    }

    /// Whether this command moves or rotates the active piece.
    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            Command::MoveLeft | Command::MoveRight | Command::SoftDrop | Command::Rotate
        )
    }
}

/// Lifecycle phase of a game session.
///
/// `NotStarted → Running ⇄ Paused`, `Running → GameOver`; `Reset` returns
/// any phase to `NotStarted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    NotStarted,
    Running,
    Paused,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::NotStarted => "notStarted",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Lifecycle event recorded by the core for observers (logs, front ends).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoreEvent {
    Started,
    Paused,
    Resumed,
    Reset,
    /// A new active piece entered the board.
    Spawned { kind: PieceKind },
    /// The active piece was merged into the board at its origin.
    Locked { kind: PieceKind, x: i8, y: i8 },
    /// Full rows were marked and the staged clear began.
    RowsMarked { count: u32 },
    /// Marked rows were removed from the board.
    RowsCleared { count: u32, points: u32, score: u32 },
    LevelUp { level: u32, drop_interval_ms: f64 },
    /// A new piece could not spawn.
    GameOver { score: u32 },
}

impl CoreEvent {
    /// Short tag for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            CoreEvent::Started => "started",
            CoreEvent::Paused => "paused",
            CoreEvent::Resumed => "resumed",
            CoreEvent::Reset => "reset",
            CoreEvent::Spawned { .. } => "spawned",
            CoreEvent::Locked { .. } => "locked",
            CoreEvent::RowsMarked { .. } => "rowsMarked",
            CoreEvent::RowsCleared { .. } => "rowsCleared",
            CoreEvent::LevelUp { .. } => "levelUp",
            CoreEvent::GameOver { .. } => "gameOver",
        }
    }
}
