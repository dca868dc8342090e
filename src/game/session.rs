use tracing::{debug, info, instrument, warn};

use super::{Board, Player, PlayerId};
use crate::error::{ConfigError, MoveError};

/// Number of same-owner pieces in a line needed to win.
pub const WIN_LENGTH: usize = 4;

/// Step directions probed from every cell, in scan order:
/// right, down, down-right, down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A board coordinate, row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Position { row, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Won(PlayerId),
    Tied,
}

impl GameStatus {
    pub fn is_active(self) -> bool {
        self == GameStatus::Active
    }

    pub fn winner(self) -> Option<PlayerId> {
        match self {
            GameStatus::Won(id) => Some(id),
            _ => None,
        }
    }
}

/// What the front end needs to draw after a successful move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementResult {
    pub row: usize,
    pub column: usize,
    pub player: PlayerId,
    pub status: GameStatus,
}

/// One game between two players: turn order, placement and outcome.
///
/// The session assumes a single caller. Anything that shares it across
/// threads must serialize calls to [`GameSession::play_column`].
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    players: [Player; 2],
    current: usize,
    status: GameStatus,
    winning_line: Option<[Position; WIN_LENGTH]>,
}

impl GameSession {
    /// Start a game on the standard 6x7 board.
    pub fn new(first: Player, second: Player) -> Result<Self, ConfigError> {
        Self::validate_players(&first, &second)?;
        Ok(Self::start(Board::default(), first, second))
    }

    /// Start a game on a `height` x `width` board.
    pub fn with_dimensions(
        first: Player,
        second: Player,
        height: usize,
        width: usize,
    ) -> Result<Self, ConfigError> {
        // Players are checked before any board exists
        Self::validate_players(&first, &second)?;
        let board = Board::new(height, width)?;
        Ok(Self::start(board, first, second))
    }

    fn validate_players(first: &Player, second: &Player) -> Result<(), ConfigError> {
        if first.same_color_ignoring_case(second) {
            return Err(ConfigError::DuplicateColor {
                color: first.color.clone(),
            });
        }
        if first.id == second.id {
            return Err(ConfigError::DuplicatePlayerId);
        }
        Ok(())
    }

    fn start(board: Board, first: Player, second: Player) -> Self {
        info!(
            height = board.height(),
            width = board.width(),
            first = %first.color,
            second = %second.color,
            "new game"
        );
        GameSession {
            board,
            players: [first, second],
            current: 0,
            status: GameStatus::Active,
            winning_line: None,
        }
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Whose turn it is. Once the game is over this is the player who moved last.
    pub fn current_player(&self) -> PlayerId {
        self.players[self.current].id
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Look up a player by identity
    pub fn player(&self, id: PlayerId) -> &Player {
        if self.players[0].id == id {
            &self.players[0]
        } else {
            &self.players[1]
        }
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        !self.status.is_active()
    }

    /// The four cells that decided the game, if it was won.
    pub fn winning_line(&self) -> Option<[Position; WIN_LENGTH]> {
        self.winning_line
    }

    /// Columns that can still take a piece. Empty once the game is over.
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        (0..self.board.width())
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Drop the current player's piece into `column`.
    ///
    /// A rejected move leaves the session untouched.
    #[instrument(level = "debug", skip(self), fields(player = ?self.current_player()))]
    pub fn play_column(&mut self, column: usize) -> Result<PlacementResult, MoveError> {
        if self.is_terminal() {
            warn!("move rejected, game is over");
            return Err(MoveError::GameOver);
        }
        let width = self.board.width();
        if column >= width {
            warn!(width, "move rejected, column off the board");
            return Err(MoveError::InvalidColumn { column, width });
        }
        let Some(row) = self.board.find_landing_row(column) else {
            debug!("move rejected, column full");
            return Err(MoveError::ColumnFull { column });
        };

        let player = self.current_player();
        self.board.occupy(row, column, player);
        debug!(row, "piece placed");

        if let Some(line) = self.find_win(player) {
            self.status = GameStatus::Won(player);
            self.winning_line = Some(line);
            info!(winner = player.number(), "game won");
        } else if self.board.is_full() {
            self.status = GameStatus::Tied;
            info!("game tied");
        } else {
            self.current = 1 - self.current;
        }

        Ok(PlacementResult {
            row,
            column,
            player,
            status: self.status,
        })
    }

    /// Clear the board and hand the first move back to the first player.
    pub fn restart(&mut self) {
        self.board = self.board.cleared();
        self.current = 0;
        self.status = GameStatus::Active;
        self.winning_line = None;
        info!("game restarted");
    }

    /// Scan every cell in row-major order and return the first run of
    /// `WIN_LENGTH` cells owned by `candidate`.
    ///
    /// The whole board is scanned rather than just the lines through the last
    /// piece; boards are small and this keeps the search order fixed.
    fn find_win(&self, candidate: PlayerId) -> Option<[Position; WIN_LENGTH]> {
        for row in 0..self.board.height() {
            for col in 0..self.board.width() {
                for &(dr, dc) in &DIRECTIONS {
                    if let Some(line) = self.run_from(row, col, dr, dc, candidate) {
                        return Some(line);
                    }
                }
            }
        }
        None
    }

    fn run_from(
        &self,
        row: usize,
        col: usize,
        dr: isize,
        dc: isize,
        candidate: PlayerId,
    ) -> Option<[Position; WIN_LENGTH]> {
        let mut line = [Position::new(row, col); WIN_LENGTH];
        for (step, slot) in line.iter_mut().enumerate() {
            let r = row as isize + dr * step as isize;
            let c = col as isize + dc * step as isize;
            if self.board.owner_at(r, c) != Some(candidate) {
                return None;
            }
            // owner_at only answers for on-board cells, so r and c are non-negative
            *slot = Position::new(r as usize, c as usize);
        }
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    fn players() -> (Player, Player) {
        (
            Player::new(PlayerId::First, "red"),
            Player::new(PlayerId::Second, "yellow"),
        )
    }

    fn session() -> GameSession {
        let (first, second) = players();
        GameSession::new(first, second).unwrap()
    }

    /// Play every column in order, asserting the game stays active until the last.
    fn play_all(session: &mut GameSession, columns: &[usize]) -> PlacementResult {
        let (last, rest) = columns.split_last().unwrap();
        for &col in rest {
            let result = session.play_column(col).unwrap();
            assert_eq!(result.status, GameStatus::Active, "game ended early at column {col}");
        }
        session.play_column(*last).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let session = session();
        assert_eq!(session.status(), GameStatus::Active);
        assert_eq!(session.current_player(), PlayerId::First);
        assert!(!session.is_terminal());
        assert_eq!(session.legal_columns(), vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(session.board().height(), 6);
        assert_eq!(session.board().width(), 7);
        assert_eq!(session.winning_line(), None);
    }

    #[test]
    fn test_equal_colors_rejected() {
        let first = Player::new(PlayerId::First, "#ff0000");
        let second = Player::new(PlayerId::Second, "#FF0000");
        let err = GameSession::new(first, second).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateColor { .. }));
    }

    #[test]
    fn test_distinct_colors_accepted() {
        let first = Player::new(PlayerId::First, "#ff0000");
        let second = Player::new(PlayerId::Second, "#0000ff");
        assert!(GameSession::new(first, second).is_ok());
    }

    #[test]
    fn test_color_checked_before_dimensions() {
        let first = Player::new(PlayerId::First, "red");
        let second = Player::new(PlayerId::Second, "red");
        let err = GameSession::with_dimensions(first, second, 0, 0).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateColor { .. }));
    }

    #[test]
    fn test_duplicate_player_id_rejected() {
        let first = Player::new(PlayerId::First, "red");
        let second = Player::new(PlayerId::First, "yellow");
        assert!(matches!(
            GameSession::new(first, second),
            Err(ConfigError::DuplicatePlayerId)
        ));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let (first, second) = players();
        assert!(matches!(
            GameSession::with_dimensions(first, second, 6, 0),
            Err(ConfigError::InvalidDimensions { height: 6, width: 0 })
        ));
        let (first, second) = players();
        assert!(matches!(
            GameSession::with_dimensions(first, second, usize::MAX, 2),
            Err(ConfigError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_play_column_reports_placement() {
        let mut session = session();
        let result = session.play_column(3).unwrap();
        assert_eq!(
            result,
            PlacementResult {
                row: 5,
                column: 3,
                player: PlayerId::First,
                status: GameStatus::Active,
            }
        );
        assert_eq!(session.board().get(5, 3), Cell::Occupied(PlayerId::First));
        assert_eq!(session.current_player(), PlayerId::Second);
    }

    #[test]
    fn test_turns_alternate_and_pieces_stay_put() {
        let mut session = session();
        let columns = [3, 3, 2, 4, 6, 0, 1, 3];
        let mut placed = Vec::new();
        let mut expected = PlayerId::First;
        for &col in &columns {
            assert_eq!(session.current_player(), expected);
            let result = session.play_column(col).unwrap();
            assert_eq!(result.player, expected);
            placed.push(result);
            for p in &placed {
                assert_eq!(session.board().get(p.row, p.column), Cell::Occupied(p.player));
            }
            expected = expected.other();
        }
    }

    #[test]
    fn test_second_player_can_move_first() {
        let (first, second) = players();
        let mut session = GameSession::new(second, first).unwrap();
        assert_eq!(session.current_player(), PlayerId::Second);
        assert_eq!(session.play_column(0).unwrap().player, PlayerId::Second);
        assert_eq!(session.current_player(), PlayerId::First);
        assert_eq!(session.player(PlayerId::Second).color, "yellow");
    }

    #[test]
    fn test_vertical_win() {
        let mut session = session();
        let result = play_all(&mut session, &[0, 1, 0, 1, 0, 1, 0]);
        assert_eq!(result.row, 2);
        assert_eq!(result.column, 0);
        assert_eq!(result.status, GameStatus::Won(PlayerId::First));
        assert_eq!(session.status(), GameStatus::Won(PlayerId::First));
        for row in 2..6 {
            assert_eq!(session.board().get(row, 0), Cell::Occupied(PlayerId::First));
        }
        assert_eq!(
            session.winning_line(),
            Some([
                Position::new(2, 0),
                Position::new(3, 0),
                Position::new(4, 0),
                Position::new(5, 0),
            ])
        );
    }

    #[test]
    fn test_horizontal_win() {
        let mut session = session();
        let result = play_all(&mut session, &[0, 0, 1, 1, 2, 2, 3]);
        assert_eq!(result.status, GameStatus::Won(PlayerId::First));
        assert_eq!(
            session.winning_line(),
            Some([
                Position::new(5, 0),
                Position::new(5, 1),
                Position::new(5, 2),
                Position::new(5, 3),
            ])
        );
    }

    #[test]
    fn test_horizontal_win_in_the_middle() {
        let mut session = session();
        let result = play_all(&mut session, &[3, 3, 4, 4, 5, 5, 2]);
        assert_eq!(result.status, GameStatus::Won(PlayerId::First));
        assert_eq!(session.winning_line().unwrap()[0], Position::new(5, 2));
    }

    #[test]
    fn test_rising_diagonal_win() {
        let mut session = session();
        let result = play_all(&mut session, &[0, 1, 1, 2, 2, 3, 2, 3, 3, 6, 3]);
        assert_eq!((result.row, result.column), (2, 3));
        assert_eq!(result.status, GameStatus::Won(PlayerId::First));
        // Found from its top end, stepping down-left
        assert_eq!(
            session.winning_line(),
            Some([
                Position::new(2, 3),
                Position::new(3, 2),
                Position::new(4, 1),
                Position::new(5, 0),
            ])
        );
    }

    #[test]
    fn test_falling_diagonal_win() {
        let mut session = session();
        let result = play_all(&mut session, &[6, 5, 5, 4, 4, 3, 4, 3, 3, 0, 3]);
        assert_eq!(result.status, GameStatus::Won(PlayerId::First));
        assert_eq!(
            session.winning_line(),
            Some([
                Position::new(2, 3),
                Position::new(3, 4),
                Position::new(4, 5),
                Position::new(5, 6),
            ])
        );
    }

    #[test]
    fn test_second_player_win() {
        let mut session = session();
        let result = play_all(&mut session, &[0, 1, 0, 1, 0, 1, 6, 1]);
        assert_eq!(result.player, PlayerId::Second);
        assert_eq!(result.status, GameStatus::Won(PlayerId::Second));
        assert_eq!(session.status().winner(), Some(PlayerId::Second));
    }

    #[test]
    fn test_no_win_with_three() {
        let mut session = session();
        let result = play_all(&mut session, &[0, 0, 1, 1, 2]);
        assert_eq!(result.status, GameStatus::Active);
        assert_eq!(session.winning_line(), None);
    }

    #[test]
    fn test_full_board_tie() {
        let mut session = session();
        // Three pieces at a time into each column in this order
        let chunks = [1, 0, 5, 3, 6, 4, 0, 2, 3, 5, 6, 2, 1, 4];
        let columns: Vec<usize> = chunks.iter().flat_map(|&col| [col; 3]).collect();
        assert_eq!(columns.len(), 42);

        let result = play_all(&mut session, &columns);
        assert_eq!(result.status, GameStatus::Tied);
        assert_eq!((result.row, result.column), (0, 4));
        assert!(session.board().is_full());
        assert_eq!(session.status().winner(), None);
        assert!(session.legal_columns().is_empty());
    }

    #[test]
    fn test_win_takes_priority_over_tie() {
        let (first, second) = players();
        let mut session = GameSession::with_dimensions(first, second, 4, 3).unwrap();
        let result = play_all(&mut session, &[0, 0, 0, 1, 0, 1, 2, 1, 2, 2, 2, 1]);
        assert!(session.board().is_full());
        assert_eq!((result.row, result.column), (0, 1));
        assert_eq!(result.status, GameStatus::Won(PlayerId::Second));
    }

    #[test]
    fn test_column_off_the_board() {
        let mut session = session();
        assert_eq!(
            session.play_column(7),
            Err(MoveError::InvalidColumn { column: 7, width: 7 })
        );
        assert_eq!(session.board().occupied_count(), 0);
        assert_eq!(session.current_player(), PlayerId::First);
    }

    #[test]
    fn test_full_column_rejected() {
        let mut session = session();
        for _ in 0..6 {
            session.play_column(0).unwrap();
        }
        let before = session.board().clone();
        assert_eq!(session.play_column(0), Err(MoveError::ColumnFull { column: 0 }));
        assert_eq!(session.board(), &before);
        assert_eq!(session.current_player(), PlayerId::First);
        assert_eq!(session.status(), GameStatus::Active);
        assert!(!session.legal_columns().contains(&0));

        // The same player may retry elsewhere
        assert_eq!(session.play_column(1).unwrap().player, PlayerId::First);
    }

    #[test]
    fn test_moves_rejected_after_win() {
        let mut session = session();
        play_all(&mut session, &[0, 1, 0, 1, 0, 1, 0]);
        let before = session.board().clone();
        for col in 0..8 {
            assert_eq!(session.play_column(col), Err(MoveError::GameOver));
        }
        assert_eq!(session.board(), &before);
        assert_eq!(session.status(), GameStatus::Won(PlayerId::First));
        assert!(session.legal_columns().is_empty());
    }

    #[test]
    fn test_moves_rejected_after_tie() {
        let (first, second) = players();
        let mut session = GameSession::with_dimensions(first, second, 1, 2).unwrap();
        session.play_column(0).unwrap();
        assert_eq!(session.play_column(1).unwrap().status, GameStatus::Tied);
        assert_eq!(session.play_column(0), Err(MoveError::GameOver));
        assert_eq!(session.status(), GameStatus::Tied);
    }

    #[test]
    fn test_restart() {
        let (first, second) = players();
        let mut session = GameSession::with_dimensions(first, second, 5, 5).unwrap();
        play_all(&mut session, &[0, 1, 0, 1, 0, 1, 0]);
        assert!(session.is_terminal());

        session.restart();
        assert_eq!(session.status(), GameStatus::Active);
        assert_eq!(session.current_player(), PlayerId::First);
        assert_eq!(session.board().occupied_count(), 0);
        assert_eq!(session.board().height(), 5);
        assert_eq!(session.board().width(), 5);
        assert_eq!(session.board().find_landing_row(4), Some(4));
        assert_eq!(session.winning_line(), None);
        assert!(session.play_column(2).is_ok());
    }

    #[test]
    fn test_status_helpers() {
        assert!(GameStatus::Active.is_active());
        assert!(!GameStatus::Tied.is_active());
        assert_eq!(GameStatus::Won(PlayerId::First).winner(), Some(PlayerId::First));
        assert_eq!(GameStatus::Tied.winner(), None);
    }
}
