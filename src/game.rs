use tracing::{debug, info, trace};

use crate::ai::solver::Solution;
use crate::board::Board;
use crate::error::{GameError, GameResult};
use crate::types::{GameState, MoveOutcome, MoveRecord, Player, Square, Status};

pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, from: Square, player: Player) -> Option<Square>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&self, board: &Board, from: Square, _player: Player) -> Option<Square> {
        board.legal_moves(from).first().copied()
    }
}

/// Plays perfectly using an exhaustive solution of the board.
#[derive(Debug, Clone)]
pub struct SolverMoveSelector {
    solution: Solution,
}

impl SolverMoveSelector {
    pub fn new(board: &Board) -> Self {
        Self {
            solution: Solution::for_board(board),
        }
    }
}

impl MoveSelector for SolverMoveSelector {
    fn select_move(&self, board: &Board, from: Square, _player: Player) -> Option<Square> {
        if self.solution.board() != board {
            return Solution::solve(board).best_move(from);
        }
        self.solution.best_move(from)
    }
}

pub struct GameInstance {
    board: Board,
    rook: Square,
    current_player: Player,
    status: Status,
    legal: u64,
    history: Vec<MoveRecord>,
    selector: Box<dyn MoveSelector>,
}

impl GameInstance {
    pub fn new(board: Board, selector: Box<dyn MoveSelector>) -> Self {
        let mut game = Self {
            board,
            rook: board.start(),
            current_player: Player::One,
            status: Status::InProgress,
            legal: 0,
            history: Vec::new(),
            selector,
        };
        game.refresh_legal_moves();
        game
    }

    pub fn new_with_default_selector(board: Board) -> Self {
        let selector = SolverMoveSelector::new(&board);
        Self::new(board, Box::new(selector))
    }

    pub fn reset(&mut self) {
        self.rook = self.board.start();
        self.current_player = Player::One;
        self.status = Status::InProgress;
        self.history.clear();
        self.refresh_legal_moves();
        info!(rook = %self.rook.name(self.board.height()), "game reset");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rook(&self) -> Square {
        self.rook
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Current legal destinations, rightward first. Empty once the game is won.
    pub fn legal_moves(&self) -> Vec<Square> {
        self.board
            .legal_moves(self.rook)
            .into_iter()
            .filter(|sq| self.legal & self.board.bit(*sq) != 0)
            .collect()
    }

    pub fn is_legal(&self, target: Square) -> bool {
        self.legal & self.board.bit(target) != 0
    }

    /// Moves the rook for the current player, reporting why a move was refused.
    /// A refused move leaves the state untouched.
    pub fn try_move(&mut self, target: Square) -> GameResult<Status> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        if !self.board.contains(target) {
            return Err(GameError::OutOfBounds(target));
        }
        if !self.is_legal(target) {
            return Err(GameError::IllegalMove(target));
        }

        let mover = self.current_player;
        self.history.push(MoveRecord {
            player: mover.number(),
            from: self.rook,
            to: target,
        });
        self.rook = target;

        if target == self.board.terminal() {
            self.status = Status::Won(mover);
            info!(
                winner = mover.number(),
                moves = self.history.len(),
                "rook reached the terminal square"
            );
        } else {
            self.current_player = mover.opponent();
        }
        self.refresh_legal_moves();

        Ok(self.status)
    }

    /// Silent form of [`Self::try_move`]: an illegal request is simply ignored.
    pub fn apply_move(&mut self, target: Square) -> MoveOutcome {
        match self.try_move(target) {
            Ok(status) => MoveOutcome::Accepted(status),
            Err(err) => {
                debug!(%target, %err, "move rejected");
                MoveOutcome::Rejected
            }
        }
    }

    /// Lets the injected selector move for the current player.
    pub fn do_ai_move(&mut self) -> GameResult<Square> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }

        let selected = self
            .selector
            .select_move(&self.board, self.rook, self.current_player)
            .ok_or(GameError::NoMoveSelected)?;
        debug!(player = self.current_player.number(), %selected, "selector chose move");

        self.try_move(selected)?;
        Ok(selected)
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            width: self.board.width(),
            height: self.board.height(),
            rook: self.rook,
            current_player: self.current_player.number(),
            is_game_over: self.status.is_over(),
            winner: self.status.winner().map_or(0, Player::number),
            legal_moves: self.legal_moves(),
            history: self.history.clone(),
        }
    }

    fn refresh_legal_moves(&mut self) {
        self.legal = match self.status {
            Status::InProgress => self.board.legal_moves_mask(self.rook),
            Status::Won(_) => 0,
        };
        trace!(rook = %self.rook, count = self.legal.count_ones(), "legal moves recomputed");
    }

    #[cfg(test)]
    fn set_position_for_test(&mut self, rook: Square, current_player: Player) {
        self.rook = rook;
        self.current_player = current_player;
        self.status = Status::InProgress;
        self.history.clear();
        self.refresh_legal_moves();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedMoveSelector {
        mv: Square,
    }

    impl MoveSelector for FixedMoveSelector {
        fn select_move(&self, _board: &Board, _from: Square, _player: Player) -> Option<Square> {
            Some(self.mv)
        }
    }

    struct NoMoveSelector;

    impl MoveSelector for NoMoveSelector {
        fn select_move(&self, _board: &Board, _from: Square, _player: Player) -> Option<Square> {
            None
        }
    }

    fn new_game() -> GameInstance {
        GameInstance::new(Board::default(), Box::new(FirstLegalMoveSelector))
    }

    #[test]
    fn initial_state_is_correct() {
        let game = new_game();
        let state = game.to_game_state();

        assert_eq!(state.rook, Square::new(0, 4));
        assert_eq!(state.current_player, 1);
        assert!(!state.is_game_over);
        assert_eq!(state.winner, 0);
        assert_eq!(state.legal_moves.len(), 11);
        assert!(state.history.is_empty());
        assert_eq!(game.status(), Status::InProgress);
    }

    #[test]
    fn rightward_then_upward_to_terminal_wins_for_player_two() {
        let mut game = new_game();

        let first = game.apply_move(Square::new(7, 4));
        assert_eq!(first, MoveOutcome::Accepted(Status::InProgress));
        assert_eq!(game.current_player(), Player::Two);
        assert_eq!(game.legal_moves().len(), 4);

        let second = game.apply_move(Square::new(7, 0));
        assert_eq!(second, MoveOutcome::Accepted(Status::Won(Player::Two)));
        assert_eq!(game.status(), Status::Won(Player::Two));
        assert_eq!(game.current_player(), Player::Two);
        assert!(game.legal_moves().is_empty());
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn upward_to_top_left_is_not_terminal() {
        let mut game = new_game();

        let outcome = game.apply_move(Square::new(0, 0));

        assert_eq!(outcome, MoveOutcome::Accepted(Status::InProgress));
        assert_eq!(game.current_player(), Player::Two);
        assert_eq!(game.rook(), Square::new(0, 0));
        assert_eq!(game.legal_moves().len(), 7);
    }

    #[test]
    fn diagonal_move_is_rejected_and_state_unchanged() {
        let mut game = new_game();
        let before = game.to_game_state();

        assert_eq!(game.apply_move(Square::new(1, 3)), MoveOutcome::Rejected);
        assert_eq!(game.to_game_state(), before);
        assert_eq!(
            game.try_move(Square::new(1, 3)),
            Err(GameError::IllegalMove(Square::new(1, 3)))
        );
        assert_eq!(game.to_game_state(), before);
    }

    #[test]
    fn every_non_legal_square_is_rejected_from_every_position() {
        let board = Board::default();
        let mut game = new_game();

        for y in 0..board.height() {
            for x in 0..board.width() {
                let from = Square::new(x, y);
                if from == board.terminal() {
                    continue;
                }
                for ty in 0..board.height() {
                    for tx in 0..board.width() {
                        let target = Square::new(tx, ty);
                        game.set_position_for_test(from, Player::One);
                        let legal = board.legal_moves_mask(from) & board.bit(target) != 0;

                        let outcome = game.apply_move(target);

                        assert_eq!(outcome.is_accepted(), legal, "{from} -> {target}");
                        if legal && target != board.terminal() {
                            assert_eq!(game.current_player(), Player::Two);
                            assert_eq!(game.status(), Status::InProgress);
                        } else if !legal {
                            assert_eq!(game.rook(), from);
                            assert_eq!(game.current_player(), Player::One);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn out_of_bounds_target_is_rejected() {
        let mut game = new_game();

        assert_eq!(
            game.try_move(Square::new(8, 4)),
            Err(GameError::OutOfBounds(Square::new(8, 4)))
        );
        assert_eq!(game.apply_move(Square::new(0, 9)), MoveOutcome::Rejected);
        assert_eq!(game.rook(), Square::new(0, 4));
    }

    #[test]
    fn won_game_rejects_all_moves_until_reset() {
        let mut game = new_game();
        game.set_position_for_test(Square::new(7, 3), Player::One);

        assert_eq!(
            game.apply_move(Square::new(7, 0)),
            MoveOutcome::Accepted(Status::Won(Player::One))
        );

        for y in 0..5 {
            for x in 0..8 {
                assert_eq!(game.apply_move(Square::new(x, y)), MoveOutcome::Rejected);
            }
        }
        assert_eq!(game.try_move(Square::new(0, 0)), Err(GameError::GameOver));
        assert_eq!(game.do_ai_move(), Err(GameError::GameOver));
        assert_eq!(game.status(), Status::Won(Player::One));

        game.reset();

        assert_eq!(game.rook(), Square::new(0, 4));
        assert_eq!(game.current_player(), Player::One);
        assert_eq!(game.status(), Status::InProgress);
        assert!(game.history().is_empty());
        assert_eq!(game.legal_moves().len(), 11);
    }

    #[test]
    fn reset_mid_game_restores_initial_state() {
        let mut game = new_game();
        let initial = game.to_game_state();
        let _ = game.apply_move(Square::new(3, 4));
        let _ = game.apply_move(Square::new(3, 1));

        game.reset();

        assert_eq!(game.to_game_state(), initial);
    }

    #[test]
    fn ai_move_applies_selected_square() {
        let mut game = GameInstance::new(
            Board::default(),
            Box::new(FixedMoveSelector {
                mv: Square::new(5, 4),
            }),
        );

        assert_eq!(game.do_ai_move(), Ok(Square::new(5, 4)));
        assert_eq!(game.rook(), Square::new(5, 4));
        assert_eq!(game.current_player(), Player::Two);
        assert_eq!(
            game.history(),
            &[MoveRecord {
                player: 1,
                from: Square::new(0, 4),
                to: Square::new(5, 4),
            }]
        );
    }

    #[test]
    fn ai_move_with_illegal_selection_returns_error() {
        let mut game = GameInstance::new(
            Board::default(),
            Box::new(FixedMoveSelector {
                mv: Square::new(1, 3),
            }),
        );

        assert_eq!(
            game.do_ai_move(),
            Err(GameError::IllegalMove(Square::new(1, 3)))
        );
        assert_eq!(game.rook(), Square::new(0, 4));
    }

    #[test]
    fn ai_move_without_selection_returns_error() {
        let mut game = GameInstance::new(Board::default(), Box::new(NoMoveSelector));

        assert_eq!(game.do_ai_move(), Err(GameError::NoMoveSelected));
    }

    #[test]
    fn solver_selector_wins_as_first_player() {
        let mut game = GameInstance::new_with_default_selector(Board::default());

        while !game.status().is_over() {
            if game.current_player() == Player::One {
                game.do_ai_move().unwrap();
            } else {
                let reply = game.legal_moves()[0];
                assert!(game.apply_move(reply).is_accepted());
            }
        }

        assert_eq!(game.status(), Status::Won(Player::One));
    }
}
