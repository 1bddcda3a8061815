//! Tests for the match state machine.

use duel_tictactoe::{Cell, Game, GameError, Outcome, Point, RoomToken, Symbol};

fn new_game() -> Game {
    Game::new(RoomToken::from("room-under-test"))
}

/// Plays alternating moves starting with X, panicking on any refusal.
fn play_all(game: &mut Game, moves: &[(i32, i32)]) -> bool {
    let mut over = false;
    for &(x, y) in moves {
        let symbol = game.turn();
        over = game
            .play(symbol, Point::new(x, y))
            .unwrap_or_else(|e| panic!("move ({x}, {y}) by {symbol} refused: {e}"));
    }
    over
}

fn cell(game: &Game, x: i32, y: i32) -> Cell {
    game.board().get(Point::new(x, y)).expect("on board")
}

#[test]
fn test_new_game_starts_empty_with_x_to_move() {
    let game = new_game();
    assert_eq!(game.turn(), Symbol::X);
    assert_eq!(game.moves(), 0);
    assert_eq!(game.outcome(), Outcome::InProgress);
    assert_eq!(game.board().filled(), 0);
    assert!(game.players().is_empty());
}

#[test]
fn test_turn_alternates_after_each_move() {
    let mut game = new_game();
    for (i, &(x, y)) in [(0, 0), (1, 1), (2, 2), (0, 2)].iter().enumerate() {
        let mover = game.turn();
        game.play(mover, Point::new(x, y)).expect("valid move");
        assert_eq!(game.turn(), mover.opponent());
        assert_eq!(game.moves(), i + 1);
    }
}

#[test]
fn test_occupied_point_rejected_without_change() {
    let mut game = new_game();
    play_all(&mut game, &[(1, 1)]);
    let board = game.board().clone();

    let result = game.play(Symbol::O, Point::CENTER);
    assert_eq!(result, Err(GameError::PointOccupied));
    assert_eq!(game.board(), &board);
    assert_eq!(game.moves(), 1);
    assert_eq!(game.turn(), Symbol::O);
    assert_eq!(game.outcome(), Outcome::InProgress);
}

#[test]
fn test_wrong_symbol_rejected_without_change() {
    let mut game = new_game();
    assert_eq!(game.play(Symbol::O, Point::CENTER), Err(GameError::NotYourTurn));
    assert_eq!(game.moves(), 0);
    assert_eq!(game.turn(), Symbol::X);
    assert_eq!(cell(&game, 1, 1), Cell::Empty);
}

#[test]
fn test_turn_checked_before_occupancy() {
    let mut game = new_game();
    play_all(&mut game, &[(0, 0)]);
    // X plays again on its own cell: wrong turn wins over occupied.
    assert_eq!(game.play(Symbol::X, Point::TOP_LEFT), Err(GameError::NotYourTurn));
}

#[test]
fn test_out_of_range_point_rejected() {
    let mut game = new_game();
    assert_eq!(game.can_play_at(Point::new(3, 0)), Err(GameError::InvalidPoint));
    assert_eq!(game.can_play_at(Point::new(0, -1)), Err(GameError::InvalidPoint));
    assert_eq!(game.play(Symbol::X, Point::new(-1, 2)), Err(GameError::InvalidPoint));
    assert_eq!(game.play(Symbol::X, Point::new(1, 3)), Err(GameError::InvalidPoint));
    assert_eq!(game.moves(), 0);
    assert_eq!(game.turn(), Symbol::X);
}

#[test]
fn test_can_play_at_tracks_occupancy() {
    let mut game = new_game();
    assert_eq!(game.can_play_at(Point::CENTER), Ok(true));
    play_all(&mut game, &[(1, 1)]);
    assert_eq!(game.can_play_at(Point::CENTER), Ok(false));
}

#[test]
fn test_row_win_on_fifth_move() {
    let mut game = new_game();
    // X: (0,0) (0,1) (0,2); O: (1,0) (1,1)
    assert!(!play_all(&mut game, &[(0, 0), (1, 0), (0, 1), (1, 1)]));
    assert_eq!(game.outcome(), Outcome::InProgress);

    assert!(play_all(&mut game, &[(0, 2)]));
    assert_eq!(game.outcome(), Outcome::Won(Symbol::X));
    let win = game.win_state();
    assert_eq!(*win.winner(), Some(Symbol::X));
    assert!(!*win.is_tie());
}

#[test]
fn test_every_line_wins_exactly_when_completed() {
    let lines: [[(i32, i32); 3]; 8] = [
        [(0, 0), (0, 1), (0, 2)],
        [(1, 0), (1, 1), (1, 2)],
        [(2, 0), (2, 1), (2, 2)],
        [(0, 0), (1, 0), (2, 0)],
        [(0, 1), (1, 1), (2, 1)],
        [(0, 2), (1, 2), (2, 2)],
        [(0, 0), (1, 1), (2, 2)],
        [(0, 2), (1, 1), (2, 0)],
    ];

    for line in lines {
        let fillers: Vec<(i32, i32)> = Point::all()
            .map(|p| (p.x, p.y))
            .filter(|p| !line.contains(p))
            .take(2)
            .collect();

        // Complete the line last, from each of its three cells in turn.
        for last in 0..3 {
            let mut xs: Vec<_> = line.iter().copied().filter(|&p| p != line[last]).collect();
            xs.push(line[last]);

            let mut game = new_game();
            let sequence = [xs[0], fillers[0], xs[1], fillers[1]];
            assert!(!play_all(&mut game, &sequence), "line {line:?} ended early");
            assert_eq!(game.outcome(), Outcome::InProgress);

            assert!(play_all(&mut game, &[xs[2]]), "line {line:?} not detected");
            assert_eq!(game.outcome(), Outcome::Won(Symbol::X), "line {line:?}");
        }
    }
}

#[test]
fn test_o_can_win() {
    let mut game = new_game();
    // O takes column 2 while X scatters.
    play_all(&mut game, &[(0, 0), (0, 2), (1, 0), (1, 2), (2, 1), (2, 2)]);
    assert_eq!(game.outcome(), Outcome::Won(Symbol::O));
    assert_eq!(game.turn(), Symbol::X);
}

#[test]
fn test_full_board_without_line_is_tie() {
    let mut game = new_game();
    // X O X
    // X O O
    // O X X
    let moves = [
        (0, 0),
        (0, 1),
        (0, 2),
        (1, 1),
        (1, 0),
        (1, 2),
        (2, 1),
        (2, 0),
    ];
    assert!(!play_all(&mut game, &moves));
    assert_eq!(game.outcome(), Outcome::InProgress);

    assert!(play_all(&mut game, &[(2, 2)]));
    assert_eq!(game.outcome(), Outcome::Tied);
    assert_eq!(game.moves(), 9);
    assert!(game.board().is_full());
    assert_eq!(game.turn(), Symbol::O);

    let win = game.win_state();
    assert_eq!(*win.winner(), None);
    assert!(*win.is_tie());
}

#[test]
fn test_winning_ninth_move_is_not_a_tie() {
    let mut game = new_game();
    // X O X
    // O X O
    // O X X   <- X completes the main diagonal on move 9
    play_all(
        &mut game,
        &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 1), (2, 0)],
    );
    assert_eq!(game.outcome(), Outcome::InProgress);
    assert!(play_all(&mut game, &[(2, 2)]));
    assert_eq!(game.outcome(), Outcome::Won(Symbol::X));
    assert!(!*game.win_state().is_tie());
}

#[test]
fn test_no_moves_after_game_over() {
    let mut game = new_game();
    play_all(&mut game, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
    let board = game.board().clone();

    assert_eq!(game.play(Symbol::O, Point::new(2, 2)), Err(GameError::GameOver));
    // Game over is checked before the turn.
    assert_eq!(game.play(Symbol::X, Point::new(2, 2)), Err(GameError::GameOver));
    assert_eq!(game.board(), &board);
    assert_eq!(game.moves(), 5);
}

#[test]
fn test_win_state_in_progress_is_not_tie() {
    let game = new_game();
    let win = game.win_state();
    assert_eq!(*win.winner(), None);
    assert!(!*win.is_tie());
}

#[test]
fn test_rematch_rejected_mid_game() {
    let mut game = new_game();
    play_all(&mut game, &[(0, 0)]);
    assert_eq!(game.rematch(), Err(GameError::NotAllowed));
    assert_eq!(game.moves(), 1);
}

#[test]
fn test_rematch_resets_board_and_keeps_players() {
    let mut game = new_game();
    let a = duel_tictactoe::ConnectionId::new(10);
    let b = duel_tictactoe::ConnectionId::new(11);
    game.add_player(a).unwrap();
    game.add_player(b).unwrap();
    // O wins, so the turn after the final move is X's.
    play_all(&mut game, &[(0, 0), (1, 1), (0, 1), (2, 2), (1, 0), (0, 2), (2, 1), (2, 0)]);
    assert_eq!(game.outcome(), Outcome::Won(Symbol::O));

    game.rematch().expect("rematch after win");
    assert_eq!(game.outcome(), Outcome::InProgress);
    assert_eq!(game.moves(), 0);
    assert_eq!(game.turn(), Symbol::X);
    assert_eq!(game.board().filled(), 0);
    assert_eq!(game.symbol_of(a), Some(Symbol::X));
    assert_eq!(game.symbol_of(b), Some(Symbol::O));

    // A fresh match plays normally.
    assert_eq!(game.play(Symbol::X, Point::CENTER), Ok(false));
}

#[test]
fn test_rematch_after_tie() {
    let mut game = new_game();
    play_all(
        &mut game,
        &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)],
    );
    assert_eq!(game.outcome(), Outcome::Tied);
    assert_eq!(game.rematch(), Ok(()));
    assert_eq!(game.turn(), Symbol::X);
}

#[test]
fn test_hand_traced_scenario() {
    let mut game = new_game();
    let a = duel_tictactoe::ConnectionId::new(1);
    let b = duel_tictactoe::ConnectionId::new(2);

    assert_eq!(game.add_player(a), Ok(Symbol::X));
    assert_eq!(game.board().filled(), 0);
    assert_eq!(game.turn(), Symbol::X);
    assert_eq!(game.add_player(b), Ok(Symbol::O));

    assert_eq!(game.play(Symbol::X, Point::new(0, 0)), Ok(false));
    assert_eq!(game.turn(), Symbol::O);
    assert_eq!(cell(&game, 0, 0), Cell::X);

    assert_eq!(game.play(Symbol::O, Point::new(0, 1)), Ok(false));
    assert_eq!(game.play(Symbol::X, Point::new(1, 1)), Ok(false));
    assert_eq!(game.play(Symbol::O, Point::new(2, 2)), Ok(false));

    // Row 2 = X . O, column 0 = X . X, anti-diagonal = X X . (0,2 empty).
    assert_eq!(game.play(Symbol::X, Point::new(2, 0)), Ok(false));
    assert_eq!(game.outcome(), Outcome::InProgress);
    assert_eq!(game.turn(), Symbol::O);
    assert_eq!(game.moves(), 5);
}

#[test]
fn test_snapshot_reflects_state() {
    let mut game = new_game();
    let a = duel_tictactoe::ConnectionId::new(1);
    game.add_player(a).unwrap();
    play_all(&mut game, &[(2, 1)]);

    let mine = game.state_for(a);
    assert_eq!(mine.room().as_str(), "room-under-test");
    assert_eq!(*mine.symbol(), Some(Symbol::X));
    assert_eq!(*mine.turn(), Symbol::O);
    assert!(!*mine.game_over());
    assert_eq!(mine.board().get(Point::new(2, 1)), Ok(Cell::X));

    let anonymous = game.state();
    assert_eq!(*anonymous.symbol(), None);
    assert_eq!(game.state_for(duel_tictactoe::ConnectionId::new(99)).symbol(), &None);
}

#[test]
fn test_snapshot_wire_shape() {
    let mut game = new_game();
    let a = duel_tictactoe::ConnectionId::new(1);
    game.add_player(a).unwrap();
    play_all(&mut game, &[(0, 0)]);

    let json = serde_json::to_value(game.state_for(a)).unwrap();
    assert_eq!(json["room"], "room-under-test");
    assert_eq!(json["symbol"], "X");
    assert_eq!(json["turn"], "O");
    assert_eq!(json["gameOver"], false);
    assert_eq!(json["isTie"], false);
    assert!(json.get("winner").is_none());
    assert_eq!(json["board"][0][0], "X");
    assert_eq!(json["board"][2][2], "");
}
