//! JSON-driven mate-in-one suite: the engine must convert every problem
//! into an immediate checkmate.

use serde::Deserialize;

use castellan::{Board, Engine};

#[derive(Deserialize)]
struct ProblemSet {
    problems: Vec<Problem>,
}

#[derive(Deserialize)]
struct Problem {
    #[serde(rename = "type")]
    kind: String,
    fen: String,
}

#[test]
fn mate_in_one_suite() {
    let data = include_str!("data/problems.json");
    let set: ProblemSet = serde_json::from_str(data).expect("invalid problems.json");

    for problem in set.problems.iter().filter(|p| p.kind == "Mate in One") {
        let mut board = Board::from_fen(&problem.fen);
        let to_move = board.side_to_move();

        let mut engine = Engine::new();
        let result = engine.find_best_move(&mut board, to_move, 2);
        assert!(
            result.best_move.is_valid(),
            "no move found for fen: {}",
            problem.fen
        );

        board.make_move(result.best_move);
        assert!(
            board.is_checkmate(to_move.opposite()),
            "move {} does not mate for fen: {}",
            result.best_move,
            problem.fen
        );
    }
}
