//! Console front-end: renders the board, prompts the side to move and feeds
//! parsed moves to the game. All rules live in the library.

use std::io;
use std::io::prelude::*;

use patzer::game::{parse_move, Game, TurnOutcome};

fn prompt(game: &Game) {
    println!("{}", game.board());
    if game.is_check() {
        println!("Check!");
    }
    print!("{} to move: ", game.side_to_move());
    let _ = io::stdout().flush();
}

fn main() -> anyhow::Result<()> {
    patzer::print_game_info();
    println!("Enter moves as 'e2 e4'. 'board' dumps the piece map, 'quit' exits.");
    let mut game = Game::new();
    prompt(&game);
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "" => {},
            "quit" => break,
            "board" => println!("{:?}", game.board()),
            input => {
                let (from, to) = match parse_move(input) {
                    Ok(squares) => squares,
                    Err(e) => {
                        println!("Invalid input: {e}");
                        prompt(&game);
                        continue;
                    },
                };
                match game.advance_turn(from, to) {
                    TurnOutcome::Rejected => println!("Invalid move!"),
                    TurnOutcome::Continue => {},
                    TurnOutcome::WhiteWins => {
                        println!("{}", game.board());
                        println!("Checkmate! White wins.");
                        return Ok(());
                    },
                    TurnOutcome::BlackWins => {
                        println!("{}", game.board());
                        println!("Checkmate! Black wins.");
                        return Ok(());
                    },
                }
            },
        }
        prompt(&game);
    }
    Ok(())
}
