// Copyright (C) 2020-2026 Andy Kurnia.

use crossmoves::{display, error, game_config, game_state, lexicon, move_picker, movegen};
use rand::prelude::*;

fn main() -> error::Returns<()> {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (game_config, word_list_path) = match args.as_slice() {
        [word_list_path] => (
            game_config::make_english_game_config(),
            word_list_path.as_str(),
        ),
        [config_path, word_list_path] => {
            (game_config::load(config_path)?, word_list_path.as_str())
        }
        _ => {
            eprintln!("usage: crossmoves [config.json] word_list.txt");
            std::process::exit(2);
        }
    };
    let lexicon = lexicon::from_file(word_list_path)?;

    let mut game_state = game_state::GameState::new(&game_config, &lexicon, 2)?;
    let mut rng = rand_chacha::ChaCha20Rng::from_entropy();
    game_state.shuffle_and_draw_tiles(&mut rng)?;
    let mut move_generator = movegen::MoveGenerator::new();
    let move_picker = move_picker::MovePicker::HighScore;

    let mut consecutive_passes = 0;
    loop {
        display::print_board(&game_state.board);
        let turn = game_state.turn as usize;
        move_generator
            .generate_moves(&mut game_state.board, &mut game_state.players[turn].rack)?;
        println!("{} moves found...", move_generator.moves.len());
        let picked = move_picker
            .pick_move(
                &move_generator.moves,
                &game_state.board,
                &game_state.players[turn].rack,
            )
            .cloned();
        match picked {
            Some(play) => {
                println!("Player {} plays: {} {}", turn + 1, play, play.score);
                game_state.play(&play)?;
                consecutive_passes = 0;
                if game_state.played_out() {
                    println!("Player {} went out", turn + 1);
                    break;
                }
            }
            None => {
                println!("Player {} passes", turn + 1);
                consecutive_passes += 1;
                if consecutive_passes >= game_state.players.len() {
                    break;
                }
            }
        }
        game_state.next_turn();
    }

    display::print_board(&game_state.board);
    let final_scores = game_state.final_scores();
    println!("Final scores: {final_scores:?}");
    for winner in game_state.winners() {
        println!("Player {} wins with {}", winner + 1, final_scores[winner]);
    }
    Ok(())
}
