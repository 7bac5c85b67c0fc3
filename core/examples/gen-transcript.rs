//! Generates replay JSON files for the headless runner.
//!
//! Usage:
//!   cargo run -p brawl-core --example gen-transcript -- [idle|combat|short] > replay.json

use brawl_core::*;

fn main() {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "idle".to_string());

    let config = default_config(42);
    let archetypes = [Archetype::Warrior, Archetype::Hunter];

    let transcript: Vec<[PlayerInput; 2]> = match mode.as_str() {
        "idle" => {
            // Both players idle until the frame cap, no winner
            vec![[NULL_INPUT; 2]; config.max_frames as usize]
        }
        "combat" => {
            // P1 drops to the main stage, walks right and swings;
            // P2 charges shots and releases every 40 frames
            let mut transcript = Vec::new();
            for frame in 0..config.max_frames {
                let p1 = if frame < 20 {
                    PlayerInput::new(button::DOWN)
                } else if frame % 60 < 40 {
                    PlayerInput::new(button::RIGHT | button::ATTACK1)
                } else {
                    PlayerInput::new(button::ATTACK2 | button::SPECIAL)
                };
                let p2 = if frame % 40 < 30 {
                    PlayerInput::new(button::LEFT | button::ATTACK2)
                } else {
                    PlayerInput::new(button::ATTACK1)
                };
                transcript.push([p1, p2]);
            }
            transcript
        }
        "short" => {
            // Short 100-frame idle match for quick runs
            vec![[NULL_INPUT; 2]; 100]
        }
        _ => {
            eprintln!("Unknown mode: {}. Use 'idle', 'combat', or 'short'", mode);
            std::process::exit(1);
        }
    };

    let input = ReplayInput {
        config,
        archetypes,
        transcript,
    };

    // Verify by running the sim
    let (state, summary) = run_replay(&input);

    eprintln!("=== Sim result ({} mode) ===", mode);
    eprintln!(
        "Fighters: {} vs {}",
        archetype_stats(archetypes[0]).display_name,
        archetype_stats(archetypes[1]).display_name
    );
    eprintln!("Final frame: {}", state.frame);
    eprintln!("Match over: {}", state.match_over);
    eprintln!("Winner: {:?}", state.winner);
    eprintln!("Stock: P1={}, P2={}", summary.stocks[0], summary.stocks[1]);
    eprintln!(
        "Damage: P1={:.0}%, P2={:.0}%",
        summary.damage[0], summary.damage[1]
    );

    match serde_json::to_string(&input) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to encode replay: {}", e);
            std::process::exit(1);
        }
    }
}
