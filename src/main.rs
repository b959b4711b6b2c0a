//! Bubble Pop entry point
//!
//! Headless demo: plays one game with a bot that chases combos, then prints
//! the high score table. Scores persist under the user's config directory.

use bubble_pop::persistence::FileStorage;
use bubble_pop::sim::{Bubble, BubbleId, Game, Screen, Tier, TickOutcome};
use bubble_pop::{GameConfig, HighScoreTable, Settings};

/// Pops the bot manages per second
const POPS_PER_TICK: usize = 3;

fn main() {
    env_logger::init();
    log::info!("Bubble Pop (headless) starting...");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    let table = HighScoreTable::new(FileStorage::in_config_dir("bubble-pop"));
    let settings = Settings::for_player("Bot");
    let mut game = match Game::start(settings, GameConfig::default(), Screen::default(), seed, table) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Could not start game: {e}");
            return;
        }
    };

    let mut last_tier = None;
    loop {
        match game.tick() {
            TickOutcome::Running(frame) => {
                for id in pick_targets(&frame.bubbles, last_tier) {
                    if let Some(delta) = game.pop(id) {
                        last_tier = game.session().and_then(|s| s.last_popped_tier());
                        log::debug!("+{} (streak {})", delta.points, delta.combo_streak);
                    }
                }
                println!("{:>3}s  {}  {}", frame.remaining_time, frame.score, frame.high_score);
            }
            TickOutcome::Finished { record, saved } => {
                println!("\nGame over: {} scored {:.1}", record.name, record.score);
                if !saved {
                    println!("(score could not be saved)");
                }
                break;
            }
            TickOutcome::Over => break,
        }
    }

    match game.table().ranked() {
        Ok(scores) => {
            println!("\nHigh scores:");
            for (rank, score) in scores.iter().take(10).enumerate() {
                println!("{:>2}. {:<12} {:.1}", rank + 1, score.name, score.score);
            }
        }
        Err(e) => log::warn!("Could not read high scores: {e}"),
    }
}

/// Bubbles to pop this tick: keep the streak going if possible, else go for
/// the most valuable tier on screen.
fn pick_targets(bubbles: &[Bubble], last_tier: Option<Tier>) -> Vec<BubbleId> {
    let tier = last_tier
        .filter(|t| bubbles.iter().any(|b| b.tier == *t))
        .or_else(|| bubbles.iter().map(|b| b.tier).max());

    bubbles
        .iter()
        .filter(|b| Some(b.tier) == tier)
        .take(POPS_PER_TICK)
        .map(|b| b.id)
        .collect()
}
