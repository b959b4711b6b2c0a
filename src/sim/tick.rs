//! Countdown tick driver
//!
//! One tick per second of game time. Each tick counts the clock down, clears
//! the previous batch and places a fresh one; pops arrive between ticks. The
//! wall-clock timer that calls `tick` lives outside this crate.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::Playfield;
use super::placement::{PlacementEngine, PlacementError};
use super::scoring::{ScoreDelta, ScoringSession};
use super::state::{Bubble, BubbleId};
use crate::consts::*;
use crate::highscores::{GameScore, HighScoreTable, StoreError};
use crate::persistence::KeyValueStore;
use crate::settings::{Settings, SettingsError};
use crate::tuning::{ConfigError, GameConfig};

#[derive(Debug, Error, PartialEq)]
pub enum StartError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Visible screen area in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub width: f32,
    pub height: f32,
}

impl Default for Screen {
    fn default() -> Self {
        // Portrait phone
        Self {
            width: 390.0,
            height: 844.0,
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    GameOver,
}

/// What the display layer shows after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub remaining_secs: u32,
    /// Countdown label text
    pub remaining_time: String,
    /// Score label text
    pub score: String,
    /// High score label text
    pub high_score: String,
    /// Bubbles to draw (and to report pops for)
    pub bubbles: Vec<Bubble>,
    /// Seconds a bubble should take to float off screen
    pub float_duration: f32,
}

/// Result of advancing the clock
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Game continues with a fresh batch
    Running(Frame),
    /// The clock hit zero on this tick
    Finished {
        record: GameScore,
        /// False if the record could not be written to the high score table
        saved: bool,
    },
    /// The game had already ended
    Over,
}

/// A single timed game
pub struct Game<S: KeyValueStore> {
    settings: Settings,
    engine: PlacementEngine,
    /// Taken when the game ends
    session: Option<ScoringSession>,
    playfield: Playfield,
    rng: Pcg32,
    remaining_secs: u32,
    phase: GamePhase,
    table: HighScoreTable<S>,
}

impl<S: KeyValueStore> Game<S> {
    /// Start a game. The best score so far is read from `table`; an unreadable
    /// table counts as no history and is replaced when the game's score is
    /// saved.
    pub fn start(
        settings: Settings,
        config: GameConfig,
        screen: Screen,
        seed: u64,
        table: HighScoreTable<S>,
    ) -> Result<Self, StartError> {
        settings.validate()?;
        let engine = PlacementEngine::new(config)?;
        let playfield = engine.playfield(screen.width, screen.height, PLAYFIELD_TOP_MARGIN)?;

        let high_score = match table.read_high_score() {
            Ok(score) => score,
            Err(e) => {
                log::warn!("Ignoring unreadable high scores: {e}");
                0.0
            }
        };
        let session = ScoringSession::new(engine.config(), high_score);

        log::info!(
            "Started game for {} ({}s, up to {} bubbles, seed {seed})",
            settings.player_name,
            settings.duration_secs,
            settings.max_bubbles
        );

        Ok(Self {
            remaining_secs: settings.duration_secs,
            settings,
            engine,
            session: Some(session),
            playfield,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            table,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn bubbles(&self) -> &[Bubble] {
        self.engine.bubbles()
    }

    pub fn session(&self) -> Option<&ScoringSession> {
        self.session.as_ref()
    }

    pub fn table(&self) -> &HighScoreTable<S> {
        &self.table
    }

    /// Snapshot for the display layer
    pub fn frame(&self) -> Frame {
        let (score, high_score) = self
            .session
            .as_ref()
            .map(|s| (s.score(), s.high_score()))
            .unwrap_or_default();
        let float_duration = if self.remaining_secs <= HURRY_UP_SECS {
            HURRY_FLOAT_DURATION_SECS
        } else {
            FLOAT_DURATION_SECS
        };

        Frame {
            remaining_secs: self.remaining_secs,
            remaining_time: self.remaining_secs.to_string(),
            score: format!("Score: {score:.1}"),
            high_score: format!("High Score: {high_score:.1}"),
            bubbles: self.engine.bubbles().to_vec(),
            float_duration,
        }
    }

    /// Advance the clock by one second
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase == GamePhase::GameOver {
            return TickOutcome::Over;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return self.finish();
        }

        self.engine.clear();
        match self
            .engine
            .generate(&mut self.rng, self.settings.max_bubbles, &self.playfield)
        {
            Ok(batch) => log::debug!("{}s left: {} bubbles", self.remaining_secs, batch.len()),
            Err(PlacementError::PlacementExhausted { placed, attempts }) => log::warn!(
                "No bubbles this tick: placement gave up after {attempts} attempts ({placed} placed)"
            ),
            Err(e) => log::warn!("No bubbles this tick: {e}"),
        }

        TickOutcome::Running(self.frame())
    }

    /// Pop a bubble. `None` if it is not on the playfield or the game is over.
    pub fn pop(&mut self, id: BubbleId) -> Option<ScoreDelta> {
        let session = self.session.as_mut()?;
        let bubble = self.engine.take(id)?;
        let delta = session.register_pop(&bubble);
        if delta.new_high_score {
            log::debug!("New high score: {:.1}", delta.score);
        }
        Some(delta)
    }

    /// Append the final score. An unreadable history counts as no history:
    /// it is cleared and the score becomes its first entry.
    fn save(&mut self, record: &GameScore) -> Result<(), StoreError> {
        match self.table.append(record.clone()) {
            Err(StoreError::Decode(e)) => {
                log::warn!("Resetting unreadable high scores: {e}");
                self.table.clear()?;
                self.table.append(record.clone())
            }
            other => other,
        }
    }

    /// End the game and record the final score
    fn finish(&mut self) -> TickOutcome {
        self.phase = GamePhase::GameOver;
        self.engine.clear();

        let Some(session) = self.session.take() else {
            return TickOutcome::Over;
        };
        let record = session.finish(self.settings.player_name.clone());

        let saved = match self.save(&record) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Could not save score for {}: {e}", record.name);
                false
            }
        };
        log::info!("Game over: {} scored {:.1}", record.name, record.score);

        TickOutcome::Finished { record, saved }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    fn new_game(duration: u32, store: MemoryStorage) -> Game<MemoryStorage> {
        Game::start(
            Settings::for_player("Emily").with_duration(duration),
            GameConfig::default(),
            Screen::default(),
            12345,
            HighScoreTable::new(store),
        )
        .unwrap()
    }

    #[test]
    fn test_start_requires_name() {
        let result = Game::start(
            Settings::default(),
            GameConfig::default(),
            Screen::default(),
            1,
            HighScoreTable::new(MemoryStorage::new()),
        );
        assert!(matches!(result, Err(StartError::Settings(SettingsError::NameRequired))));
    }

    #[test]
    fn test_initial_frame() {
        let game = new_game(60, MemoryStorage::new());
        let frame = game.frame();
        assert_eq!(frame.remaining_time, "60");
        assert_eq!(frame.score, "Score: 0.0");
        assert_eq!(frame.high_score, "High Score: 0.0");
        assert!(frame.bubbles.is_empty());
        assert_eq!(frame.float_duration, FLOAT_DURATION_SECS);
    }

    #[test]
    fn test_game_ends_after_duration_and_saves_once() {
        let mut game = new_game(3, MemoryStorage::new());

        assert!(matches!(game.tick(), TickOutcome::Running(_)));
        assert!(matches!(game.tick(), TickOutcome::Running(_)));
        match game.tick() {
            TickOutcome::Finished { record, saved } => {
                assert_eq!(record.name, "Emily");
                assert!(saved);
            }
            other => panic!("expected finish, got {other:?}"),
        }
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.tick(), TickOutcome::Over);
        assert_eq!(game.table().load().unwrap().len(), 1);
    }

    #[test]
    fn test_pop_scores_and_removes() {
        let mut game = new_game(60, MemoryStorage::new());
        let TickOutcome::Running(frame) = game.tick() else {
            panic!("game should be running");
        };

        // A dense roll can leave a tick empty; the next one retries
        let mut bubbles = frame.bubbles;
        while bubbles.is_empty() {
            bubbles = game.tick_bubbles();
        }

        let target = bubbles[0].clone();
        let delta = game.pop(target.id).unwrap();
        assert_eq!(delta.points, target.point_value() as f64);
        assert!(!delta.combo);
        assert!(game.pop(target.id).is_none());
        assert!(game.bubbles().iter().all(|b| b.id != target.id));
    }

    #[test]
    fn test_new_batch_replaces_old_one() {
        let mut game = new_game(60, MemoryStorage::new());
        let first = game.tick_bubbles();
        let second = game.tick_bubbles();
        for old in &first {
            assert!(second.iter().all(|b| b.id != old.id));
            assert!(game.pop(old.id).is_none());
        }
    }

    #[test]
    fn test_hurry_up_speeds_float() {
        let mut game = new_game(17, MemoryStorage::new());
        let TickOutcome::Running(frame) = game.tick() else {
            panic!("game should be running");
        };
        assert_eq!(frame.remaining_secs, 16);
        assert_eq!(frame.float_duration, FLOAT_DURATION_SECS);

        let TickOutcome::Running(frame) = game.tick() else {
            panic!("game should be running");
        };
        assert_eq!(frame.float_duration, HURRY_FLOAT_DURATION_SECS);
    }

    #[test]
    fn test_corrupt_history_starts_from_zero() {
        let mut store = MemoryStorage::new();
        store
            .set(HighScoreTable::<MemoryStorage>::STORAGE_KEY, "garbage")
            .unwrap();
        let mut game = new_game(1, store);
        assert_eq!(game.session().unwrap().high_score(), 0.0);

        // The unreadable history is replaced by this game's score
        let record = match game.tick() {
            TickOutcome::Finished { record, saved } => {
                assert!(saved);
                record
            }
            other => panic!("expected finish, got {other:?}"),
        };
        assert_eq!(game.table().load().unwrap(), vec![record]);
    }

    #[test]
    fn test_high_score_seeded_from_table() {
        let mut table = HighScoreTable::new(MemoryStorage::new());
        table.append(GameScore::new("Old", 42.5)).unwrap();
        let game = Game::start(
            Settings::for_player("New"),
            GameConfig::default(),
            Screen::default(),
            9,
            table,
        )
        .unwrap();
        assert_eq!(game.frame().high_score, "High Score: 42.5");
    }

    impl Game<MemoryStorage> {
        /// Tick and return the new batch (test helper)
        fn tick_bubbles(&mut self) -> Vec<Bubble> {
            match self.tick() {
                TickOutcome::Running(frame) => frame.bubbles,
                other => panic!("game should be running, got {other:?}"),
            }
        }
    }
}
