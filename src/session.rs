use log::{debug, info};

use crate::game::{Direction, Level};
use crate::history::History;
use crate::levels::Catalog;

/// Fire-and-forget sound notifications. Playback is a collaborator concern;
/// the core only signals that a move was accepted.
pub trait AudioCue {
    fn play_move_sound(&mut self) {}
}

/// Default cue that plays nothing.
#[derive(Debug, Default)]
pub struct NoAudio;

impl AudioCue for NoAudio {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Playing,
    LevelComplete,
    GameComplete,
    /// No playable content exists at all.
    NoLevels,
    /// The selected level had no player symbol; the caller should return to
    /// the menu.
    PlayerNotFound,
}

/// Abstract input surface. Binding these to physical keys is the front end's
/// job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Undo,
    Restart,
    SelectLevel(usize),
    Advance,
    Cancel,
}

/// Owns the active level attempt: the level instance, its undo history, and
/// the state machine that routes commands between menu, play, and the
/// completion screens.
pub struct Session<A: AudioCue> {
    catalog: Catalog,
    state: GameState,
    current_index: usize,
    level: Option<Level>,
    history: History,
    audio: A,
}

impl Session<NoAudio> {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_audio(catalog, NoAudio)
    }
}

impl<A: AudioCue> Session<A> {
    pub fn with_audio(catalog: Catalog, audio: A) -> Self {
        let state = if catalog.is_empty() {
            GameState::NoLevels
        } else {
            GameState::Menu
        };
        Session {
            catalog,
            state,
            current_index: 0,
            level: None,
            history: History::new(),
            audio,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// The active level, if one is set up (Playing or LevelComplete).
    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn level_count(&self) -> usize {
        self.catalog.len()
    }

    /// Route one command through the state machine. Commands that make no
    /// sense in the current state are ignored.
    pub fn handle(&mut self, command: Command) {
        match (self.state, command) {
            (GameState::Menu, Command::SelectLevel(i)) => self.setup_level(i),

            (GameState::Playing, Command::Move(dir)) => self.attempt_move(dir),
            (GameState::Playing, Command::Undo) => {
                let level = self.level.as_mut().expect("playing without a level");
                if let Err(err) = self.history.undo(level) {
                    debug!("{}", err);
                }
            }
            (GameState::Playing, Command::Restart) => self.setup_level(self.current_index),
            (GameState::Playing, Command::Cancel) => self.back_to_menu(),

            (GameState::LevelComplete, Command::Advance) => {
                self.setup_level(self.current_index + 1)
            }
            (GameState::LevelComplete, Command::Cancel) => self.back_to_menu(),

            (GameState::GameComplete, Command::Cancel) => {
                self.current_index = 0;
                self.back_to_menu();
            }

            (GameState::PlayerNotFound, Command::Cancel) => self.back_to_menu(),

            _ => {}
        }
    }

    /// Parse catalog entry `index` into a fresh level attempt with a
    /// one-snapshot history. Out-of-range indices mean the player has run
    /// past the last level (or there are none at all).
    fn setup_level(&mut self, index: usize) {
        if index >= self.catalog.len() {
            self.state = if self.catalog.is_empty() {
                GameState::NoLevels
            } else {
                GameState::GameComplete
            };
            self.level = None;
            return;
        }

        let rows = self.catalog.get(index).expect("index checked above");
        match Level::from_rows(rows, index) {
            Ok(level) => {
                self.history = History::new();
                self.history.record(&level);
                self.level = Some(level);
                self.current_index = index;
                self.state = GameState::Playing;
                info!("level {} set up", index + 1);
            }
            Err(err) => {
                info!("{}", err);
                self.level = None;
                self.current_index = index;
                self.state = GameState::PlayerNotFound;
            }
        }
    }

    fn attempt_move(&mut self, dir: Direction) {
        let level = self.level.as_mut().expect("playing without a level");
        if !level.try_move(dir) {
            return;
        }
        self.history.record(level);
        self.audio.play_move_sound();
        if level.is_complete() {
            info!("level {} complete", self.current_index + 1);
            self.state = GameState::LevelComplete;
        }
    }

    fn back_to_menu(&mut self) {
        self.level = None;
        self.history = History::new();
        self.state = GameState::Menu;
    }
}
