use tracing::debug;

use crate::game::{Direction, Level};

use super::menu::{MenuItem, MenuLayout};

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Menu,
    LevelMenu,
    Playing,
    Paused,
    GameOver,
    Exit,
}

/// Discrete input delivered to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionInput {
    /// Pointer press at screen pixel coordinates
    Click { x: i32, y: i32 },
    /// Keyboard shortcut for a menu item
    Choose(MenuItem),
    Steer(Direction),
    TogglePause,
    Quit,
}

/// What the game loop has to do after an input was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    None,
    /// Reset the game state for a new round on this level
    StartRound(Level),
    /// Forward a direction change to the game state
    Steer(Direction),
}

/// Menu and play-state machine of one program run
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    level: Level,
    layout: MenuLayout,
}

impl Session {
    /// A session waiting on the main menu
    pub fn new(layout: MenuLayout) -> Self {
        Self {
            state: SessionState::Menu,
            level: Level::One,
            layout,
        }
    }

    /// A session already playing, for modes without menus
    pub fn playing(layout: MenuLayout, level: Level) -> Self {
        Self {
            state: SessionState::Playing,
            level,
            layout,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn layout(&self) -> &MenuLayout {
        &self.layout
    }

    /// Whether the game loop should tick the engine
    pub fn is_playing(&self) -> bool {
        self.state == SessionState::Playing
    }

    pub fn should_exit(&self) -> bool {
        self.state == SessionState::Exit
    }

    /// Apply one input and report what the game loop has to do
    pub fn handle(&mut self, input: SessionInput) -> SessionCommand {
        match input {
            SessionInput::Quit => {
                self.transition(SessionState::Exit);
                SessionCommand::None
            }
            SessionInput::Click { x, y } => match self.layout.hit_test(self.state, x, y) {
                Some(item) => self.choose(item),
                None => SessionCommand::None,
            },
            SessionInput::Choose(item) => self.choose(item),
            SessionInput::Steer(direction) if self.state == SessionState::Playing => {
                SessionCommand::Steer(direction)
            }
            SessionInput::Steer(_) => SessionCommand::None,
            SessionInput::TogglePause => {
                match self.state {
                    SessionState::Playing => self.transition(SessionState::Paused),
                    SessionState::Paused => self.transition(SessionState::Playing),
                    _ => {}
                }
                SessionCommand::None
            }
        }
    }

    /// The engine reported a collision
    pub fn on_game_over(&mut self) {
        if self.state == SessionState::Playing {
            self.transition(SessionState::GameOver);
        }
    }

    fn choose(&mut self, item: MenuItem) -> SessionCommand {
        match (self.state, item) {
            (SessionState::Menu, MenuItem::LevelSelect) => {
                self.transition(SessionState::LevelMenu);
                SessionCommand::None
            }
            (SessionState::LevelMenu, MenuItem::Level(level)) => {
                self.level = level;
                self.transition(SessionState::Playing);
                SessionCommand::StartRound(level)
            }
            (SessionState::GameOver, MenuItem::Restart) => {
                self.transition(SessionState::Playing);
                SessionCommand::StartRound(self.level)
            }
            (SessionState::LevelMenu | SessionState::GameOver, MenuItem::MainMenu) => {
                self.transition(SessionState::Menu);
                SessionCommand::None
            }
            (SessionState::Menu | SessionState::GameOver, MenuItem::Quit) => {
                self.transition(SessionState::Exit);
                SessionCommand::None
            }
            _ => SessionCommand::None,
        }
    }

    fn transition(&mut self, to: SessionState) {
        debug!(from = ?self.state, to = ?to, "Session transition");
        self.state = to;
    }
}
