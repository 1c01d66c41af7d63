use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};

use crate::game::{Collision, GameEngine, GameState, Level, SoundCue};
use crate::input::InputHandler;
use crate::metrics::GameMetrics;
use crate::render::{Chime, Renderer};
use crate::session::{Session, SessionCommand, SessionInput};

use super::terminal::{Tui, restore_terminal, setup_terminal};

/// Everything one run of the game owns: engine, game state, session, and the
/// presentation pieces driven by the loop
pub struct GameApp {
    engine: GameEngine,
    state: GameState,
    session: Session,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    chime: Chime,
    pending_cues: Vec<SoundCue>,
    exit_on_game_over: bool,
}

impl GameApp {
    pub fn new(mut engine: GameEngine, session: Session, exit_on_game_over: bool) -> Result<Self> {
        let state = engine
            .reset(session.level())
            .context("Failed to set up the first round")?;
        let chime = Chime::new(engine.config().sound);

        Ok(Self {
            engine,
            state,
            session,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            chime,
            pending_cues: Vec::new(),
            exit_on_game_over,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        restore_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();

        let tick_interval = Duration::from_millis(self.engine.config().tick_delay_ms);
        let mut tick_timer = interval(tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let rules = self.engine.config().rules;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick, then render
                _ = tick_timer.tick() => {
                    self.on_tick()?;

                    for cue in self.pending_cues.drain(..) {
                        if let Err(err) = self.chime.play(terminal.backend_mut(), cue) {
                            warn!(%err, "Failed to play sound cue");
                        }
                    }

                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.session, &self.state, &self.metrics, rules);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.apply_input(SessionInput::Quit)?;
                }
            }

            if self.session.should_exit() {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(input) = self.input_handler.handle_key_event(key) {
                    self.apply_input(input)?;
                }
            }
            Event::Mouse(mouse) => {
                let point = self
                    .input_handler
                    .handle_mouse_event(mouse)
                    .and_then(|(column, row)| self.renderer.screen_point(column, row));
                if let Some((x, y)) = point {
                    self.apply_input(SessionInput::Click { x, y })?;
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Feed one input to the session and carry out the resulting command
    pub fn apply_input(&mut self, input: SessionInput) -> Result<()> {
        match self.session.handle(input) {
            SessionCommand::StartRound(level) => self.start_round(level)?,
            SessionCommand::Steer(direction) => {
                self.state.steer(direction);
            }
            SessionCommand::None => {}
        }

        Ok(())
    }

    /// One loop iteration's worth of game logic; does nothing unless playing
    pub fn on_tick(&mut self) -> Result<()> {
        if !self.session.is_playing() {
            return Ok(());
        }

        let outcome = self
            .engine
            .tick(&mut self.state)
            .context("Game tick failed")?;
        self.metrics
            .on_tick(Duration::from_millis(self.engine.config().tick_delay_ms));
        self.pending_cues.extend(outcome.cues);

        if outcome.terminated {
            self.metrics.on_game_over(self.state.score);
            self.session.on_game_over();
            if self.exit_on_game_over {
                self.session.handle(SessionInput::Quit);
            }
        }

        Ok(())
    }

    fn start_round(&mut self, level: Level) -> Result<()> {
        self.state = self
            .engine
            .reset(level)
            .context("Failed to reset the game")?;
        self.metrics.on_round_start();
        self.pending_cues.clear();
        info!(level = level.number(), "Round started");
        Ok(())
    }

    /// Score and cause of the last finished round, if it has ended
    pub fn final_result(&self) -> Option<(u32, Collision)> {
        self.state.collision.map(|collision| (self.state.score, collision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction, Food, GameConfig, Rules, Snake};
    use crate::session::{MenuItem, MenuLayout, SessionState};

    fn arcade_app() -> GameApp {
        let config = GameConfig::default();
        let layout = MenuLayout::new(config.screen_width, config.screen_height);
        let engine = GameEngine::with_seed(config, 9).unwrap();
        GameApp::new(engine, Session::new(layout), false).unwrap()
    }

    fn start_level(app: &mut GameApp, level: Level) {
        app.apply_input(SessionInput::Choose(MenuItem::LevelSelect))
            .unwrap();
        app.apply_input(SessionInput::Choose(MenuItem::Level(level)))
            .unwrap();
    }

    #[test]
    fn test_app_initialization() {
        let app = arcade_app();
        assert_eq!(app.session().state(), SessionState::Menu);
        assert!(app.state().is_alive);
        assert_eq!(app.state().score, 0);
    }

    #[test]
    fn test_no_ticks_on_menu() {
        let mut app = arcade_app();
        let head = app.state().snake.head();
        app.on_tick().unwrap();
        assert_eq!(app.state().snake.head(), head);
        assert_eq!(app.state().steps, 0);
    }

    #[test]
    fn test_level_two_round_has_obstacles() {
        let mut app = arcade_app();
        start_level(&mut app, Level::Two);

        assert!(app.session().is_playing());
        assert_eq!(app.state().level, Level::Two);
        assert_eq!(app.state().obstacles.len(), 10);
    }

    #[test]
    fn test_pause_freezes_ticks() {
        let mut app = arcade_app();
        start_level(&mut app, Level::One);
        app.state.food = Food::regular(Cell::new(0, 0));

        app.on_tick().unwrap();
        assert_eq!(app.state().steps, 1);

        app.apply_input(SessionInput::TogglePause).unwrap();
        app.on_tick().unwrap();
        assert_eq!(app.state().steps, 1);

        app.apply_input(SessionInput::TogglePause).unwrap();
        app.on_tick().unwrap();
        assert_eq!(app.state().steps, 2);
    }

    #[test]
    fn test_steering_reaches_game_state() {
        let mut app = arcade_app();
        start_level(&mut app, Level::One);
        app.state.food = Food::regular(Cell::new(0, 0));

        app.apply_input(SessionInput::Steer(Direction::Up)).unwrap();
        app.on_tick().unwrap();

        assert_eq!(app.state().direction, Direction::Up);
        assert_eq!(app.state().snake.head(), Cell::new(20, 14));
    }

    #[test]
    fn test_collision_moves_to_game_over_and_restart_resets() {
        let mut app = arcade_app();
        start_level(&mut app, Level::One);
        app.state.snake = Snake::new(Cell::new(39, 15), Direction::Right, 3);
        app.state.score = 4;

        app.on_tick().unwrap();
        assert_eq!(app.session().state(), SessionState::GameOver);
        assert_eq!(app.metrics().high_score, 4);
        assert_eq!(app.final_result(), Some((4, Collision::Wall)));
        assert_eq!(app.pending_cues, vec![SoundCue::GameOver]);

        app.apply_input(SessionInput::Choose(MenuItem::Restart))
            .unwrap();
        assert!(app.session().is_playing());
        assert_eq!(app.state().score, 0);
        assert!(app.state().is_alive);
        assert!(app.pending_cues.is_empty());
    }

    #[test]
    fn test_classic_exits_on_collision() {
        let config = GameConfig::new(Rules::Classic);
        let layout = MenuLayout::new(config.screen_width, config.screen_height);
        let engine = GameEngine::with_seed(config, 9).unwrap();
        let mut app = GameApp::new(engine, Session::playing(layout, Level::One), true).unwrap();
        app.state.snake = Snake::new(Cell::new(38, 15), Direction::Right, 3);

        app.on_tick().unwrap();

        assert!(app.session().should_exit());
        assert_eq!(app.final_result().map(|(_, c)| c), Some(Collision::Obstacle));
    }
}
