use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use super::{
    config::{GameConfig, Level, Rules},
    direction::Direction,
    entity::{Food, Obstacle},
    error::GameResult,
    grid::{Cell, Grid},
    placement::{self, Exclusions},
    snake::Snake,
    state::{Collision, GameState},
};

/// Cue for the presentation layer to play a sound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Eat,
    BonusEat,
    BonusAppeared,
    GameOver,
}

/// Result of a game tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Food eaten this tick
    pub eaten: Option<Food>,
    /// Type of collision if one occurred
    pub collision: Option<Collision>,
    /// Sounds the presentation layer should play
    pub cues: Vec<SoundCue>,
}

/// The game engine that applies the rules to a [`GameState`]
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine seeded from system entropy
    pub fn new(config: GameConfig) -> GameResult<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine with a deterministic random sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> GameResult<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> GameResult<Self> {
        config.validate()?;
        let grid = Grid::from_config(&config);

        Ok(Self { config, grid, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Start a fresh session on the given level
    pub fn reset(&mut self, level: Level) -> GameResult<GameState> {
        let snake = Snake::new(
            self.grid.centre(),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let obstacles = match self.config.rules {
            Rules::Arcade => placement::random_obstacles(
                &self.grid,
                &mut self.rng,
                &snake,
                self.config.obstacles_for(level),
                self.config.max_placement_attempts,
            )?,
            Rules::Classic => placement::border_walls(&self.grid, self.config.wall_thickness),
        };

        let food = Food::regular(self.place(&snake, &obstacles)?);

        info!(
            level = level.number(),
            obstacles = obstacles.len(),
            "Session reset"
        );

        let mut state = GameState::new(self.grid, snake, Direction::Right, food, obstacles);
        state.level = level;
        Ok(state)
    }

    /// Execute one tick of the game
    pub fn tick(&mut self, state: &mut GameState) -> GameResult<TickOutcome> {
        if !state.is_alive {
            return Ok(TickOutcome {
                terminated: true,
                ..Default::default()
            });
        }

        if let Some(direction) = state.pending_direction.take() {
            state.direction = direction;
        }

        let new_head = state.snake.step(state.direction);
        state.steps += 1;

        if let Some(collision) = self.check_collision(state, new_head) {
            return Ok(Self::game_over(state, collision));
        }

        let ate_food = state.food.is_at(new_head);
        state.snake.advance(new_head, ate_food);

        let mut outcome = TickOutcome::default();

        if ate_food {
            let eaten = state.food;
            let points = self.points_for(&eaten);
            state.score += points;
            outcome.eaten = Some(eaten);
            outcome.cues.push(if eaten.bonus {
                SoundCue::BonusEat
            } else {
                SoundCue::Eat
            });
            debug!(points, score = state.score, length = state.snake.len(), "Food eaten");

            let bonus = self.roll_bonus();
            let cell = self.place(&state.snake, &state.obstacles)?;
            state.food = if bonus {
                debug!(?cell, "Bonus food appeared");
                outcome.cues.push(SoundCue::BonusAppeared);
                Food::bonus(cell)
            } else {
                Food::regular(cell)
            };
        }

        if self.config.rules == Rules::Arcade && state.is_obstacle(state.snake.head()) {
            let mut over = Self::game_over(state, Collision::Obstacle);
            over.eaten = outcome.eaten;
            let mut cues = outcome.cues;
            cues.append(&mut over.cues);
            over.cues = cues;
            return Ok(over);
        }

        Ok(outcome)
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, cell: Cell) -> Option<Collision> {
        if !state.is_in_bounds(cell) {
            return Some(Collision::Wall);
        }

        if state.is_obstacle(cell) {
            return Some(Collision::Obstacle);
        }

        let hits_self = match self.config.rules {
            Rules::Arcade => state.snake.occupies(cell),
            Rules::Classic => state.snake.occupies_body(cell),
        };
        if hits_self {
            return Some(Collision::SelfCollision);
        }

        None
    }

    fn game_over(state: &mut GameState, collision: Collision) -> TickOutcome {
        state.is_alive = false;
        state.collision = Some(collision);
        info!(?collision, score = state.score, steps = state.steps, "Game over");

        TickOutcome {
            terminated: true,
            eaten: None,
            collision: Some(collision),
            cues: vec![SoundCue::GameOver],
        }
    }

    fn points_for(&self, food: &Food) -> u32 {
        if food.bonus {
            self.config.bonus_points
        } else {
            self.config.food_points
        }
    }

    /// Classic rules never produce bonus food
    fn roll_bonus(&mut self) -> bool {
        match self.config.rules {
            Rules::Arcade => self.rng.gen_ratio(1, self.config.bonus_odds),
            Rules::Classic => false,
        }
    }

    fn place(&mut self, snake: &Snake, obstacles: &[Obstacle]) -> GameResult<Cell> {
        placement::place_entity(
            &self.grid,
            &mut self.rng,
            &Exclusions::new(snake, obstacles),
            self.config.max_placement_attempts,
        )
    }
}
