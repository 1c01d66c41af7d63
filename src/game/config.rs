use serde::{Deserialize, Serialize};

use super::error::{GameError, GameResult};

/// Smallest cell edge; the terminal draws each cell two characters wide
pub const MIN_CELL_SIZE: u32 = 2;
/// Largest screen width or height in pixels
pub const MAX_SCREEN_SIDE: u32 = 16_384;

/// Which rule set the engine applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rules {
    /// Menu-driven game with levels, random obstacles and bonus food
    #[default]
    Arcade,
    /// Border wall, regular food only, the first collision ends the program
    Classic,
}

/// Difficulty level chosen from the level menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Level {
    #[default]
    One,
    Two,
}

impl Level {
    pub fn number(&self) -> u8 {
        match self {
            Level::One => 1,
            Level::Two => 2,
        }
    }
}

/// Configuration for the game
///
/// Every field has a default, so a YAML file only needs to name the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Rule set applied by the engine
    pub rules: Rules,
    /// Width of the screen in pixels
    pub screen_width: u32,
    /// Height of the screen in pixels
    pub screen_height: u32,
    /// Edge length of one grid cell in pixels
    pub cell_size: u32,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Delay between two game ticks
    pub tick_delay_ms: u64,

    // Scoring
    /// Points for regular food
    pub food_points: u32,
    /// Points for bonus food
    pub bonus_points: u32,
    /// One in `bonus_odds` eaten foods is followed by a bonus food
    pub bonus_odds: u32,

    // Obstacles
    /// Random obstacle cells on level 1
    pub level_one_obstacles: usize,
    /// Random obstacle cells on level 2
    pub level_two_obstacles: usize,
    /// Thickness in cells of the classic border wall
    pub wall_thickness: u32,

    /// Random samples tried before a placement gives up
    pub max_placement_attempts: usize,
    /// Ring the terminal bell for sound cues
    pub sound: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rules: Rules::Arcade,
            screen_width: 800,
            screen_height: 600,
            cell_size: 20,
            initial_snake_length: 3,
            tick_delay_ms: 100,
            food_points: 1,
            bonus_points: 5,
            bonus_odds: 10,
            level_one_obstacles: 0,
            level_two_obstacles: 10,
            wall_thickness: 1,
            max_placement_attempts: 10_000,
            sound: false,
        }
    }
}

impl GameConfig {
    /// Create a configuration for the given rule set with default values
    pub fn new(rules: Rules) -> Self {
        Self {
            rules,
            ..Default::default()
        }
    }

    /// Create a small screen for testing (10x10 cells)
    pub fn small() -> Self {
        Self {
            screen_width: 200,
            screen_height: 200,
            ..Default::default()
        }
    }

    pub fn columns(&self) -> u32 {
        self.screen_width / self.cell_size
    }

    pub fn rows(&self) -> u32 {
        self.screen_height / self.cell_size
    }

    /// Number of random obstacles placed for a level
    pub fn obstacles_for(&self, level: Level) -> usize {
        match level {
            Level::One => self.level_one_obstacles,
            Level::Two => self.level_two_obstacles,
        }
    }

    /// Check that the configuration describes a playable board
    pub fn validate(&self) -> GameResult<()> {
        if self.cell_size < MIN_CELL_SIZE {
            return Err(invalid(format!(
                "cell_size {} is below the minimum of {}",
                self.cell_size, MIN_CELL_SIZE
            )));
        }
        if self.screen_width > MAX_SCREEN_SIDE || self.screen_height > MAX_SCREEN_SIDE {
            return Err(invalid(format!(
                "screen {}x{} exceeds {} pixels per side",
                self.screen_width, self.screen_height, MAX_SCREEN_SIDE
            )));
        }
        if self.screen_width == 0 || self.screen_width % self.cell_size != 0 {
            return Err(invalid(format!(
                "screen_width {} is not a positive multiple of cell_size {}",
                self.screen_width, self.cell_size
            )));
        }
        if self.screen_height == 0 || self.screen_height % self.cell_size != 0 {
            return Err(invalid(format!(
                "screen_height {} is not a positive multiple of cell_size {}",
                self.screen_height, self.cell_size
            )));
        }
        if self.initial_snake_length == 0 {
            return Err(invalid("initial_snake_length must be at least 1"));
        }
        // The snake starts at the centre and extends to the left
        let room_left = (self.columns() / 2) as usize + 1;
        if self.initial_snake_length > room_left {
            return Err(invalid(format!(
                "initial_snake_length {} does not fit left of the centre ({} cells)",
                self.initial_snake_length, room_left
            )));
        }
        if self.tick_delay_ms == 0 {
            return Err(invalid("tick_delay_ms must be positive"));
        }
        if self.bonus_odds == 0 {
            return Err(invalid("bonus_odds must be at least 1"));
        }
        if self.max_placement_attempts == 0 {
            return Err(invalid("max_placement_attempts must be positive"));
        }

        if self.rules == Rules::Classic {
            let wall = self.wall_thickness;
            if wall == 0 {
                return Err(invalid("wall_thickness must be at least 1"));
            }
            let centre_col = self.columns() / 2;
            let centre_row = self.rows() / 2;
            let tail_col = centre_col + 1 - self.initial_snake_length as u32;
            if tail_col < wall
                || centre_col + 1 >= self.columns().saturating_sub(wall)
                || centre_row < wall
                || centre_row >= self.rows().saturating_sub(wall)
            {
                return Err(invalid(format!(
                    "wall_thickness {} leaves no room for the starting snake",
                    wall
                )));
            }
        }

        let cells = self.columns() as usize * self.rows() as usize;
        let blocked = match self.rules {
            Rules::Arcade => self.level_one_obstacles.max(self.level_two_obstacles),
            Rules::Classic => self.wall_cells(),
        };
        let occupied = blocked + self.initial_snake_length + 1;
        // Keep at least half of the board free so random placement stays cheap
        if occupied > cells - cells / 2 {
            return Err(invalid(format!(
                "{} blocked cells and a snake of {} leave too few free cells on a {}x{} grid",
                blocked,
                self.initial_snake_length,
                self.columns(),
                self.rows()
            )));
        }

        Ok(())
    }

    /// Cells covered by the classic border wall
    fn wall_cells(&self) -> usize {
        let columns = self.columns() as usize;
        let rows = self.rows() as usize;
        let band = 2 * self.wall_thickness as usize;
        let interior = columns.saturating_sub(band) * rows.saturating_sub(band);
        columns * rows - interior
    }
}

fn invalid(reason: impl Into<String>) -> GameError {
    GameError::InvalidConfig(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.columns(), 40);
        assert_eq!(config.rows(), 30);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.tick_delay_ms, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_obstacles_per_level() {
        let config = GameConfig::default();
        assert_eq!(config.obstacles_for(Level::One), 0);
        assert_eq!(config.obstacles_for(Level::Two), 10);
    }

    #[test]
    fn test_classic_defaults_validate() {
        assert!(GameConfig::new(Rules::Classic).validate().is_ok());
        assert!(GameConfig::small().validate().is_ok());
    }

    #[test]
    fn test_rejects_misaligned_screen() {
        let config = GameConfig {
            screen_width: 810,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_zero_bonus_odds() {
        let config = GameConfig {
            bonus_odds: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_crowded_board() {
        let config = GameConfig {
            level_two_obstacles: 600,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_wall_over_snake() {
        let config = GameConfig {
            rules: Rules::Classic,
            wall_thickness: 15,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_cell_narrower_than_two_columns() {
        let config = GameConfig {
            cell_size: 1,
            screen_width: 80,
            screen_height: 30,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfig(_))
        ));

        let smallest = GameConfig {
            cell_size: MIN_CELL_SIZE,
            screen_width: 80,
            screen_height: 30,
            ..Default::default()
        };
        assert!(smallest.validate().is_ok());
    }

    #[test]
    fn test_rejects_oversized_screen() {
        let config = GameConfig {
            screen_width: 4_000_000,
            screen_height: 4_000_000,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_classic_wall_counts_against_free_cells() {
        // 40x30 board: a 4-cell wall leaves 704 interior cells, a 5-cell one 600
        let thick = |wall_thickness| GameConfig {
            rules: Rules::Classic,
            wall_thickness,
            ..Default::default()
        };
        assert!(thick(4).validate().is_ok());
        assert!(thick(5).validate().is_err());

        // The same thickness means nothing to arcade rules
        let arcade = GameConfig {
            wall_thickness: 5,
            ..Default::default()
        };
        assert!(arcade.validate().is_ok());
    }
}
