//! Arcade mode: main menu, level selection, bonus food and obstacles

use anyhow::Result;
use tracing::info;

use crate::game::{GameConfig, GameEngine};
use crate::session::{MenuLayout, Session};

use super::app::GameApp;

pub struct ArcadeMode {
    app: GameApp,
}

impl ArcadeMode {
    pub fn new(engine: GameEngine) -> Result<Self> {
        let config: &GameConfig = engine.config();
        let layout = MenuLayout::new(config.screen_width, config.screen_height);
        let app = GameApp::new(engine, Session::new(layout), false)?;
        Ok(Self { app })
    }

    pub async fn run(&mut self) -> Result<()> {
        info!("Arcade mode started");
        self.app.run().await?;
        info!(
            games = self.app.metrics().games_played,
            high_score = self.app.metrics().high_score,
            "Arcade mode finished"
        );
        Ok(())
    }
}
