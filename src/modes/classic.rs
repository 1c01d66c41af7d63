//! Classic mode: straight into play inside a border wall; the first
//! collision ends the program

use anyhow::Result;
use tracing::info;

use crate::game::{GameEngine, Level};
use crate::session::{MenuLayout, Session};

use super::app::GameApp;

pub struct ClassicMode {
    app: GameApp,
}

impl ClassicMode {
    pub fn new(engine: GameEngine) -> Result<Self> {
        let config = engine.config();
        let layout = MenuLayout::new(config.screen_width, config.screen_height);
        let app = GameApp::new(engine, Session::playing(layout, Level::One), true)?;
        Ok(Self { app })
    }

    pub async fn run(&mut self) -> Result<()> {
        info!("Classic mode started");
        self.app.run().await?;

        match self.app.final_result() {
            Some((score, collision)) => {
                info!(score, ?collision, "Classic mode finished");
                println!("Game over ({:?}), final score: {}", collision, score);
            }
            None => println!("Final score: {}", self.app.state().score),
        }
        Ok(())
    }
}
