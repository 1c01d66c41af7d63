pub mod app;
pub mod arcade;
pub mod classic;
pub mod terminal;

pub use app::GameApp;
pub use arcade::ArcadeMode;
pub use classic::ClassicMode;
