//! Terminal presentation: board and menu drawing, click mapping, sound cues

pub mod chime;
pub mod renderer;

pub use chime::Chime;
pub use renderer::{BoardGeometry, Renderer};
