//! Session state machine: menus, level choice, pause and game over
//!
//! Only the arcade rules use the menus; the classic mode starts a session
//! already playing.

pub mod machine;
pub mod menu;

pub use machine::{Session, SessionCommand, SessionInput, SessionState};
pub use menu::{HitRegion, MenuEntry, MenuItem, MenuLayout};
