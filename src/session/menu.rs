//! Menu items and the screen regions that select them
//!
//! Regions are given in screen pixels relative to the screen centre and are
//! inclusive on all sides. When regions overlap the first entry wins.

use crate::game::Level;

use super::machine::SessionState;

/// An item that can be picked from one of the menu screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    LevelSelect,
    Level(Level),
    MainMenu,
    Restart,
    Quit,
}

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::LevelSelect => "Level Selection",
            MenuItem::Level(Level::One) => "1. Level 1",
            MenuItem::Level(Level::Two) => "2. Level 2",
            MenuItem::MainMenu => "Main Menu",
            MenuItem::Restart => "Restart",
            MenuItem::Quit => "Quit",
        }
    }
}

/// Rectangular click target in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRegion {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl HitRegion {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// A menu item and where it sits on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub item: MenuItem,
    pub region: HitRegion,
}

/// Menu layout for a screen of the given pixel size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuLayout {
    centre_x: i32,
    centre_y: i32,
}

impl MenuLayout {
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            centre_x: (screen_width / 2) as i32,
            centre_y: (screen_height / 2) as i32,
        }
    }

    /// Clickable entries of a session state, in hit-test order
    pub fn entries(&self, state: SessionState) -> Vec<MenuEntry> {
        let rows: &[(MenuItem, [i32; 4])] = match state {
            SessionState::Menu => &[
                (MenuItem::LevelSelect, [-100, 20, 100, 60]),
                (MenuItem::Quit, [-100, 100, 100, 140]),
            ],
            SessionState::LevelMenu => &[
                (MenuItem::Level(Level::One), [-150, -50, 150, 0]),
                (MenuItem::Level(Level::Two), [-100, 10, 150, 60]),
                (MenuItem::MainMenu, [-100, 100, 150, 180]),
            ],
            SessionState::GameOver => &[
                (MenuItem::Restart, [-60, 0, 120, 50]),
                (MenuItem::Quit, [-50, 60, 100, 90]),
                (MenuItem::MainMenu, [-100, 100, 150, 180]),
            ],
            SessionState::Playing | SessionState::Paused | SessionState::Exit => &[],
        };

        rows.iter()
            .map(|&(item, [left, top, right, bottom])| MenuEntry {
                item,
                region: HitRegion {
                    left: self.centre_x + left,
                    top: self.centre_y + top,
                    right: self.centre_x + right,
                    bottom: self.centre_y + bottom,
                },
            })
            .collect()
    }

    /// The item under a click, if any
    pub fn hit_test(&self, state: SessionState, x: i32, y: i32) -> Option<MenuItem> {
        self.entries(state)
            .into_iter()
            .find(|entry| entry.region.contains(x, y))
            .map(|entry| entry.item)
    }
}
