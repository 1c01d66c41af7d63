use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, GameState, Grid, Rules};
use crate::metrics::GameMetrics;
use crate::session::{MenuEntry, Session, SessionState};

/// Terminal columns used to draw one grid cell
const COLUMNS_PER_CELL: i32 = 2;

/// Where the board landed on the terminal and how it maps to screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    inner: Rect,
    cell_size: i32,
}

impl BoardGeometry {
    pub fn new(inner: Rect, cell_size: i32) -> Self {
        Self {
            inner,
            cell_size: cell_size.max(COLUMNS_PER_CELL),
        }
    }

    /// Screen pixels covered by one terminal column
    fn char_width(&self) -> i32 {
        (self.cell_size / COLUMNS_PER_CELL).max(1)
    }

    /// Screen pixel under a terminal cell, or None outside the board
    pub fn screen_point(&self, column: u16, row: u16) -> Option<(i32, i32)> {
        if column < self.inner.x
            || row < self.inner.y
            || column >= self.inner.x + self.inner.width
            || row >= self.inner.y + self.inner.height
        {
            return None;
        }

        let char_width = self.char_width();
        let x = i32::from(column - self.inner.x) * char_width + char_width / 2;
        let y = i32::from(row - self.inner.y) * self.cell_size + self.cell_size / 2;
        Some((x, y))
    }

    /// Board line whose centre pixel lies at or below `top`
    fn line_at_or_below(&self, top: i32) -> usize {
        let half = self.cell_size / 2;
        (top - half + self.cell_size - 1).div_euclid(self.cell_size).max(0) as usize
    }

    /// Board line and character offset where a menu label is drawn, centred
    /// on its click region
    pub fn label_origin(&self, entry: &MenuEntry) -> (usize, usize) {
        let char_width = self.char_width();
        let centre = (entry.region.left + entry.region.right) / 2;
        let label_chars = entry.item.label().chars().count() as i32;
        let column = (centre / char_width - label_chars / 2).max(0) as usize;
        (self.line_at_or_below(entry.region.top), column)
    }

    /// Board line for text drawn at a pixel height
    fn text_line(&self, y: i32) -> usize {
        self.line_at_or_below(y)
    }

    /// Character offset that centres `text` on the board
    fn centred_column(&self, text: &str) -> usize {
        let width = self.inner.width as usize;
        width.saturating_sub(text.chars().count()) / 2
    }
}

pub struct Renderer {
    geometry: Option<BoardGeometry>,
}

impl Renderer {
    pub fn new() -> Self {
        Self { geometry: None }
    }

    /// Board placement from the last frame
    pub fn geometry(&self) -> Option<BoardGeometry> {
        self.geometry
    }

    /// Translate a terminal click into screen pixels
    pub fn screen_point(&self, column: u16, row: u16) -> Option<(i32, i32)> {
        self.geometry?.screen_point(column, row)
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        session: &Session,
        state: &GameState,
        metrics: &GameMetrics,
        rules: Rules,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Render header with basic stats
        let stats = self.render_stats(state, metrics, rules);
        frame.render_widget(stats, chunks[0]);

        let board_area = board_rect(chunks[1], &state.grid);
        let geometry = BoardGeometry::new(
            board_area.inner(Margin {
                horizontal: 1,
                vertical: 1,
            }),
            state.grid.cell_size(),
        );
        self.geometry = Some(geometry);

        let board = match session.state() {
            SessionState::Playing | SessionState::Paused => self.render_grid(session, state),
            SessionState::Menu | SessionState::LevelMenu | SessionState::GameOver => {
                self.render_menu(&geometry, session, state)
            }
            SessionState::Exit => Paragraph::new(""),
        };
        frame.render_widget(board, board_area);

        // Render footer with controls
        let controls = self.render_controls(session.state());
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, session: &Session, state: &GameState) -> Paragraph<'_> {
        let grid = &state.grid;
        let mut lines = Vec::with_capacity(grid.rows() as usize);

        for row in 0..grid.rows() {
            let mut spans = Vec::with_capacity(grid.columns() as usize);

            for col in 0..grid.columns() {
                let cell = Cell::new(col, row);

                let span = if cell == state.snake.head() {
                    // Snake head - distinct color
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.occupies(cell) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if state.food.is_at(cell) && state.food.bonus {
                    Span::styled(
                        "$ ",
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.food.is_at(cell) {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else if state.is_obstacle(cell) {
                    Span::styled("▓▓", Style::default().fg(Color::Gray))
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        let title = if session.state() == SessionState::Paused {
            " Snake (paused) "
        } else {
            " Snake "
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(title),
        )
    }

    fn render_menu(
        &self,
        geometry: &BoardGeometry,
        session: &Session,
        state: &GameState,
    ) -> Paragraph<'_> {
        let text_style = Style::default().fg(Color::LightYellow);
        let title_style = text_style.add_modifier(Modifier::BOLD);
        let centre_y = state.grid.rows() * state.grid.cell_size() / 2;

        // (line, column, text, style)
        let mut items: Vec<(usize, usize, String, Style)> = Vec::new();

        let title = match session.state() {
            SessionState::Menu => "Snake Game",
            SessionState::LevelMenu => "Select Level",
            _ => "Game Over",
        };
        items.push((
            geometry.text_line(centre_y - 100),
            geometry.centred_column(title),
            title.to_string(),
            title_style,
        ));

        if session.state() == SessionState::GameOver {
            let score = format!("Final Score: {}", state.score);
            items.push((
                geometry.text_line(centre_y - 50),
                geometry.centred_column(&score),
                score,
                text_style,
            ));
        }

        for entry in session.layout().entries(session.state()) {
            let (line, column) = geometry.label_origin(&entry);
            items.push((line, column, entry.item.label().to_string(), text_style));
        }

        let rows = state.grid.rows() as usize;
        let mut lines: Vec<Line> = vec![Line::from(""); rows];
        for (line, column, text, style) in items {
            if line < rows {
                lines[line] = Line::from(vec![
                    Span::raw(" ".repeat(column)),
                    Span::styled(text, style),
                ]);
            }
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White)),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics, rules: Rules) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let mut spans = vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
        ];
        if rules == Rules::Arcade {
            spans.push(Span::raw("    "));
            spans.push(Span::styled("Level: ", label));
            spans.push(Span::styled(state.level.number().to_string(), value));
        }
        spans.extend([
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ]);

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_controls(&self, state: SessionState) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let quit = Style::default().fg(Color::Red);

        let spans = match state {
            SessionState::Playing | SessionState::Paused => vec![
                Span::styled("↑↓←→", key),
                Span::raw(" or "),
                Span::styled("WASD", key),
                Span::raw(" to move | "),
                Span::styled("P", key),
                Span::raw(" to pause | "),
                Span::styled("Q", quit),
                Span::raw(" to quit"),
            ],
            SessionState::Menu => vec![
                Span::raw("Click an item or press "),
                Span::styled("Enter", key),
                Span::raw(" | "),
                Span::styled("Q", quit),
                Span::raw(" to quit"),
            ],
            SessionState::LevelMenu => vec![
                Span::raw("Click a level or press "),
                Span::styled("1", key),
                Span::raw("/"),
                Span::styled("2", key),
                Span::raw(" | "),
                Span::styled("M", key),
                Span::raw(" for main menu"),
            ],
            SessionState::GameOver => vec![
                Span::styled("R", key),
                Span::raw(" to restart | "),
                Span::styled("M", key),
                Span::raw(" for main menu | "),
                Span::styled("Q", quit),
                Span::raw(" to quit"),
            ],
            SessionState::Exit => Vec::new(),
        };

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Board rectangle including its border, centred horizontally in `area`
fn board_rect(area: Rect, grid: &Grid) -> Rect {
    let width = (grid.columns() * COLUMNS_PER_CELL + 2) as u16;
    let height = (grid.rows() + 2) as u16;
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine, Level, MIN_CELL_SIZE};
    use crate::session::MenuLayout;
    use ratatui::{Terminal, backend::TestBackend};

    fn geometry() -> BoardGeometry {
        BoardGeometry::new(Rect::new(5, 4, 80, 30), 20)
    }

    #[test]
    fn test_screen_point_mapping() {
        let geometry = geometry();
        assert_eq!(geometry.screen_point(5, 4), Some((5, 10)));
        assert_eq!(geometry.screen_point(45, 19), Some((405, 310)));
        assert_eq!(geometry.screen_point(4, 4), None);
        assert_eq!(geometry.screen_point(85, 4), None);
        assert_eq!(geometry.screen_point(5, 34), None);
    }

    #[test]
    fn test_drawn_labels_are_clickable() {
        let geometry = geometry();
        let layout = MenuLayout::new(800, 600);

        for state in [
            SessionState::Menu,
            SessionState::LevelMenu,
            SessionState::GameOver,
        ] {
            for entry in layout.entries(state) {
                let (line, column) = geometry.label_origin(&entry);
                let chars = entry.item.label().chars().count();
                for offset in 0..chars {
                    let term_col = 5 + (column + offset) as u16;
                    let term_row = 4 + line as u16;
                    let (x, y) = geometry.screen_point(term_col, term_row).unwrap();
                    assert_eq!(
                        layout.hit_test(state, x, y),
                        Some(entry.item),
                        "{:?} char {} at ({}, {})",
                        entry.item,
                        offset,
                        x,
                        y
                    );
                }
            }
        }
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_render_game_over_screen() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 5).unwrap();
        let mut state = engine.reset(Level::One).unwrap();
        state.score = 7;
        let mut session = Session::playing(MenuLayout::new(800, 600), Level::One);
        session.on_game_over();

        let mut renderer = Renderer::new();
        let mut terminal = Terminal::new(TestBackend::new(90, 40)).unwrap();
        terminal
            .draw(|frame| {
                renderer.render(frame, &session, &state, &GameMetrics::new(), Rules::Arcade)
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Game Over"));
        assert!(text.contains("Final Score: 7"));
        assert!(text.contains("Restart"));
        assert!(renderer.geometry().is_some());
    }

    /// Terminal position of the first character of `text`
    fn find_text(terminal: &Terminal<TestBackend>, text: &str) -> Option<(u16, u16)> {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let chars: Vec<String> = text.chars().map(String::from).collect();
        let len = chars.len() as u16;

        (area.y..area.y + area.height).find_map(|row| {
            (area.x..=(area.x + area.width).saturating_sub(len))
                .find(|&col| {
                    chars
                        .iter()
                        .enumerate()
                        .all(|(k, ch)| buffer[(col + k as u16, row)].symbol() == ch.as_str())
                })
                .map(|col| (col, row))
        })
    }

    #[test]
    fn test_click_on_rendered_level_selection() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 5).unwrap();
        let state = engine.reset(Level::One).unwrap();
        let session = Session::new(MenuLayout::new(800, 600));

        let mut renderer = Renderer::new();
        let mut terminal = Terminal::new(TestBackend::new(90, 40)).unwrap();
        terminal
            .draw(|frame| {
                renderer.render(frame, &session, &state, &GameMetrics::new(), Rules::Arcade)
            })
            .unwrap();

        let (column, row) = find_text(&terminal, "Level Selection").expect("label drawn");
        let (x, y) = renderer.screen_point(column + 3, row).unwrap();

        assert_eq!(
            session.layout().hit_test(SessionState::Menu, x, y),
            Some(crate::session::MenuItem::LevelSelect)
        );
    }

    #[test]
    fn test_render_playing_board() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 5).unwrap();
        let state = engine.reset(Level::One).unwrap();
        let session = Session::playing(MenuLayout::new(200, 200), Level::One);

        let mut renderer = Renderer::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|frame| {
                renderer.render(frame, &session, &state, &GameMetrics::new(), Rules::Arcade)
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("■"));
        assert!(text.contains("□"));
        assert!(text.contains("Score: 0"));
    }

    #[test]
    fn test_render_menu_at_smallest_cell_size() {
        let config = GameConfig {
            cell_size: MIN_CELL_SIZE,
            screen_width: 80,
            screen_height: 30,
            ..Default::default()
        };
        let layout = MenuLayout::new(config.screen_width, config.screen_height);
        let mut engine = GameEngine::with_seed(config, 5).unwrap();
        let state = engine.reset(Level::One).unwrap();

        let mut renderer = Renderer::new();
        let mut terminal = Terminal::new(TestBackend::new(200, 50)).unwrap();
        for session in [Session::new(layout), {
            let mut over = Session::playing(layout, Level::One);
            over.on_game_over();
            over
        }] {
            terminal
                .draw(|frame| {
                    renderer.render(frame, &session, &state, &GameMetrics::new(), Rules::Arcade)
                })
                .unwrap();
        }

        let geometry = renderer.geometry().unwrap();
        let inner = geometry.inner;
        assert!(geometry.screen_point(inner.x, inner.y).is_some());
    }

    #[test]
    fn test_geometry_never_has_zero_width_columns() {
        let geometry = BoardGeometry::new(Rect::new(0, 0, 10, 10), 1);
        assert_eq!(geometry.screen_point(3, 2), Some((3, 5)));
    }
}
