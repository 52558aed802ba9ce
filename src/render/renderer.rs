use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GameConfig, GameState, Phase, Position};
use crate::metrics::SessionMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        config: &GameConfig,
        metrics: &SessionMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // HUD
                Constraint::Min(0),    // Board or overlay
                Constraint::Length(1), // Controls
            ])
            .split(frame.area());

        frame.render_widget(self.render_hud(state, config, metrics), chunks[0]);

        let board = match state.phase {
            Phase::Playing => self.render_grid(state),
            Phase::LevelComplete => self.render_level_complete(state),
            Phase::GameOver => self.render_game_over(state, metrics),
        };
        frame.render_widget(board, chunks[1]);

        frame.render_widget(self.render_controls(state.phase), chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let head = state.snake.head();
        let mut lines = Vec::with_capacity(state.grid_height);

        for y in 0..state.grid_height {
            let mut spans = Vec::with_capacity(state.grid_width);

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.contains(pos) {
                    Span::styled("□ ", Style::default().fg(Color::LightYellow))
                } else if state.apple == Some(pos) {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled("· ", Style::default().fg(Color::Green))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Thick)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Hungry Snakes "),
            )
            .alignment(Alignment::Center)
    }

    fn render_hud(
        &self,
        state: &GameState,
        config: &GameConfig,
        metrics: &SessionMetrics,
    ) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let progress = match config.level_threshold(state.run.level) {
            Some(needed) => format!("{}/{}", state.run.apples_in_level, needed),
            None => format!("{}/∞", state.run.apples_in_level),
        };

        let text = vec![
            Line::from(vec![
                Span::styled("Score: ", label),
                Span::styled(state.run.score.to_string(), value),
                Span::raw("    "),
                Span::styled("Level: ", label),
                Span::styled(state.run.level_number().to_string(), value),
                Span::raw("    "),
                Span::styled("Lives: ", label),
                Span::styled(hearts(state.run.lives), Style::default().fg(Color::Red)),
            ]),
            Line::from(vec![
                Span::styled("Apples: ", label),
                Span::styled(progress, Style::default().fg(Color::White)),
                Span::raw("    "),
                Span::styled("Time: ", label),
                Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
                Span::raw("    "),
                Span::styled("Best: ", label),
                Span::styled(
                    metrics.best_score.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_level_complete(&self, state: &GameState) -> Paragraph<'_> {
        let gold = Style::default()
            .fg(Color::Rgb(255, 215, 0))
            .add_modifier(Modifier::BOLD);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled("★  YAY!  ★", gold)),
            Line::from(""),
            Line::from(Span::styled(
                format!("You Completed Level {}!", state.run.level),
                Style::default().fg(Color::White),
            )),
            Line::from(Span::styled(
                format!("Now entering Level {}", state.run.level_number()),
                Style::default().fg(Color::LightBlue),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key to continue",
                Style::default().fg(Color::LightGreen),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(gold),
        )
    }

    fn render_game_over(&self, state: &GameState, metrics: &SessionMetrics) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER!",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.run.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            if metrics.is_new_best() {
                Line::from(Span::styled(
                    "New best this session!",
                    Style::default()
                        .fg(Color::Rgb(255, 215, 0))
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled("Best this session: ", Style::default().fg(Color::Yellow)),
                    Span::styled(
                        metrics.best_score.to_string(),
                        Style::default().fg(Color::White),
                    ),
                ])
            },
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "SPACE",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'_> {
        let hint = match phase {
            Phase::Playing => vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
            ],
            Phase::LevelComplete => vec![Span::raw("any key to continue | ")],
            Phase::GameOver => vec![
                Span::styled("SPACE", Style::default().fg(Color::Green)),
                Span::raw(" to restart | "),
            ],
        };

        let mut spans = hint;
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" to quit"));

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// One heart per remaining life
pub fn hearts(lives: u32) -> String {
    "♥ ".repeat(lives as usize).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameEngine;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(state: &GameState, config: &GameConfig) -> String {
        draw_with(state, config, &mut SessionMetrics::new())
    }

    fn draw_with(state: &GameState, config: &GameConfig, metrics: &mut SessionMetrics) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        metrics.observe(state);
        let metrics = &*metrics;
        terminal
            .draw(|frame| Renderer::new().render(frame, state, config, metrics))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_hearts() {
        assert_eq!(hearts(3), "♥ ♥ ♥");
        assert_eq!(hearts(1), "♥");
        assert_eq!(hearts(0), "");
    }

    #[test]
    fn test_playing_screen_shows_board_and_hud() {
        let config = GameConfig::small();
        let mut engine = GameEngine::seeded(config.clone(), 3);
        let state = engine.new_game();

        let screen = draw(&state, &config);

        assert!(screen.contains("Score: 0"));
        assert!(screen.contains("Level: 1"));
        assert!(screen.contains("♥ ♥ ♥"));
        assert!(screen.contains("Apples: 0/5"));
        assert!(screen.contains("Hungry Snakes"));
        assert!(screen.contains('■'));
        assert!(screen.contains('●'));
    }

    #[test]
    fn test_level_complete_screen() {
        let config = GameConfig::small();
        let mut engine = GameEngine::seeded(config.clone(), 3);
        let mut state = engine.new_game();
        state.run.level = 1;
        state.phase = Phase::LevelComplete;

        let screen = draw(&state, &config);

        assert!(screen.contains("You Completed Level 1!"));
        assert!(screen.contains("Now entering Level 2"));
        assert!(screen.contains("Press any key to continue"));
    }

    #[test]
    fn test_final_level_progress_is_unbounded() {
        let config = GameConfig::small();
        let mut engine = GameEngine::seeded(config.clone(), 3);
        let mut state = engine.new_game();
        state.run.level = config.last_level();
        state.run.apples_in_level = 7;

        assert!(draw(&state, &config).contains("Apples: 7/∞"));
    }

    #[test]
    fn test_game_over_screen() {
        let config = GameConfig::small();
        let mut engine = GameEngine::seeded(config.clone(), 3);
        let mut state = engine.new_game();
        state.run.score = 42;
        state.run.lives = 0;
        state.phase = Phase::GameOver;

        let screen = draw(&state, &config);

        assert!(screen.contains("GAME OVER!"));
        assert!(screen.contains("Final Score: 42"));
        assert!(screen.contains("New best this session!"));
        assert!(screen.contains("to play again"));
    }

    #[test]
    fn test_game_over_below_record_shows_best() {
        let config = GameConfig::small();
        let mut engine = GameEngine::seeded(config.clone(), 3);
        let mut metrics = SessionMetrics::new();

        let mut state = engine.new_game();
        state.run.score = 30;
        metrics.observe(&state);
        metrics.on_run_start();

        state.run.score = 12;
        state.run.lives = 0;
        state.phase = Phase::GameOver;
        let screen = draw_with(&state, &config, &mut metrics);

        assert!(screen.contains("Best: 30"));
        assert!(screen.contains("Best this session: 30"));
        assert!(!screen.contains("New best"));
    }
}
