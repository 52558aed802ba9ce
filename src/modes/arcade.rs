use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::collections::VecDeque;
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, interval, interval_at};

use crate::audio::{SoundBoard, SoundEffect};
use crate::game::{Action, Direction, GameConfig, GameEngine, GameState, Phase, TickEvent};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionMetrics;
use crate::render::Renderer;

/// Redraw rate, independent of the level's tick rate
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Turns buffered between ticks, so a quick double turn is not lost
const MAX_PENDING_TURNS: usize = 2;

pub struct ArcadeMode {
    engine: GameEngine,
    state: GameState,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    sounds: SoundBoard,
    should_quit: bool,
    pending_turns: VecDeque<Direction>,
}

impl ArcadeMode {
    pub fn new(config: GameConfig, seed: Option<u64>, sounds: SoundBoard) -> Self {
        let mut engine = match seed {
            Some(seed) => GameEngine::seeded(config, seed),
            None => GameEngine::new(config),
        };
        let state = engine.new_game();

        Self {
            engine,
            state,
            metrics: SessionMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            sounds,
            should_quit: false,
            pending_turns: VecDeque::with_capacity(MAX_PENDING_TURNS),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_period = self.engine.tick_period(&self.state);
        let mut tick_timer = interval(tick_period);
        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    self.update_game();
                }

                _ = render_timer.tick() => {
                    self.metrics.observe(&self.state);
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, self.engine.config(), &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            // Level changes (and restarts) alter the speed
            let period = self.engine.tick_period(&self.state);
            if period != tick_period {
                tick_period = period;
                tick_timer = restarted_timer(period);
            }
        }

        info!(
            "Quit with score {} at level {}",
            self.state.run.score,
            self.state.run.level_number()
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        let action = self.input_handler.handle_key_event(key);
        if action == KeyAction::Quit {
            self.should_quit = true;
            return;
        }

        match self.state.phase {
            Phase::Playing => {
                if let KeyAction::Steer(Action::Turn(direction)) = action {
                    self.queue_turn(direction);
                }
            }
            Phase::LevelComplete => {
                // The key that dismisses the screen does not steer
                self.engine.continue_level(&mut self.state);
                self.pending_turns.clear();
            }
            Phase::GameOver => {
                if action == KeyAction::Restart {
                    self.restart();
                }
            }
        }
    }

    /// Buffer a turn relative to the heading left by the turns already queued.
    /// Repeats, reversals and presses beyond the buffer are dropped.
    fn queue_turn(&mut self, direction: Direction) {
        let heading = self
            .pending_turns
            .back()
            .copied()
            .unwrap_or(self.state.snake.direction);
        if direction == heading || direction.is_opposite(heading) {
            return;
        }
        if self.pending_turns.len() < MAX_PENDING_TURNS {
            self.pending_turns.push_back(direction);
        }
    }

    fn update_game(&mut self) {
        let action = Action::from(self.pending_turns.pop_front());

        match self.engine.tick(&mut self.state, action) {
            TickEvent::Idle | TickEvent::Moved => {}
            TickEvent::AteApple => self.sounds.play(SoundEffect::Eat),
            TickEvent::LevelUp { .. } => {
                self.sounds.play(SoundEffect::Eat);
                self.sounds.play(SoundEffect::LevelUp);
            }
            TickEvent::LostLife { .. } => {
                // Turns queued before the crash would steer the new snake
                self.pending_turns.clear();
                self.sounds.play(SoundEffect::LoseLife);
            }
            TickEvent::GameOver { .. } => self.sounds.play(SoundEffect::LoseLife),
        }
        self.metrics.observe(&self.state);
    }

    fn restart(&mut self) {
        if self.engine.restart(&mut self.state) {
            self.metrics.on_run_start();
            self.pending_turns.clear();
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Interval whose first tick is one full period away
fn restarted_timer(period: Duration) -> Interval {
    interval_at(Instant::now() + period, period)
}
