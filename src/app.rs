//! App: terminal init, fixed-rate tick loop, game-over hand-off.

use crate::GameConfig;
use crate::game::{GameState, Phase};
use crate::input::{Action, poll_action};
use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};
use tachyonfx::Effect;

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// A new piece could not spawn.
    GameOver,
    /// The player pressed a quit key.
    Quit,
}

pub struct App {
    config: GameConfig,
    state: GameState,
    /// TachyonFX flash for line clears (created when rows clear).
    line_clear_effect: Option<Effect>,
    /// Last time the effect was advanced (for delta).
    last_frame: Instant,
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = GameState::new(&config, rng);
        Self {
            config,
            state,
            line_clear_effect: None,
            last_frame: Instant::now(),
        }
    }

    pub fn run(&mut self) -> Result<Ending> {
        use crossterm::{
            cursor::Show,
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let result = ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))
            .map_err(anyhow::Error::from)
            .and_then(|mut terminal| self.run_loop(&mut terminal));

        // Restore: both steps run even if the first fails.
        let left = execute!(std::io::stdout(), LeaveAlternateScreen, Show);
        let raw_off = disable_raw_mode();
        restore_result(result, left, raw_off)
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<Ending> {
        let tick_interval = Duration::from_millis(self.config.tick_ms);
        loop {
            let tick_start = Instant::now();
            if self.state.phase() == Phase::GameOver {
                return Ok(Ending::GameOver);
            }

            let action = poll_action()?;
            if action == Some(Action::Quit) {
                return Ok(Ending::Quit);
            }

            let tick = self.state.step(action);
            if tick.game_over {
                return Ok(Ending::GameOver);
            }
            if tick.lines_cleared > 0 && !self.config.no_animation {
                self.line_clear_effect = Some(crate::ui::line_clear_effect());
            }

            self.draw(terminal, tick_start)?;

            // Fixed pacing; only process exit interrupts it.
            std::thread::sleep(tick_interval.saturating_sub(tick_start.elapsed()));
        }
    }

    fn draw(&mut self, terminal: &mut DefaultTerminal, now: Instant) -> Result<()> {
        let delta = now.saturating_duration_since(self.last_frame);
        let delta_ms = delta.as_millis().min(u32::MAX as u128) as u32;
        self.last_frame = now;

        terminal.draw(|f| crate::ui::draw(f, &self.state, &mut self.line_clear_effect, delta_ms))?;

        if self.line_clear_effect.as_ref().is_some_and(Effect::done) {
            self.line_clear_effect = None;
        }
        Ok(())
    }
}

/// Loop result first, then the terminal restore errors in order.
fn restore_result(
    result: Result<Ending>,
    left: std::io::Result<()>,
    raw_off: std::io::Result<()>,
) -> Result<Ending> {
    let ending = result?;
    left?;
    raw_off?;
    Ok(ending)
}
