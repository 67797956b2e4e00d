//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine wrapping the game
//! - [`ScoreBridge`]: Leaderboard calls
//! - [`Driver`]: Platform-specific I/O

use jugalbandi_core::{GameConfig, Leaderboard};

use crate::{App, AppAction, Driver, ScoreBridge};

/// Generic runtime that orchestrates App, ScoreBridge, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `L`: Leaderboard backend
pub struct Runtime<D, L>
where
    D: Driver,
    L: Leaderboard,
{
    driver: D,
    app: App<D::Instant>,
    bridge: ScoreBridge<L>,
}

impl<D, L> Runtime<D, L>
where
    D: Driver,
    L: Leaderboard,
{
    /// Create a runtime on the welcome screen.
    pub fn new(driver: D, leaderboard: L, config: GameConfig) -> Self {
        Self { driver, app: App::new(config), bridge: ScoreBridge::new(leaderboard) }
    }

    /// Run the main event loop until the app quits.
    ///
    /// Each cycle:
    /// 1. Polls the driver for one input event and feeds it to the App
    /// 2. Executes the resulting actions, looping leaderboard results back
    /// 3. Ticks the App so a finished round advances on time
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error. The driver is
    /// stopped either way.
    pub async fn run(mut self) -> Result<(), D::Error> {
        let result = self.run_loop().await;
        self.driver.stop();
        result
    }

    async fn run_loop(&mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;
        while !self.step().await? {}
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    ///
    /// # Errors
    ///
    /// Returns an error if polling or rendering fails.
    pub async fn step(&mut self) -> Result<bool, D::Error> {
        if let Some(event) = self.driver.poll_event().await? {
            let now = self.driver.now();
            let actions = self.app.handle(event, now);
            if self.process_actions(actions)? {
                return Ok(true);
            }
        }

        let now = self.driver.now();
        let actions = self.app.tick(now);
        self.process_actions(actions)
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::Play(sound) => self.driver.play(sound),

                    // Leaderboard operations go through the bridge
                    AppAction::SubmitScores { .. } | AppAction::FetchLeaderboard => {
                        let events = self.bridge.process_app_action(&action);
                        for event in events {
                            let now = self.driver.now();
                            pending_actions.extend(self.app.handle(event, now));
                        }
                    },
                }
            }
        }
        Ok(false)
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App<D::Instant> {
        &self.app
    }

    /// Get a mutable reference to the App
    pub fn app_mut(&mut self) -> &mut App<D::Instant> {
        &mut self.app
    }

    /// Get a reference to the Driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Get a mutable reference to the Driver
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Get a reference to the ScoreBridge
    pub fn bridge(&self) -> &ScoreBridge<L> {
        &self.bridge
    }
}
