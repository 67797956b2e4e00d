//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as `TerminalDriver` but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`jugalbandi_app::Runtime`] orchestration code runs in both production and
//! simulation.
//!
//! Time is virtual: the clock only moves when the test advances it, or by
//! one tick interval each time the driver is polled with nothing queued.

use std::{
    collections::VecDeque,
    fmt,
    ops::Sub,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use jugalbandi_app::{App, AppEvent, Driver, KeyInput, Sound};
use jugalbandi_core::GameSnapshot;

use crate::invariants::{InvariantRegistry, SystemSnapshot};

/// Tick interval used when no explicit interval is configured.
pub const DEFAULT_TICK: Duration = Duration::from_millis(50);

/// Virtual instant: time elapsed since the simulation began.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimInstant(Duration);

impl SimInstant {
    /// Start of the simulation.
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Time since the simulation began.
    pub fn elapsed(self) -> Duration {
        self.0
    }

    /// This instant moved forward by `by`.
    #[must_use]
    pub fn after(self, by: Duration) -> Self {
        Self(self.0.saturating_add(by))
    }
}

impl Sub for SimInstant {
    type Output = Duration;

    fn sub(self, earlier: Self) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

/// Error type for simulation driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimDriverError(pub String);

impl fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SimDriverError: {}", self.0)
    }
}

impl std::error::Error for SimDriverError {}

/// State shared between the driver and test code holding a clone.
#[derive(Debug, Default)]
struct SharedState {
    pending_events: VecDeque<AppEvent>,
    clock: SimInstant,
    renders: usize,
    sounds: Vec<Sound>,
    fail_next_render: bool,
    stopped: bool,
    /// Game state at the last checked render.
    last_rendered: Option<GameSnapshot>,
}

/// Simulation driver for deterministic testing.
///
/// Clones share state, so a test can keep a handle while the
/// [`jugalbandi_app::Runtime`] owns the driver.
#[derive(Clone)]
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
    tick: Duration,
    invariants: Option<Arc<InvariantRegistry>>,
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SimDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimDriver")
            .field("tick", &self.tick)
            .field("checks_invariants", &self.invariants.is_some())
            .finish_non_exhaustive()
    }
}

impl SimDriver {
    /// Create a new simulation driver at virtual time zero.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SharedState::default())),
            tick: DEFAULT_TICK,
            invariants: None,
        }
    }

    /// Advance the clock by `tick` on every idle poll.
    #[must_use]
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Check invariants on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(Arc::new(registry));
        self
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        // A test that panicked mid-step leaves usable state behind
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Queue an event for the runtime.
    pub fn inject_event(&self, event: AppEvent) {
        self.lock().pending_events.push_back(event);
    }

    /// Queue a key press.
    pub fn press(&self, key: KeyInput) {
        self.inject_event(AppEvent::Key(key));
    }

    /// Queue one character key per char of `keys`.
    pub fn type_keys(&self, keys: &str) {
        let mut state = self.lock();
        state.pending_events.extend(keys.chars().map(|c| AppEvent::Key(KeyInput::Char(c))));
    }

    /// Move the virtual clock forward.
    pub fn advance(&self, by: Duration) {
        let mut state = self.lock();
        state.clock = state.clock.after(by);
    }

    /// Check if there are pending events to process.
    pub fn has_pending(&self) -> bool {
        !self.lock().pending_events.is_empty()
    }

    /// Number of frames rendered so far.
    pub fn render_count(&self) -> usize {
        self.lock().renders
    }

    /// Take all sound cues played since the last call.
    pub fn take_sounds(&self) -> Vec<Sound> {
        std::mem::take(&mut self.lock().sounds)
    }

    /// Make the next render fail, as a broken terminal would.
    pub fn fail_next_render(&self) {
        self.lock().fail_next_render = true;
    }

    /// Driver has been stopped.
    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;
    type Instant = SimInstant;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        let event = {
            let mut state = self.lock();
            let event = state.pending_events.pop_front();
            if event.is_none() {
                state.clock = state.clock.after(self.tick);
            }
            event
        };

        if event.is_none() {
            tokio::task::yield_now().await;
        }
        Ok(event)
    }

    fn now(&self) -> Self::Instant {
        self.lock().clock
    }

    fn render(&mut self, app: &App<Self::Instant>) -> Result<(), Self::Error> {
        let previous = {
            let mut state = self.lock();
            if std::mem::take(&mut state.fail_next_render) {
                return Err(SimDriverError("render failed".into()));
            }
            state.renders += 1;
            if self.invariants.is_some() {
                state.last_rendered.replace(app.snapshot())
            } else {
                None
            }
        };

        if let Some(registry) = &self.invariants {
            let mut snapshot = SystemSnapshot::from_app(app);
            if let Some(previous) = previous {
                snapshot = snapshot.with_previous(previous);
            }
            if let Err(violations) = registry.check_all(&snapshot) {
                let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
                return Err(SimDriverError(messages.join("; ")));
            }
        }
        Ok(())
    }

    fn play(&mut self, sound: Sound) {
        tracing::trace!(?sound, "sim sound");
        self.lock().sounds.push(sound);
    }

    fn stop(&mut self) {
        self.lock().stopped = true;
    }
}

#[cfg(test)]
mod tests {
    use jugalbandi_core::GameConfig;

    use super::*;

    fn press_all(app: &mut App<SimInstant>, keys: &str, now: SimInstant) {
        for c in keys.chars() {
            app.handle(AppEvent::Key(KeyInput::Char(c)), now);
        }
    }

    /// App in round 1 with both names entered.
    fn started_app() -> App<SimInstant> {
        let mut app = App::new(GameConfig::default());
        press_all(&mut app, "Asha", SimInstant::ZERO);
        app.handle(AppEvent::Key(KeyInput::Tab), SimInstant::ZERO);
        press_all(&mut app, "Bo", SimInstant::ZERO);
        app.handle(AppEvent::Key(KeyInput::Enter), SimInstant::ZERO);
        app
    }

    /// Play one round to resolution and start the next one.
    fn finish_round(app: &mut App<SimInstant>, now: SimInstant) -> SimInstant {
        press_all(app, "zxczxc", now);
        let later = now.after(Duration::from_secs(2));
        app.tick(later);
        later
    }

    #[test]
    fn virtual_instants_subtract_without_underflow() {
        let later = SimInstant::ZERO.after(Duration::from_millis(300));
        assert_eq!(later - SimInstant::ZERO, Duration::from_millis(300));
        assert_eq!(SimInstant::ZERO - later, Duration::ZERO);
    }

    #[test]
    fn inject_event_queues_event() {
        let driver = SimDriver::new();
        driver.press(KeyInput::Enter);

        assert!(driver.has_pending());
    }

    #[tokio::test]
    async fn idle_poll_advances_clock_by_tick() {
        let mut driver = SimDriver::new().with_tick(Duration::from_millis(10));

        assert_eq!(driver.poll_event().await.unwrap(), None);
        assert_eq!(driver.now().elapsed(), Duration::from_millis(10));
    }

    #[tokio::test]
    async fn queued_events_do_not_move_clock() {
        let mut driver = SimDriver::new();
        driver.type_keys("ab");

        assert_eq!(driver.poll_event().await.unwrap(), Some(AppEvent::Key(KeyInput::Char('a'))));
        assert_eq!(driver.poll_event().await.unwrap(), Some(AppEvent::Key(KeyInput::Char('b'))));
        assert_eq!(driver.now(), SimInstant::ZERO);
    }

    #[test]
    fn clones_share_state() {
        let mut driver = SimDriver::new();
        let handle = driver.clone();

        driver.play(Sound::Success);
        let app: App<SimInstant> = App::new(GameConfig::default());
        driver.render(&app).unwrap();

        assert_eq!(handle.take_sounds(), vec![Sound::Success]);
        assert_eq!(handle.render_count(), 1);
    }

    #[test]
    fn injected_render_failure_fires_once() {
        let mut driver = SimDriver::new();
        let app: App<SimInstant> = App::new(GameConfig::default());
        driver.fail_next_render();

        assert!(driver.render(&app).is_err());
        assert!(driver.render(&app).is_ok());
    }

    #[test]
    fn history_checks_see_previous_render() {
        let mut driver = SimDriver::new().with_invariants(InvariantRegistry::standard());
        let round_one = started_app();
        driver.render(&round_one).unwrap();

        let mut round_three = started_app();
        let now = finish_round(&mut round_three, SimInstant::ZERO);
        finish_round(&mut round_three, now);
        assert_eq!(round_three.game().round(), 3);

        let err = driver.render(&round_three).unwrap_err();
        assert!(err.0.contains("RoundProgression"), "{err}");
    }

    #[test]
    fn scheduled_advance_passes_history_checks() {
        let mut driver = SimDriver::new().with_invariants(InvariantRegistry::standard());
        let mut app = started_app();
        driver.render(&app).unwrap();

        press_all(&mut app, "zxczxc", SimInstant::ZERO);
        driver.render(&app).unwrap();
        app.tick(SimInstant::ZERO.after(Duration::from_secs(2)));

        assert_eq!(app.game().round(), 2);
        driver.render(&app).unwrap();
    }
}
