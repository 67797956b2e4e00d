//! Leaderboard-to-Application translation layer.
//!
//! The [`ScoreBridge`] executes the leaderboard side of
//! [`crate::AppAction`]s against a [`Leaderboard`] backend and turns the
//! results back into [`crate::AppEvent`]s.
//!
//! Backend failures are logged and reported as
//! [`AppEvent::LeaderboardUnavailable`]; they never reach the game.

use jugalbandi_core::{FinalScore, Leaderboard};

use crate::{AppAction, AppEvent};

/// Bridge between App and a leaderboard backend.
pub struct ScoreBridge<L: Leaderboard> {
    leaderboard: L,
}

impl<L: Leaderboard> ScoreBridge<L> {
    /// Create a bridge over `leaderboard`.
    pub fn new(leaderboard: L) -> Self {
        Self { leaderboard }
    }

    /// Underlying backend.
    pub fn leaderboard(&self) -> &L {
        &self.leaderboard
    }

    /// Process an App action and return resulting App events.
    ///
    /// Actions that don't concern the leaderboard produce no events.
    pub fn process_app_action(&self, action: &AppAction) -> Vec<AppEvent> {
        match action {
            AppAction::SubmitScores { results } => self.submit(results),
            AppAction::FetchLeaderboard => vec![self.fetch()],
            AppAction::Render | AppAction::Quit | AppAction::Play(_) => vec![],
        }
    }

    /// Submit both players' points for the game. Reports the first failure
    /// only; the remaining submissions are still attempted.
    fn submit(&self, results: &[FinalScore; 2]) -> Vec<AppEvent> {
        let mut failure = None;

        for result in results {
            match self.leaderboard.submit_score(&result.name, result.game_points) {
                Ok(standing) => tracing::debug!(
                    player = %standing.name,
                    games = standing.games_played,
                    "score submitted"
                ),
                Err(e) => {
                    tracing::warn!(player = %result.name, error = %e, "score submission failed");
                    if failure.is_none() {
                        failure = Some(AppEvent::LeaderboardUnavailable { message: e.to_string() });
                    }
                },
            }
        }

        failure.into_iter().collect()
    }

    fn fetch(&self) -> AppEvent {
        match self.leaderboard.fetch() {
            Ok(standings) => AppEvent::LeaderboardUpdated(standings),
            Err(e) => {
                tracing::warn!(error = %e, "leaderboard fetch failed");
                AppEvent::LeaderboardUnavailable { message: e.to_string() }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use jugalbandi_core::{LeaderboardError, Seat, Standing};

    use super::*;

    /// Backend that rejects everything.
    #[derive(Clone)]
    struct Offline;

    impl Leaderboard for Offline {
        fn submit_score(&self, _: &str, _: u64) -> Result<Standing, LeaderboardError> {
            Err(LeaderboardError::Unavailable("offline".into()))
        }

        fn fetch(&self) -> Result<Vec<Standing>, LeaderboardError> {
            Err(LeaderboardError::Unavailable("offline".into()))
        }
    }

    fn results() -> [FinalScore; 2] {
        [
            FinalScore { seat: Seat::First, name: "Asha".into(), game_points: 300, score: 300 },
            FinalScore { seat: Seat::Second, name: "Bo".into(), game_points: 0, score: 600 },
        ]
    }

    #[test]
    fn failures_become_one_unavailable_event() {
        let bridge = ScoreBridge::new(Offline);

        let events = bridge.process_app_action(&AppAction::SubmitScores { results: results() });
        assert_eq!(events, vec![AppEvent::LeaderboardUnavailable {
            message: "leaderboard unavailable: offline".into()
        }]);

        let events = bridge.process_app_action(&AppAction::FetchLeaderboard);
        assert!(matches!(events.as_slice(), [AppEvent::LeaderboardUnavailable { .. }]));
    }

    #[test]
    fn non_leaderboard_actions_are_ignored() {
        let bridge = ScoreBridge::new(Offline);
        assert!(bridge.process_app_action(&AppAction::Render).is_empty());
        assert!(bridge.process_app_action(&AppAction::Quit).is_empty());
    }
}
