//! Runtime tests on the simulation driver.
//!
//! The production [`Runtime`] loop runs against [`SimDriver`]: keys are
//! scripted or chosen by seeded bots, and the clock only moves one tick per
//! idle poll, so round pacing is exact and every run is reproducible.

use std::time::Duration;

use jugalbandi_app::{KeyInput, LeaderboardView, Runtime, Screen, Sound};
use jugalbandi_core::{GameConfig, GamePhase, GameSnapshot, Leaderboard, Seat};
use jugalbandi_harness::{Bot, InvariantRegistry, SimDriver};
use jugalbandi_leaderboard::{ChaoticLeaderboard, MemoryLeaderboard};

type SimRuntime<L> = Runtime<SimDriver, L>;

fn runtime<L: Leaderboard>(leaderboard: L) -> (SimRuntime<L>, SimDriver) {
    let driver = SimDriver::new().with_invariants(InvariantRegistry::standard());
    let handle = driver.clone();
    (Runtime::new(driver, leaderboard, GameConfig::default()), handle)
}

/// Step until every queued event has been handled.
async fn drain<L: Leaderboard>(runtime: &mut SimRuntime<L>, driver: &SimDriver) {
    while driver.has_pending() {
        assert!(!runtime.step().await.unwrap(), "unexpected quit");
    }
}

async fn sign_in<L: Leaderboard>(runtime: &mut SimRuntime<L>, driver: &SimDriver) {
    for key in Bot::sign_in() {
        driver.press(key);
    }
    drain(runtime, driver).await;
    assert_eq!(runtime.app().screen(), Screen::Play);
}

/// Round 1: Asha creates `zxc`, Bo repeats it.
async fn win_first_round<L: Leaderboard>(runtime: &mut SimRuntime<L>, driver: &SimDriver) {
    driver.type_keys("zxczxc");
    drain(runtime, driver).await;
    assert!(runtime.app().snapshot().awaiting_advance);
}

async fn end_game<L: Leaderboard>(runtime: &mut SimRuntime<L>, driver: &SimDriver) {
    driver.press(KeyInput::Esc);
    driver.press(KeyInput::Esc);
    drain(runtime, driver).await;
    assert_eq!(runtime.app().screen(), Screen::End);
}

/// Let seeded bots play for `steps` cycles, then end the game.
async fn simulate(seed: u64, steps: usize) -> (GameSnapshot, Vec<Sound>, usize) {
    let (mut runtime, driver) = runtime(MemoryLeaderboard::new());
    sign_in(&mut runtime, &driver).await;

    let mut bot = Bot::new(seed, 0.8);
    for _ in 0..steps {
        if !driver.has_pending()
            && let Some(key) = bot.next_key(runtime.app())
        {
            driver.press(key);
        }
        assert!(!runtime.step().await.unwrap());
    }
    end_game(&mut runtime, &driver).await;

    (runtime.app().snapshot(), driver.take_sounds(), driver.render_count())
}

#[tokio::test]
async fn round_advances_exactly_at_the_delay() {
    let (mut runtime, driver) = runtime(MemoryLeaderboard::new());
    sign_in(&mut runtime, &driver).await;
    win_first_round(&mut runtime, &driver).await;

    // Each idle step moves the clock by 50ms: 39 steps stop short of 2s
    for _ in 0..39 {
        runtime.step().await.unwrap();
    }
    assert_eq!(runtime.app().snapshot().round, 1);

    runtime.step().await.unwrap();
    let snapshot = runtime.app().snapshot();
    assert_eq!(
        (snapshot.round, snapshot.phase, snapshot.turn),
        (2, GamePhase::Create, Seat::Second)
    );
}

#[tokio::test]
async fn ending_cancels_scheduled_advance() {
    let (mut runtime, driver) = runtime(MemoryLeaderboard::new());
    sign_in(&mut runtime, &driver).await;
    win_first_round(&mut runtime, &driver).await;

    end_game(&mut runtime, &driver).await;
    driver.advance(Duration::from_secs(30));
    for _ in 0..10 {
        runtime.step().await.unwrap();
    }

    let snapshot = runtime.app().snapshot();
    assert_eq!((snapshot.phase, snapshot.round), (GamePhase::End, 1));
    assert!(!snapshot.awaiting_advance);
}

#[tokio::test]
async fn play_again_is_not_advanced_by_old_timer() {
    let (mut runtime, driver) = runtime(MemoryLeaderboard::new());
    sign_in(&mut runtime, &driver).await;
    win_first_round(&mut runtime, &driver).await;
    end_game(&mut runtime, &driver).await;

    driver.press(KeyInput::Char('r'));
    drain(&mut runtime, &driver).await;
    driver.advance(Duration::from_secs(30));
    runtime.step().await.unwrap();

    let snapshot = runtime.app().snapshot();
    assert_eq!((snapshot.phase, snapshot.round), (GamePhase::Create, 1));
    assert_eq!(snapshot.player(Seat::Second).score, 300);
    assert_eq!(snapshot.player(Seat::Second).game_points, 0);
}

#[tokio::test]
async fn sounds_follow_the_round() {
    let (mut runtime, driver) = runtime(MemoryLeaderboard::new());
    sign_in(&mut runtime, &driver).await;
    win_first_round(&mut runtime, &driver).await;

    let sounds = driver.take_sounds();
    assert_eq!(sounds.iter().filter(|s| matches!(s, Sound::Note(_))).count(), 6);
    assert_eq!(sounds.last(), Some(&Sound::Success));
}

#[tokio::test]
async fn finished_game_reaches_the_leaderboard() {
    let (mut runtime, driver) = runtime(MemoryLeaderboard::new());
    sign_in(&mut runtime, &driver).await;
    win_first_round(&mut runtime, &driver).await;
    end_game(&mut runtime, &driver).await;

    let standings = runtime.bridge().leaderboard().fetch().unwrap();
    let bo = standings.iter().find(|s| s.name == "Bo").unwrap();
    assert_eq!((bo.total_score, bo.games_played), (300, 1));
    assert_eq!(runtime.app().leaderboard(), &LeaderboardView::Ready(standings));
}

#[tokio::test]
async fn leaderboard_outage_does_not_touch_the_game() {
    let leaderboard = ChaoticLeaderboard::new(MemoryLeaderboard::new(), 1.0);
    let (mut runtime, driver) = runtime(leaderboard);
    sign_in(&mut runtime, &driver).await;
    win_first_round(&mut runtime, &driver).await;
    end_game(&mut runtime, &driver).await;

    let app = runtime.app();
    assert!(matches!(app.leaderboard(), LeaderboardView::Unavailable(_)));
    assert!(app.status_message().unwrap().starts_with("Leaderboard unavailable"));
    assert_eq!(app.final_results().unwrap()[1].score, 300);
    assert_eq!(runtime.bridge().leaderboard().inner().player_count(), 0);

    driver.press(KeyInput::Enter);
    drain(&mut runtime, &driver).await;
    assert_eq!(runtime.app().screen(), Screen::Play);
}

#[tokio::test]
async fn bots_play_many_rounds_within_invariants() {
    let (snapshot, sounds, renders) = simulate(42, 3000).await;

    assert!(snapshot.round > 3, "bots only reached round {}", snapshot.round);
    assert!(sounds.iter().any(|s| matches!(s, Sound::Success | Sound::Failure)));
    assert!(renders > 0);
}

#[tokio::test]
async fn same_seed_replays_identically() {
    assert_eq!(simulate(7, 1500).await, simulate(7, 1500).await);
}

#[tokio::test]
async fn run_stops_driver_on_quit() {
    let (runtime, driver) = runtime(MemoryLeaderboard::new());
    driver.press(KeyInput::Esc);

    runtime.run().await.unwrap();
    assert!(driver.is_stopped());
}

#[tokio::test]
async fn run_stops_driver_on_render_failure() {
    let (runtime, driver) = runtime(MemoryLeaderboard::new());
    driver.fail_next_render();

    assert!(runtime.run().await.is_err());
    assert!(driver.is_stopped());
}
