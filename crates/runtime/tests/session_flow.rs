mod common;

use std::time::Duration;

use common::{Harness, drain};
use match_core::{
    DifficultyTier, GameError, ItemId, MatchError, MatchOutcome, RoundPhase, TimerOutcome,
};
use match_runtime::{
    BoardEvent, Event, HudEvent, OutcomeEvent, RuntimeError, SessionStatus, TimerSignal,
};

#[tokio::test]
async fn round_start_renders_board_and_arms_timers() {
    let mut harness = Harness::new(DifficultyTier::Easy);

    let round = harness.controller.start_round().await.expect("round should start");

    let state = harness.controller.round().expect("round should be active");
    assert_eq!(state.item_count(), 10);
    assert_eq!(state.seconds_remaining(), 90);
    assert_eq!(harness.controller.status(), SessionStatus::Playing);
    assert_eq!(harness.controller.session().used_ids.len(), 10);

    let board = drain(&mut harness.board);
    let Some(Event::Board(BoardEvent::BoardRendered { images, labels, .. })) = board.first() else {
        panic!("expected BoardRendered, got {board:?}");
    };
    assert_eq!(images.len(), 10);
    assert_eq!(labels.len(), 10);

    let hud = drain(&mut harness.hud);
    assert!(hud.contains(&Event::Hud(HudEvent::LevelChanged { level: 1 })));
    assert!(hud.contains(&Event::Hud(HudEvent::ScoreChanged { score: 0 })));
    assert!(hud.contains(&Event::Hud(HudEvent::TimerTicked { seconds_remaining: 90 })));

    let timers = harness.scheduler.timers();
    let countdown = timers
        .iter()
        .find(|timer| timer.signal == TimerSignal::CountdownTick(round))
        .expect("countdown armed");
    assert_eq!(countdown.every, Some(Duration::from_secs(1)));
    let chaos = timers
        .iter()
        .find(|timer| timer.signal == TimerSignal::ChaosReshuffle(round))
        .expect("chaos armed");
    assert_eq!(chaos.every, Some(Duration::from_secs(20)));
}

#[tokio::test]
async fn winning_folds_score_and_schedules_next_level() {
    let mut harness = Harness::new(DifficultyTier::Easy);
    let round = harness.controller.start_round().await.unwrap();

    harness.win_round();

    assert_eq!(harness.controller.score(), 100);
    assert_eq!(harness.controller.session().total_score, 100);
    assert_eq!(harness.controller.status(), SessionStatus::AwaitingAdvance);
    assert_eq!(harness.scheduler.armed(), vec![TimerSignal::LevelAdvance(round)]);

    let advance = harness
        .scheduler
        .timers()
        .into_iter()
        .find(|timer| timer.signal == TimerSignal::LevelAdvance(round))
        .unwrap();
    assert_eq!(advance.after, Some(Duration::from_secs(5)));

    assert_eq!(
        drain(&mut harness.outcome),
        vec![Event::Outcome(OutcomeEvent::RoundWon {
            round,
            level: 1,
            score: 100,
            advance_in_secs: 5,
        })]
    );

    // A tick that was already queued must not turn the win into a loss.
    harness.controller.on_timer(TimerSignal::CountdownTick(round)).await.unwrap();
    assert_eq!(harness.controller.tick().unwrap(), TimerOutcome::Expired);
    assert_eq!(harness.controller.round().unwrap().phase(), RoundPhase::Won);
    assert_eq!(harness.controller.session().total_score, 100);
}

#[tokio::test]
async fn level_advance_keeps_score_and_clears_used_ids() {
    let mut harness = Harness::new(DifficultyTier::Easy);
    let first = harness.controller.start_round().await.unwrap();
    harness.win_round();

    harness
        .controller
        .on_timer(TimerSignal::LevelAdvance(first))
        .await
        .unwrap();

    let session = harness.controller.session();
    assert_eq!(session.level, 2);
    assert_eq!(session.total_score, 100);
    assert_eq!(session.used_ids.len(), 10);
    assert!(harness.controller.round_id() > Some(first));
    assert_eq!(harness.controller.status(), SessionStatus::Playing);
    assert_eq!(harness.controller.score(), 100);
}

#[tokio::test]
async fn two_mistakes_then_timeout_loses_with_negative_delta() {
    let mut harness = Harness::new(DifficultyTier::Easy);
    let round = harness.controller.start_round().await.unwrap();
    let items = harness.items();

    let wrong = harness
        .controller
        .attempt_match(items[0].id, &items[1].display_name)
        .unwrap();
    assert_eq!(wrong, MatchOutcome::Incorrect);
    harness
        .controller
        .attempt_match(items[2].id, "definitely not a label")
        .unwrap();
    assert_eq!(harness.controller.score(), -10);

    harness.expire_round();

    assert_eq!(harness.controller.round().unwrap().phase(), RoundPhase::Lost);
    assert_eq!(harness.controller.session().total_score, -10);
    assert_eq!(harness.controller.score(), -10);
    assert_eq!(harness.controller.status(), SessionStatus::GameOver);
    assert!(harness.scheduler.armed().is_empty());
    assert_eq!(
        drain(&mut harness.outcome),
        vec![Event::Outcome(OutcomeEvent::RoundLost {
            round,
            level: 1,
            score: -10,
        })]
    );

    let error = harness
        .controller
        .attempt_match(items[3].id, &items[3].display_name)
        .unwrap_err();
    assert!(matches!(
        error,
        RuntimeError::Match(MatchError::RoundOver { phase: RoundPhase::Lost })
    ));
    assert_eq!(harness.controller.session().total_score, -10);
}

#[tokio::test]
async fn incorrect_and_accepted_matches_reach_the_hud() {
    let mut harness = Harness::new(DifficultyTier::Easy);
    let round = harness.controller.start_round().await.unwrap();
    let items = harness.items();
    drain(&mut harness.hud);
    drain(&mut harness.board);

    harness
        .controller
        .attempt_match(items[0].id, &items[1].display_name)
        .unwrap();
    harness
        .controller
        .attempt_match(items[0].id, &items[0].display_name)
        .unwrap();

    assert_eq!(
        drain(&mut harness.hud),
        vec![
            Event::Hud(HudEvent::IncorrectMatch {
                item: items[0].id,
                label: items[1].display_name.clone(),
            }),
            Event::Hud(HudEvent::ScoreChanged { score: -5 }),
            Event::Hud(HudEvent::ScoreChanged { score: 5 }),
        ]
    );
    assert_eq!(
        drain(&mut harness.board),
        vec![Event::Board(BoardEvent::MatchAccepted {
            round,
            item: items[0].id,
            label: items[0].display_name.clone(),
        })]
    );

    let error = harness
        .controller
        .attempt_match(items[0].id, &items[0].display_name)
        .unwrap_err();
    assert_eq!(error.error_code(), "MATCH_ALREADY_MATCHED");
    assert_eq!(harness.controller.score(), 5);
}

#[tokio::test]
async fn restart_resets_level_and_score() {
    let mut harness = Harness::new(DifficultyTier::Medium);
    let first = harness.controller.start_round().await.unwrap();
    harness.win_round();
    harness
        .controller
        .on_timer(TimerSignal::LevelAdvance(first))
        .await
        .unwrap();
    harness.expire_round();
    assert_eq!(harness.controller.status(), SessionStatus::GameOver);
    assert_eq!(harness.controller.session().level, 2);

    harness.controller.on_restart().await.unwrap();

    let session = harness.controller.session();
    assert_eq!(session.level, 1);
    assert_eq!(session.total_score, 0);
    assert_eq!(session.tier, DifficultyTier::Medium);
    assert_eq!(session.used_ids.len(), 15);
    assert_eq!(harness.controller.score(), 0);
}

#[tokio::test]
async fn difficulty_change_starts_over_with_fresh_ids() {
    let mut harness = Harness::new(DifficultyTier::Easy);
    let first = harness.controller.start_round().await.unwrap();
    harness.win_round();

    harness
        .controller
        .on_difficulty_changed(DifficultyTier::Hard)
        .await
        .unwrap();

    let session = harness.controller.session();
    assert_eq!(session.tier, DifficultyTier::Hard);
    assert_eq!(session.level, 1);
    assert_eq!(session.total_score, 0);
    assert_eq!(session.used_ids.len(), 20);
    assert_eq!(harness.controller.round().unwrap().seconds_remaining(), 150);

    // The pending advance of the abandoned round is gone.
    assert!(!harness.scheduler.armed().contains(&TimerSignal::LevelAdvance(first)));
    let current = harness.controller.round_id();
    harness
        .controller
        .on_timer(TimerSignal::LevelAdvance(first))
        .await
        .unwrap();
    assert_eq!(harness.controller.round_id(), current);
    assert_eq!(harness.controller.session().level, 1);
}

#[tokio::test]
async fn unknown_selector_uses_standard_round() {
    let mut harness = Harness::new(DifficultyTier::Easy);

    harness
        .controller
        .on_difficulty_changed(DifficultyTier::from_selector("nightmare"))
        .await
        .unwrap();

    let round = harness.controller.round().unwrap();
    assert_eq!(round.item_count(), 10);
    assert_eq!(round.seconds_remaining(), 120);
}

#[tokio::test]
async fn failed_setup_leaves_session_untouched_and_can_be_retried() {
    let mut harness = Harness::new(DifficultyTier::Easy);
    let first = harness.controller.start_round().await.unwrap();
    harness.win_round();
    let before = harness.controller.session().clone();
    drain(&mut harness.outcome);

    harness.catalog.set_failing(true);
    let error = harness
        .controller
        .on_timer(TimerSignal::LevelAdvance(first))
        .await
        .unwrap_err();

    assert!(matches!(error, RuntimeError::Catalog { .. }));
    assert!(error.severity().is_recoverable());
    assert_eq!(harness.controller.session(), &before);
    assert_eq!(harness.controller.status(), SessionStatus::SetupFailed);
    assert!(harness.controller.round().is_none());
    assert!(harness.scheduler.armed().is_empty());
    assert!(matches!(
        drain(&mut harness.outcome).as_slice(),
        [Event::Outcome(OutcomeEvent::RoundStartFailed { level: 2, .. })]
    ));

    harness.catalog.set_failing(false);
    harness.controller.start_round().await.unwrap();

    let session = harness.controller.session();
    assert_eq!(session.level, 2);
    assert_eq!(session.total_score, 100);
    assert_eq!(session.used_ids.len(), 10);
    assert_eq!(harness.controller.status(), SessionStatus::Playing);
}

#[tokio::test]
async fn start_mid_round_keeps_the_running_delta() {
    let mut harness = Harness::new(DifficultyTier::Easy);
    let round = harness.controller.start_round().await.unwrap();
    let items = harness.items();
    for item in &items[..4] {
        harness
            .controller
            .attempt_match(item.id, "definitely not a label")
            .unwrap();
    }
    assert_eq!(harness.controller.score(), -20);
    drain(&mut harness.board);

    let error = harness.controller.start_round().await.unwrap_err();

    assert!(matches!(
        error,
        RuntimeError::RoundAlreadyStarted { status: SessionStatus::Playing }
    ));
    assert_eq!(error.error_code(), "ROUND_ALREADY_STARTED");
    assert_eq!(harness.controller.round_id(), Some(round));
    assert_eq!(harness.controller.score(), -20);
    assert_eq!(harness.controller.session().used_ids.len(), 10);
    assert!(harness.scheduler.armed().contains(&TimerSignal::CountdownTick(round)));
    assert!(drain(&mut harness.board).is_empty());
}

#[tokio::test]
async fn start_after_a_win_keeps_the_pending_advance() {
    let mut harness = Harness::new(DifficultyTier::Easy);
    let round = harness.controller.start_round().await.unwrap();
    harness.win_round();

    let error = harness.controller.start_round().await.unwrap_err();

    assert!(matches!(
        error,
        RuntimeError::RoundAlreadyStarted { status: SessionStatus::AwaitingAdvance }
    ));
    assert_eq!(harness.controller.status(), SessionStatus::AwaitingAdvance);
    assert_eq!(harness.scheduler.armed(), vec![TimerSignal::LevelAdvance(round)]);
    assert_eq!(harness.controller.session().level, 1);

    harness
        .controller
        .on_timer(TimerSignal::LevelAdvance(round))
        .await
        .unwrap();
    assert_eq!(harness.controller.session().level, 2);
    assert_eq!(harness.controller.score(), 100);
}

#[tokio::test]
async fn start_after_game_over_is_rejected() {
    let mut harness = Harness::new(DifficultyTier::Easy);
    harness.controller.start_round().await.unwrap();
    harness.expire_round();

    let error = harness.controller.start_round().await.unwrap_err();

    assert!(matches!(
        error,
        RuntimeError::RoundAlreadyStarted { status: SessionStatus::GameOver }
    ));
    harness.controller.on_restart().await.unwrap();
    assert_eq!(harness.controller.status(), SessionStatus::Playing);
}

#[tokio::test]
async fn failed_difficulty_change_keeps_the_running_round() {
    let mut harness = Harness::new(DifficultyTier::Easy);
    let round = harness.controller.start_round().await.unwrap();
    let item = harness.items()[0].clone();
    harness
        .controller
        .attempt_match(item.id, &item.display_name)
        .unwrap();
    let before = harness.controller.session().clone();
    drain(&mut harness.outcome);

    harness.catalog.set_failing(true);
    let error = harness
        .controller
        .on_difficulty_changed(DifficultyTier::Hard)
        .await
        .unwrap_err();

    assert!(matches!(error, RuntimeError::Catalog { .. }));
    assert_eq!(harness.controller.round_id(), Some(round));
    assert_eq!(harness.controller.score(), 10);
    assert_eq!(harness.controller.session(), &before);
    assert_eq!(harness.controller.status(), SessionStatus::Playing);
    assert!(harness.controller.round().unwrap().is_active());
    assert!(harness.scheduler.armed().contains(&TimerSignal::CountdownTick(round)));
    assert!(matches!(
        drain(&mut harness.outcome).as_slice(),
        [Event::Outcome(OutcomeEvent::RoundStartFailed { level: 1, .. })]
    ));

    // The round is still playable.
    harness.catalog.set_failing(false);
    let next = harness.items()[1].clone();
    assert_eq!(
        harness
            .controller
            .attempt_match(next.id, &next.display_name)
            .unwrap(),
        MatchOutcome::Correct
    );
    assert_eq!(harness.controller.score(), 20);
}

#[tokio::test]
async fn exhausted_catalog_fails_setup() {
    let config = match_core::GameConfig::new().with_catalog_size(5);
    let mut harness = Harness::with_config(DifficultyTier::Easy, config);

    let error = harness.controller.start_round().await.unwrap_err();

    assert!(matches!(error, RuntimeError::Sampling(_)));
    assert_eq!(error.error_code(), "SAMPLING_EXHAUSTED");
    assert_eq!(harness.controller.session().level, 1);
    assert!(harness.controller.session().used_ids.is_empty());
    assert_eq!(harness.controller.status(), SessionStatus::SetupFailed);
}

#[tokio::test]
async fn stale_signals_are_ignored() {
    let mut harness = Harness::new(DifficultyTier::Easy);
    let old = harness.controller.start_round().await.unwrap();
    let current = harness.controller.on_restart().await.unwrap();
    assert_ne!(old, current);
    let before = harness.controller.snapshot();
    drain(&mut harness.board);

    for signal in [
        TimerSignal::CountdownTick(old),
        TimerSignal::ChaosReshuffle(old),
        TimerSignal::LevelAdvance(old),
    ] {
        harness.controller.on_timer(signal).await.unwrap();
    }

    assert_eq!(harness.controller.snapshot(), before);
    assert!(drain(&mut harness.board).is_empty());
    assert!(!harness.scheduler.armed().contains(&TimerSignal::CountdownTick(old)));
}

#[tokio::test]
async fn countdown_signal_ticks_the_current_round() {
    let mut harness = Harness::new(DifficultyTier::Easy);
    let round = harness.controller.start_round().await.unwrap();

    harness
        .controller
        .on_timer(TimerSignal::CountdownTick(round))
        .await
        .unwrap();

    assert_eq!(harness.controller.round().unwrap().seconds_remaining(), 89);
}

#[tokio::test]
async fn chaos_reorders_labels_without_touching_matching() {
    let mut harness = Harness::new(DifficultyTier::Hard);
    let round = harness.controller.start_round().await.unwrap();
    let mut before: Vec<String> = harness
        .controller
        .layout()
        .unwrap()
        .labels
        .tiles()
        .iter()
        .map(|tile| tile.label.clone())
        .collect();
    drain(&mut harness.board);

    harness
        .controller
        .on_timer(TimerSignal::ChaosReshuffle(round))
        .await
        .unwrap();

    let board = drain(&mut harness.board);
    let [Event::Board(BoardEvent::LabelsReshuffled { round: reshuffled, labels })] = board.as_slice()
    else {
        panic!("expected one LabelsReshuffled, got {board:?}");
    };
    assert_eq!(*reshuffled, round);
    let mut after: Vec<String> = labels.tiles().iter().map(|tile| tile.label.clone()).collect();
    before.sort();
    after.sort();
    assert_eq!(before, after);

    // Matching still uses display names, whatever the layout looks like.
    let item = harness.items()[0].clone();
    assert_eq!(
        harness.controller.attempt_match(item.id, &item.display_name).unwrap(),
        MatchOutcome::Correct
    );
}

#[tokio::test]
async fn chaos_stops_with_the_round() {
    let mut harness = Harness::new(DifficultyTier::Easy);
    let round = harness.controller.start_round().await.unwrap();
    harness.win_round();
    drain(&mut harness.board);

    assert!(!harness.scheduler.armed().contains(&TimerSignal::ChaosReshuffle(round)));
    harness
        .controller
        .on_timer(TimerSignal::ChaosReshuffle(round))
        .await
        .unwrap();
    assert!(drain(&mut harness.board).is_empty());
}

#[tokio::test]
async fn commands_without_a_round_are_rejected() {
    let mut harness = Harness::new(DifficultyTier::Easy);

    let error = harness.controller.attempt_match(ItemId(1), "item-1").unwrap_err();
    assert!(matches!(error, RuntimeError::NoActiveRound));
    assert!(matches!(harness.controller.tick(), Err(RuntimeError::NoActiveRound)));

    let snapshot = harness.controller.snapshot();
    assert_eq!(snapshot.status, SessionStatus::Idle);
    assert_eq!(snapshot.level, 1);
    assert!(snapshot.round.is_none());
}
