//! Session orchestration: round lifecycle, timers and level progression.
//!
//! [`SessionController`] owns the [`SessionState`] and the current round and
//! is the only place where they change. It is driven by the session worker
//! (commands and timer signals, one at a time) and reports every visible
//! change on the [`EventBus`].
mod snapshot;

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use match_core::{
    BoardLayout, DifficultyTier, GameConfig, GameError, ItemId, MatchOutcome, RoundPhase,
    RoundState, SessionState, TimerOutcome, UniqueIdSampler,
};

use crate::api::{Result, RuntimeError};
use crate::catalog::{self, ItemCatalog};
use crate::events::{BoardEvent, EventBus, HudEvent, OutcomeEvent};
use crate::scheduler::{RoundId, Scheduler, TimerHandle, TimerSignal};

pub use snapshot::{RoundSnapshot, SessionSnapshot, SessionStatus};

/// The round currently on the board, with the timers bound to it.
struct ActiveRound {
    id: RoundId,
    state: RoundState,
    layout: BoardLayout,
    countdown: Option<TimerHandle>,
    chaos: Option<TimerHandle>,
    /// Score already folded into the session total.
    settled: bool,
}

impl ActiveRound {
    fn stop_timers(&mut self) {
        if let Some(countdown) = self.countdown.take() {
            countdown.cancel();
        }
        if let Some(chaos) = self.chaos.take() {
            chaos.cancel();
        }
    }
}

struct PendingAdvance {
    round: RoundId,
    timer: TimerHandle,
}

/// Orchestrates rounds for one playthrough.
pub struct SessionController {
    config: GameConfig,
    session: SessionState,
    round: Option<ActiveRound>,
    pending_advance: Option<PendingAdvance>,
    /// Session the last failed setup tried to start; `start_round` retries it.
    failed_setup: Option<SessionState>,
    status: SessionStatus,
    sampler: UniqueIdSampler,
    catalog: Arc<dyn ItemCatalog>,
    scheduler: Arc<dyn Scheduler>,
    events: EventBus,
    rng: StdRng,
    next_round: u64,
}

impl SessionController {
    pub fn new(
        config: GameConfig,
        tier: DifficultyTier,
        catalog: Arc<dyn ItemCatalog>,
        scheduler: Arc<dyn Scheduler>,
        events: EventBus,
        rng: StdRng,
    ) -> Self {
        Self {
            sampler: UniqueIdSampler::new(config.catalog_size),
            config,
            session: SessionState::new(tier),
            round: None,
            pending_advance: None,
            failed_setup: None,
            status: SessionStatus::Idle,
            catalog,
            scheduler,
            events,
            rng,
            next_round: 1,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref().map(|round| &round.state)
    }

    pub fn round_id(&self) -> Option<RoundId> {
        self.round.as_ref().map(|round| round.id)
    }

    pub fn layout(&self) -> Option<&BoardLayout> {
        self.round.as_ref().map(|round| &round.layout)
    }

    /// Live score: carried total plus the running delta of an unsettled round.
    pub fn score(&self) -> i64 {
        let running = self
            .round
            .as_ref()
            .filter(|round| !round.settled)
            .map_or(0, |round| round.state.score());
        self.session.total_score + running
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            level: self.session.level,
            score: self.score(),
            tier: self.session.tier,
            status: self.status,
            round: self.round.as_ref().map(|round| RoundSnapshot {
                id: round.id,
                phase: round.state.phase(),
                matched_count: round.state.matched_count(),
                item_count: round.state.item_count(),
                seconds_remaining: round.state.seconds_remaining(),
                round_score: round.state.score(),
                board: round.layout.clone(),
            }),
        }
    }

    /// Starts the first round of the session, or retries the last failed setup.
    ///
    /// Rejected once a round is under way: progression goes through the level
    /// advance, and [`Self::on_restart`] or [`Self::on_difficulty_changed`]
    /// start over.
    pub async fn start_round(&mut self) -> Result<RoundId> {
        if !matches!(self.status, SessionStatus::Idle | SessionStatus::SetupFailed) {
            return Err(RuntimeError::RoundAlreadyStarted {
                status: self.status,
            });
        }

        let next = self
            .failed_setup
            .clone()
            .unwrap_or_else(|| self.session.clone());
        self.start_round_from(next).await
    }

    /// Builds and starts a round for `next`, committing `next` only on success.
    ///
    /// The current round is replaced only once the new one is ready. A failed
    /// setup keeps an active round playing; otherwise the session moves to
    /// [`SessionStatus::SetupFailed`] and `start_round` retries `next`.
    async fn start_round_from(&mut self, next: SessionState) -> Result<RoundId> {
        let config = next.round_config();
        debug!(
            target: "runtime::session",
            level = next.level,
            tier = %next.tier,
            item_count = config.item_count,
            duration_secs = config.duration_secs,
            "Preparing round"
        );

        let (ids, state) = match self.prepare_round(&next).await {
            Ok(prepared) => prepared,
            Err(error) => {
                warn!(
                    target: "runtime::session",
                    level = next.level,
                    code = error.error_code(),
                    severity = error.severity().as_str(),
                    error = %error,
                    "Round setup failed, session left unchanged"
                );
                self.events.outcome(OutcomeEvent::RoundStartFailed {
                    level: next.level,
                    error: error.to_string(),
                });
                let playing = self
                    .round
                    .as_ref()
                    .is_some_and(|round| round.state.is_active());
                if !playing {
                    self.teardown();
                    self.status = SessionStatus::SetupFailed;
                    self.failed_setup = Some(next);
                }
                return Err(error);
            }
        };

        self.teardown();

        let mut next = next;
        next.used_ids.extend(ids);
        self.session = next;
        self.failed_setup = None;

        let id = RoundId(self.next_round);
        self.next_round += 1;

        let layout = BoardLayout::shuffled(state.items(), &mut self.rng);
        self.events.board(BoardEvent::BoardRendered {
            round: id,
            items: state.items().to_vec(),
            images: layout.images.clone(),
            labels: layout.labels.clone(),
        });
        self.events.hud(HudEvent::LevelChanged {
            level: self.session.level,
        });
        self.events.hud(HudEvent::ScoreChanged {
            score: self.session.total_score,
        });
        self.events.hud(HudEvent::TimerTicked {
            seconds_remaining: state.seconds_remaining(),
        });

        let countdown = self.scheduler.schedule_repeating(
            Duration::from_secs(self.config.tick_secs.max(1)),
            TimerSignal::CountdownTick(id),
        );
        let chaos = self.scheduler.schedule_repeating(
            Duration::from_secs(self.config.chaos_period_secs.max(1)),
            TimerSignal::ChaosReshuffle(id),
        );

        info!(
            target: "runtime::session",
            round = %id,
            level = self.session.level,
            items = state.item_count(),
            seconds = state.seconds_remaining(),
            "Round started"
        );

        self.round = Some(ActiveRound {
            id,
            state,
            layout,
            countdown: Some(countdown),
            chaos: Some(chaos),
            settled: false,
        });
        self.status = SessionStatus::Playing;

        Ok(id)
    }

    async fn prepare_round(&mut self, next: &SessionState) -> Result<(Vec<ItemId>, RoundState)> {
        let config = next.round_config();
        let ids = self
            .sampler
            .sample_many(&mut self.rng, config.item_count, &next.used_ids)?;
        let items = catalog::fetch_all(&self.catalog, &ids).await?;
        let state = RoundState::new(items, config.duration_secs)?;
        Ok((ids, state))
    }

    /// Forwards a drop of `item` onto `target_label` to the round.
    ///
    /// A match that completes the board settles the round before returning,
    /// so no countdown tick can be observed afterwards.
    pub fn attempt_match(&mut self, item: ItemId, target_label: &str) -> Result<MatchOutcome> {
        let round = self.round.as_mut().ok_or(RuntimeError::NoActiveRound)?;
        let outcome = round.state.attempt_match(item, target_label)?;
        let round_id = round.id;
        let won = round.state.phase() == RoundPhase::Won;

        match outcome {
            MatchOutcome::Correct => {
                self.events.board(BoardEvent::MatchAccepted {
                    round: round_id,
                    item,
                    label: target_label.to_owned(),
                });
            }
            MatchOutcome::Incorrect => {
                debug!(target: "runtime::session", %item, label = target_label, "Incorrect match");
                self.events.hud(HudEvent::IncorrectMatch {
                    item,
                    label: target_label.to_owned(),
                });
            }
        }
        self.events.hud(HudEvent::ScoreChanged {
            score: self.score(),
        });

        if won {
            self.on_won();
        }

        Ok(outcome)
    }

    /// Advances the active round's countdown by one second.
    pub fn tick(&mut self) -> Result<TimerOutcome> {
        let round = self.round.as_mut().ok_or(RuntimeError::NoActiveRound)?;
        if !round.state.is_active() {
            return Ok(TimerOutcome::Expired);
        }

        let outcome = round.state.tick();
        self.events.hud(HudEvent::TimerTicked {
            seconds_remaining: round.state.seconds_remaining(),
        });

        if outcome == TimerOutcome::Expired {
            self.on_lost();
        }
        Ok(outcome)
    }

    /// Chaos step on the active round's labels. No-op without an active round.
    pub fn reshuffle_labels(&mut self) {
        let Some(round) = self.round.as_mut().filter(|round| round.state.is_active()) else {
            return;
        };

        round
            .layout
            .labels
            .perturb(&mut self.rng, self.config.flip_chance);
        self.events.board(BoardEvent::LabelsReshuffled {
            round: round.id,
            labels: round.layout.labels.clone(),
        });
    }

    /// Settles a won round: stops its timers, folds its score and schedules
    /// the next level. Does nothing unless the current round is won and unsettled.
    pub fn on_won(&mut self) {
        let Some(round) = self
            .round
            .as_mut()
            .filter(|round| round.state.phase() == RoundPhase::Won && !round.settled)
        else {
            return;
        };

        round.stop_timers();
        round.settled = true;
        let round_id = round.id;
        self.session.fold_round_score(round.state.score());

        let delay_secs = self.config.level_advance_delay_secs;
        info!(
            target: "runtime::session",
            round = %round_id,
            level = self.session.level,
            score = self.session.total_score,
            "Round won"
        );
        self.events.outcome(OutcomeEvent::RoundWon {
            round: round_id,
            level: self.session.level,
            score: self.session.total_score,
            advance_in_secs: delay_secs,
        });

        let timer = self.scheduler.schedule_once(
            Duration::from_secs(delay_secs),
            TimerSignal::LevelAdvance(round_id),
        );
        self.pending_advance = Some(PendingAdvance {
            round: round_id,
            timer,
        });
        self.status = SessionStatus::AwaitingAdvance;
    }

    /// Settles a lost round: stops its timers and folds its score.
    /// The player continues with [`Self::on_restart`].
    pub fn on_lost(&mut self) {
        let Some(round) = self
            .round
            .as_mut()
            .filter(|round| round.state.phase() == RoundPhase::Lost && !round.settled)
        else {
            return;
        };

        round.stop_timers();
        round.settled = true;
        let round_id = round.id;
        self.session.fold_round_score(round.state.score());

        info!(
            target: "runtime::session",
            round = %round_id,
            level = self.session.level,
            score = self.session.total_score,
            "Round lost"
        );
        self.events.outcome(OutcomeEvent::RoundLost {
            round: round_id,
            level: self.session.level,
            score: self.session.total_score,
        });
        self.status = SessionStatus::GameOver;
    }

    /// Next level: level + 1, used ids cleared, score kept.
    pub async fn on_level_advance(&mut self) -> Result<RoundId> {
        if let Some(pending) = self.pending_advance.take() {
            pending.timer.cancel();
        }
        let next = self.session.advanced();
        self.start_round_from(next).await
    }

    /// Manual retry: level 1, score 0, used ids cleared.
    pub async fn on_restart(&mut self) -> Result<RoundId> {
        let next = self.session.restarted();
        self.start_round_from(next).await
    }

    /// New tier: level 1, score 0, used ids cleared.
    pub async fn on_difficulty_changed(&mut self, tier: DifficultyTier) -> Result<RoundId> {
        if tier.is_fallback() {
            warn!(
                target: "runtime::session",
                "Unrecognized difficulty, using default round parameters"
            );
        }
        let next = self.session.with_tier(tier);
        self.start_round_from(next).await
    }

    /// Routes a timer signal, ignoring signals of rounds that are no longer current.
    pub async fn on_timer(&mut self, signal: TimerSignal) -> Result<()> {
        let active = self
            .round
            .as_ref()
            .filter(|round| round.state.is_active())
            .map(|round| round.id);

        match signal {
            TimerSignal::CountdownTick(id) if active == Some(id) => {
                self.tick()?;
            }
            TimerSignal::ChaosReshuffle(id) if active == Some(id) => {
                self.reshuffle_labels();
            }
            TimerSignal::LevelAdvance(id)
                if self.pending_advance.as_ref().map(|p| p.round) == Some(id) =>
            {
                self.on_level_advance().await?;
            }
            stale => {
                debug!(
                    target: "runtime::session",
                    signal = stale.as_str(),
                    round = %stale.round(),
                    "Ignoring stale timer signal"
                );
            }
        }
        Ok(())
    }

    /// Cancels every timer and drops the current round.
    pub fn teardown(&mut self) {
        if let Some(mut round) = self.round.take() {
            round.stop_timers();
        }
        if let Some(pending) = self.pending_advance.take() {
            pending.timer.cancel();
        }
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.teardown();
    }
}
