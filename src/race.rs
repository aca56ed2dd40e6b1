use crate::cursor::{Keystroke, KeystrokeOutcome, TextCursor};
use crate::error::EngineError;
use crate::metrics::{self, WpmRecorder, WpmSample};
use crate::pacing;
use crate::participant::{Participant, ParticipantKind, ParticipantSpec};
use crate::reward::{self, RewardContext};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::time::Instant;

/// Tick period the shipped TUI drives the session at. The engine itself
/// only sees `RaceConfig::tick_ms`; hosts may pick any period.
pub const TICK_RATE_MS: u64 = 100;

pub const COUNTDOWN_SECS: f64 = 3.0;

/// How long latecomers get after the human finishes before the session
/// freezes.
pub const FINISH_GRACE_SECS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Pending,
    Countdown,
    Active,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaceConfig {
    pub tick_ms: u64,
    pub countdown_secs: f64,
    pub grace_secs: f64,
    /// Lanes required before the countdown starts: 1 covers practice,
    /// lobby contexts want at least 2.
    pub min_participants: usize,
    pub reward: RewardContext,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_RATE_MS,
            countdown_secs: COUNTDOWN_SECS,
            grace_secs: FINISH_GRACE_SECS,
            min_participants: 1,
            reward: RewardContext::default(),
        }
    }
}

/// Rendering view of one tick: a consistent copy of session state, never a
/// mid-mutation partial.
#[derive(Debug, Clone, Serialize)]
pub struct TickSnapshot {
    pub phase: Phase,
    pub participants: Vec<Participant>,
    pub elapsed_ms: u64,
    pub countdown: f64,
}

/// Fired through the finish callback the moment a lane crosses 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishEvent {
    pub participant_id: usize,
    pub position: usize,
    pub finish_ms: u64,
    pub reward: u32,
}

/// The aggregate race: owns the state machine, the clock, the participant
/// list, and every mutation path. Hosts drive it with `tick` from a single
/// timer and feed input through `submit_keystroke`; nothing else holds a
/// writable reference.
pub struct RaceSession {
    passage: String,
    phase: Phase,
    countdown_remaining: f64,
    started_at: Option<Instant>,
    first_key_at: Option<Instant>,
    human_finished_at: Option<u64>,
    participants: Vec<Participant>,
    human_lane: usize,
    cursor: TextCursor,
    recorder: WpmRecorder,
    config: RaceConfig,
    rng: StdRng,
    torn_down: bool,
    on_finish: Option<Box<dyn FnMut(FinishEvent) + Send>>,
}

impl RaceSession {
    pub fn start(
        passage: impl Into<String>,
        specs: &[ParticipantSpec],
        config: RaceConfig,
    ) -> Result<Self, EngineError> {
        Self::with_seed(passage, specs, config, rand::random())
    }

    /// Seeded variant; the same seed replays the same pacing draws.
    pub fn with_seed(
        passage: impl Into<String>,
        specs: &[ParticipantSpec],
        config: RaceConfig,
        seed: u64,
    ) -> Result<Self, EngineError> {
        let passage = passage.into();
        if passage.trim().is_empty() {
            return Err(EngineError::EmptyPassage);
        }
        let humans = specs
            .iter()
            .filter(|s| s.kind == ParticipantKind::Human)
            .count();
        if humans != 1 {
            return Err(EngineError::HumanCount(humans));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let participants: Vec<Participant> = specs
            .iter()
            .enumerate()
            .map(|(lane, spec)| Participant::from_spec(lane, spec, &mut rng))
            .collect();
        let human_lane = participants
            .iter()
            .position(|p| p.kind == ParticipantKind::Human)
            .unwrap_or(0);
        let cursor = TextCursor::new(&passage);
        let countdown_remaining = config.countdown_secs;

        Ok(Self {
            passage,
            phase: Phase::Pending,
            countdown_remaining,
            started_at: None,
            first_key_at: None,
            human_finished_at: None,
            participants,
            human_lane,
            cursor,
            recorder: WpmRecorder::new(),
            config,
            rng,
            torn_down: false,
            on_finish: None,
        })
    }

    /// Registers the callback fired once per participant on completion.
    pub fn on_participant_finished(&mut self, callback: impl FnMut(FinishEvent) + Send + 'static) {
        self.on_finish = Some(Box::new(callback));
    }

    /// One scheduled update. Safe to call from a timer that outlives the
    /// race: after `Finished` or `teardown` it mutates nothing.
    pub fn tick(&mut self) -> TickSnapshot {
        if self.torn_down || self.phase == Phase::Finished {
            return self.snapshot();
        }

        let mut events = Vec::new();
        match self.phase {
            Phase::Pending => {
                if self.participants.len() >= self.config.min_participants {
                    self.phase = Phase::Countdown;
                }
            }
            Phase::Countdown => {
                self.countdown_remaining -= self.config.tick_ms as f64 / 1000.0;
                if self.countdown_remaining <= 0.0 {
                    self.countdown_remaining = 0.0;
                    self.phase = Phase::Active;
                    // Authoritative zero-point for all elapsed-time math.
                    self.started_at = Some(Instant::now());
                }
            }
            Phase::Active => {
                let elapsed = self.elapsed_ms();
                for lane in 0..self.participants.len() {
                    if self.participants[lane].kind != ParticipantKind::Simulated
                        || self.participants[lane].has_finished()
                    {
                        continue;
                    }
                    let mut updated = self.participants[lane].clone();
                    updated.progress = pacing::advance(
                        &updated.profile,
                        self.config.tick_ms,
                        self.cursor.passage_chars(),
                        updated.progress,
                        &mut self.rng,
                    );
                    updated.wpm = updated.profile.target_wpm;
                    self.participants[lane] = updated;
                    if self.participants[lane].progress >= 100.0 {
                        events.extend(self.resolve_finish(lane, elapsed));
                    }
                }
                self.refresh_human();
                self.maybe_finish(elapsed);
            }
            Phase::Finished => {}
        }

        self.emit(events);
        self.snapshot()
    }

    /// Feeds one key event from the hosting UI. Input outside the active
    /// phase is silently rejected, never an error.
    pub fn submit_keystroke(&mut self, key: Keystroke) -> KeystrokeOutcome {
        if self.torn_down
            || self.phase != Phase::Active
            || self.participants[self.human_lane].has_finished()
        {
            return KeystrokeOutcome::default();
        }

        let outcome = self.cursor.apply(key);
        if outcome.accepted && self.first_key_at.is_none() {
            self.first_key_at = Some(Instant::now());
        }
        self.refresh_human();

        let mut events = Vec::new();
        if outcome.completed {
            let elapsed = self.elapsed_ms();
            events.extend(self.resolve_finish(self.human_lane, elapsed));
            self.maybe_finish(elapsed);
        }
        self.emit(events);
        outcome
    }

    /// Merges an inbound peer progress percentage as if the lane were
    /// locally simulated: monotonic, clamped, same finish resolution.
    pub fn apply_remote_progress(&mut self, participant_id: usize, progress: f64) {
        if self.torn_down || self.phase != Phase::Active {
            return;
        }
        let Some(lane) = self
            .participants
            .iter()
            .position(|p| p.id == participant_id && p.kind == ParticipantKind::Remote)
        else {
            return;
        };
        if self.participants[lane].has_finished() {
            return;
        }

        let mut updated = self.participants[lane].clone();
        updated.progress = progress.max(updated.progress).min(100.0);
        self.participants[lane] = updated;

        let mut events = Vec::new();
        if self.participants[lane].progress >= 100.0 {
            let elapsed = self.elapsed_ms();
            events.extend(self.resolve_finish(lane, elapsed));
            self.maybe_finish(elapsed);
        }
        self.emit(events);
    }

    /// Drops the session out of every future tick. Idempotent; scheduled
    /// callbacks that fire afterwards find a frozen session.
    pub fn teardown(&mut self) {
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn passage(&self) -> &str {
        &self.passage
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn human(&self) -> &Participant {
        &self.participants[self.human_lane]
    }

    pub fn cursor(&self) -> &TextCursor {
        &self.cursor
    }

    pub fn countdown_remaining(&self) -> f64 {
        self.countdown_remaining
    }

    pub fn wpm_samples(&self) -> &[WpmSample] {
        self.recorder.samples()
    }

    pub fn consistency(&self) -> f64 {
        self.recorder.consistency()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started_at
            .map(|t| t.elapsed().as_millis() as u64)
            .unwrap_or(0)
    }

    fn metrics_elapsed_ms(&self) -> u64 {
        self.first_key_at
            .map(|t| t.elapsed().as_millis() as u64)
            .unwrap_or(0)
    }

    fn snapshot(&self) -> TickSnapshot {
        TickSnapshot {
            phase: self.phase,
            participants: self.participants.clone(),
            elapsed_ms: self.elapsed_ms(),
            countdown: self.countdown_remaining,
        }
    }

    /// Rebuilds the human lane record from the validator and the metrics
    /// clock, applied as one record replacement. Once the lane finishes
    /// its final metrics stay frozen through the latecomer grace period.
    fn refresh_human(&mut self) {
        if self.participants[self.human_lane].has_finished() {
            return;
        }
        let metrics_elapsed = self.metrics_elapsed_ms();
        let mut human = self.participants[self.human_lane].clone();
        // Lane progress never regresses: a backspace pulls the cursor back
        // but the lane holds its furthest point until retyped past it.
        human.progress = human.progress.max(self.cursor.progress_pct());
        human.wpm = metrics::wpm(self.cursor.correct_chars(), metrics_elapsed);
        human.accuracy = metrics::accuracy(self.cursor.total_keypresses(), self.cursor.errors());
        self.participants[self.human_lane] = human;
        self.recorder
            .observe(self.cursor.correct_chars(), metrics_elapsed);
    }

    /// Assigns the next position and the reward; a lane is resolved at
    /// most once, in invocation-queue order, so simultaneous finishers in
    /// one tick still get strictly increasing positions.
    fn resolve_finish(&mut self, lane: usize, elapsed_ms: u64) -> Option<FinishEvent> {
        if self.participants[lane].has_finished() {
            return None;
        }
        let position = reward::next_position(&self.participants);
        let reward_value = self
            .config
            .reward
            .reward(self.cursor.passage_chars(), position);

        let mut finished = self.participants[lane].clone();
        finished.progress = 100.0;
        finished.finish_ms = Some(elapsed_ms);
        finished.position = Some(position);
        finished.reward = Some(reward_value);
        self.participants[lane] = finished;

        if self.participants[lane].kind == ParticipantKind::Human {
            self.human_finished_at = Some(elapsed_ms);
        }

        Some(FinishEvent {
            participant_id: self.participants[lane].id,
            position,
            finish_ms: elapsed_ms,
            reward: reward_value,
        })
    }

    fn maybe_finish(&mut self, elapsed_ms: u64) {
        let all_done = self.participants.iter().all(|p| p.has_finished());
        let grace_over = self
            .human_finished_at
            .map(|t| elapsed_ms >= t + (self.config.grace_secs * 1000.0) as u64)
            .unwrap_or(false);
        if all_done || grace_over {
            self.phase = Phase::Finished;
        }
    }

    fn emit(&mut self, events: Vec<FinishEvent>) {
        if let Some(callback) = self.on_finish.as_mut() {
            for event in events {
                callback(event);
            }
        }
    }
}
