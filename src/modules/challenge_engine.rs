use std::time::Duration;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};
use crate::config::difficulty::DifficultyProfile;
use crate::modules::expression::Expression;
use crate::utils::clock::{Clock, MonotonicClock};

/// Seconds one challenge nominally lasts. Only used to derive the score
/// estimate shown next to the final score; it is not enforced.
pub const NOMINAL_CHALLENGE_SECONDS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    Idle,
    Running,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOutcome {
    Scored,
    NoScore,
}

impl UpdateOutcome {
    pub fn is_scored(self) -> bool {
        self == UpdateOutcome::Scored
    }
}

/// What the presentation layer reads once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChallengeSnapshot {
    pub state: EngineState,
    pub current_target: Option<Expression>,
    pub score: u32,
    pub max_score_estimate: u32,
    pub remaining_seconds: f64,
    pub is_over: bool,
}

/// Challenge and scoring state machine for one difficulty profile.
///
/// The engine is driven by polling: call `update` once per tick with the
/// latest classified expression. It never ends a session on its own; callers
/// watch `is_over`. Mutation needs a single owner.
#[derive(Debug, Clone)]
pub struct ChallengeEngine<C = MonotonicClock, R = StdRng> {
    profile: DifficultyProfile,
    clock: C,
    rng: R,
    current_target: Option<Expression>,
    score: u32,
    max_score_estimate: u32,
    started_at: Option<Duration>,
    last_scored_at: Option<Duration>,
}

impl ChallengeEngine {
    /// Engine on the monotonic clock with an entropy-seeded RNG.
    pub fn new(profile: DifficultyProfile) -> Self {
        ChallengeEngine::with_parts(profile, MonotonicClock::new(), StdRng::from_entropy())
    }
}

impl<C: Clock> ChallengeEngine<C, StdRng> {
    /// Engine whose target sequence is reproducible for a given seed.
    pub fn seeded(profile: DifficultyProfile, clock: C, seed: u64) -> Self {
        ChallengeEngine::with_parts(profile, clock, StdRng::seed_from_u64(seed))
    }
}

impl<C: Clock, R: Rng> ChallengeEngine<C, R> {
    pub fn with_parts(profile: DifficultyProfile, clock: C, rng: R) -> Self {
        ChallengeEngine {
            profile,
            clock,
            rng,
            current_target: None,
            score: 0,
            max_score_estimate: 0,
            started_at: None,
            last_scored_at: None,
        }
    }

    /// Fresh idle engine for another profile that keeps this engine's clock
    /// and random source.
    pub fn with_profile(&self, profile: DifficultyProfile) -> Self
    where
        C: Clone,
        R: Clone,
    {
        ChallengeEngine::with_parts(profile, self.clock.clone(), self.rng.clone())
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Builds a fresh engine for `profile` and starts it. This engine is left
    /// untouched; profiles are never swapped on a live session.
    pub fn start_with(&self, profile: DifficultyProfile) -> Self
    where
        C: Clone,
        R: Clone,
    {
        let mut engine = self.with_profile(profile);
        engine.start();
        engine
    }

    /// Starts, or restarts, a session with the engine's own profile.
    pub fn start(&mut self) {
        let now = self.clock.now();
        self.started_at = Some(now);
        self.last_scored_at = Some(now);
        self.score = 0;
        self.max_score_estimate = (self.profile.duration_seconds() / NOMINAL_CHALLENGE_SECONDS).floor() as u32;
        let target = self.sample_target();
        self.current_target = Some(target);
        info!(
            difficulty = self.profile.display_name(),
            %target,
            max_score_estimate = self.max_score_estimate,
            "challenge started"
        );
    }

    /// update scores a match against the current target once the cooldown has passed.
    ///
    /// Does nothing unless the engine is running. A successful match picks the
    /// next target uniformly from the profile, which may repeat the last one.
    ///
    /// # Arguments
    /// * `detected` - expression classified for this tick
    ///
    /// # Returns
    /// * `UpdateOutcome`
    pub fn update(&mut self, detected: Expression) -> UpdateOutcome {
        if self.state() != EngineState::Running {
            return UpdateOutcome::NoScore;
        }
        let (Some(target), Some(last_scored_at)) = (self.current_target, self.last_scored_at) else {
            return UpdateOutcome::NoScore;
        };
        if detected != target {
            return UpdateOutcome::NoScore;
        }

        let now = self.clock.now();
        if now.saturating_sub(last_scored_at) < self.profile.cooldown() {
            debug!(%detected, "match inside cooldown");
            return UpdateOutcome::NoScore;
        }

        self.score += 1;
        self.last_scored_at = Some(now);
        let next = self.sample_target();
        self.current_target = Some(next);
        info!(score = self.score, matched = %detected, next = %next, "challenge scored");
        UpdateOutcome::Scored
    }

    /// Time since `start`, or `None` while idle.
    pub fn elapsed(&self) -> Option<Duration> {
        self.started_at.map(|started| self.clock.now().saturating_sub(started))
    }

    /// True once the profile duration has elapsed. False while idle.
    pub fn is_over(&self) -> bool {
        match self.elapsed() {
            Some(elapsed) => elapsed >= self.profile.duration(),
            None => false,
        }
    }

    /// Time left in the session, clamped at zero. Idle engines report the
    /// full duration.
    pub fn remaining_time(&self) -> Duration {
        match self.elapsed() {
            Some(elapsed) => self.profile.duration().saturating_sub(elapsed),
            None => self.profile.duration(),
        }
    }

    pub fn remaining_seconds(&self) -> f64 {
        self.remaining_time().as_secs_f64()
    }

    /// Back to idle. Safe from any state.
    pub fn reset(&mut self) {
        self.current_target = None;
        self.score = 0;
        self.max_score_estimate = 0;
        self.started_at = None;
        self.last_scored_at = None;
        info!(difficulty = self.profile.display_name(), "challenge reset");
    }

    pub fn state(&self) -> EngineState {
        if self.started_at.is_none() {
            EngineState::Idle
        } else if self.is_over() {
            EngineState::Finished
        } else {
            EngineState::Running
        }
    }

    pub fn current_target(&self) -> Option<Expression> {
        self.current_target
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn max_score_estimate(&self) -> u32 {
        self.max_score_estimate
    }

    pub fn snapshot(&self) -> ChallengeSnapshot {
        ChallengeSnapshot {
            state: self.state(),
            current_target: self.current_target,
            score: self.score,
            max_score_estimate: self.max_score_estimate,
            remaining_seconds: self.remaining_seconds(),
            is_over: self.is_over(),
        }
    }

    fn sample_target(&mut self) -> Expression {
        // Profiles reject empty expression sets, so the fallback never fires.
        self.profile
            .expression_set()
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_default()
    }
}
