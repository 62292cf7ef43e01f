use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use tracing::info;
use crate::config::config::ClassifierConfig;
use crate::config::difficulty::{Difficulty, DifficultyProfile};
use crate::helper::metrics_helper::FaceMetrics;
use crate::modules::challenge_engine::{ChallengeEngine, ChallengeSnapshot, UpdateOutcome};
use crate::modules::expression::Expression;
use crate::modules::expression_classifier::ExpressionClassifier;
use crate::modules::grading::{grade_score, ScoreGrade};
use crate::utils::clock::{Clock, MonotonicClock};
use crate::utils::coordinate::LandmarkSet;

/// Result of one polling tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickReport {
    pub detected: Expression,
    pub outcome: UpdateOutcome,
    pub snapshot: ChallengeSnapshot,
}

/// Wires the classifier to the challenge engine for the host's frame loop.
#[derive(Debug, Clone)]
pub struct GamePipeline<C = MonotonicClock, R = StdRng> {
    classifier: ExpressionClassifier,
    engine: ChallengeEngine<C, R>,
    difficulty: Difficulty,
    last_detected: Expression,
    last_metrics: Option<FaceMetrics>,
}

impl GamePipeline {
    /// new initializes a pipeline on the monotonic clock for the named difficulty.
    ///
    /// # Arguments
    /// * `difficulty_name` - `easy`, `medium` or `hard`; anything else selects `medium`
    /// * `config` - classifier thresholds
    pub fn new(difficulty_name: &str, config: ClassifierConfig) -> Self {
        let difficulty = Difficulty::from_name(difficulty_name);
        GamePipeline::with_engine(
            ExpressionClassifier::new(config),
            ChallengeEngine::new(difficulty.profile().clone()),
            difficulty,
        )
    }
}

impl<C: Clock + Clone, R: Rng + Clone> GamePipeline<C, R> {
    pub fn with_engine(classifier: ExpressionClassifier, engine: ChallengeEngine<C, R>, difficulty: Difficulty) -> Self {
        GamePipeline {
            classifier,
            engine,
            difficulty,
            last_detected: Expression::Neutral,
            last_metrics: None,
        }
    }

    /// select_difficulty replaces the engine with a fresh idle one for the
    /// named profile. Unknown names select `medium`.
    pub fn select_difficulty(&mut self, name: &str) -> Difficulty {
        let difficulty = Difficulty::from_name(name);
        self.use_profile(difficulty, difficulty.profile().clone());
        difficulty
    }

    /// Swaps in a custom profile, recorded under `difficulty` for leaderboard purposes.
    pub fn use_profile(&mut self, difficulty: Difficulty, profile: DifficultyProfile) {
        info!(difficulty = %difficulty, display_name = profile.display_name(), "difficulty selected");
        self.engine = self.engine.with_profile(profile);
        self.difficulty = difficulty;
        self.last_detected = Expression::Neutral;
        self.last_metrics = None;
    }

    pub fn start(&mut self) {
        self.engine.start();
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.last_detected = Expression::Neutral;
        self.last_metrics = None;
    }

    /// tick classifies one frame and feeds the label to the engine.
    ///
    /// # Arguments
    /// * `landmarks` - landmarks of the first face in the frame, if any
    /// * `frame_width` - capture width in pixels
    /// * `frame_height` - capture height in pixels
    ///
    /// # Returns
    /// * `TickReport`
    pub fn tick(&mut self, landmarks: Option<&LandmarkSet>, frame_width: u32, frame_height: u32) -> TickReport {
        let classification = self.classifier.evaluate(landmarks, frame_width, frame_height);
        self.last_detected = classification.expression;
        self.last_metrics = classification.metrics;

        let outcome = self.engine.update(classification.expression);
        TickReport {
            detected: classification.expression,
            outcome,
            snapshot: self.engine.snapshot(),
        }
    }

    /// Grade of the current score against the engine's estimate.
    pub fn grade(&self) -> ScoreGrade {
        grade_score(self.engine.score(), self.engine.max_score_estimate())
    }

    pub fn snapshot(&self) -> ChallengeSnapshot {
        self.engine.snapshot()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn engine(&self) -> &ChallengeEngine<C, R> {
        &self.engine
    }

    pub fn classifier(&self) -> &ExpressionClassifier {
        &self.classifier
    }

    pub fn last_detected(&self) -> Expression {
        self.last_detected
    }

    /// Metrics of the most recent frame that contained a usable face.
    /// Diagnostics only; never read back by the classifier.
    pub fn last_metrics(&self) -> Option<&FaceMetrics> {
        self.last_metrics.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use crate::config::difficulty::{Difficulty, DifficultyProfile};
    use crate::modules::challenge_engine::{ChallengeEngine, EngineState, UpdateOutcome};
    use crate::modules::expression::Expression;
    use crate::modules::expression_classifier::ExpressionClassifier;
    use crate::modules::grading::PerformanceRank;
    use crate::pipeline::pipeline::GamePipeline;
    use crate::utils::clock::ManualClock;
    use crate::utils::coordinate::LandmarkSet;
    use crate::utils::landmark::fixtures::{happy_face, neutral_face, sad_face, surprised_face, FRAME_HEIGHT, FRAME_WIDTH};

    fn pipeline(difficulty: Difficulty, seed: u64) -> (GamePipeline<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let engine = ChallengeEngine::seeded(difficulty.profile().clone(), clock.clone(), seed);
        (GamePipeline::with_engine(ExpressionClassifier::default(), engine, difficulty), clock)
    }

    fn face_for(expression: Expression) -> LandmarkSet {
        match expression {
            Expression::Happy => happy_face(),
            Expression::Sad => sad_face(),
            Expression::Surprised => surprised_face(),
            Expression::Neutral => neutral_face(),
        }
    }

    #[test]
    fn test_tick_before_start_only_classifies() {
        let (mut pipeline, _clock) = pipeline(Difficulty::Medium, 1);
        let report = pipeline.tick(Some(&happy_face()), FRAME_WIDTH, FRAME_HEIGHT);
        assert_eq!(report.detected, Expression::Happy);
        assert_eq!(report.outcome, UpdateOutcome::NoScore);
        assert_eq!(report.snapshot.state, EngineState::Idle);
        assert!(pipeline.last_metrics().is_some());
    }

    #[test]
    fn test_full_session_scores_matching_faces() {
        let (mut pipeline, clock) = pipeline(Difficulty::Hard, 21);
        pipeline.start();

        let mut scored = 0;
        while !pipeline.snapshot().is_over {
            clock.advance(Duration::from_millis(600));
            let target = pipeline.snapshot().current_target.unwrap();
            let report = pipeline.tick(Some(&face_for(target)), FRAME_WIDTH, FRAME_HEIGHT);
            if report.snapshot.is_over {
                assert_eq!(report.outcome, UpdateOutcome::NoScore);
                break;
            }
            assert_eq!(report.detected, target);
            assert!(report.outcome.is_scored());
            scored += 1;
        }

        // 0.6s ticks inside a 15s session
        assert_eq!(scored, 24);
        assert_eq!(pipeline.engine().score(), 24);
        assert_eq!(pipeline.grade().rank, PerformanceRank::S);
    }

    #[test]
    fn test_missing_face_never_scores_non_neutral_target() {
        let (mut pipeline, clock) = pipeline(Difficulty::Easy, 3);
        pipeline.start();
        clock.advance_secs(2.0);
        let report = pipeline.tick(None, FRAME_WIDTH, FRAME_HEIGHT);
        assert_eq!(report.detected, Expression::Neutral);
        assert_eq!(report.outcome, UpdateOutcome::NoScore);
        assert!(pipeline.last_metrics().is_none());
    }

    #[test]
    fn test_select_difficulty_rebuilds_engine() {
        let (mut pipeline, clock) = pipeline(Difficulty::Easy, 5);
        pipeline.start();
        clock.advance_secs(3.0);

        let selected = pipeline.select_difficulty("unknown");
        assert_eq!(selected, Difficulty::Medium);
        assert_eq!(pipeline.difficulty(), Difficulty::Medium);
        assert_eq!(pipeline.snapshot().state, EngineState::Idle);
        assert_eq!(pipeline.engine().profile().duration_seconds(), 20.0);

        pipeline.start();
        assert_eq!(pipeline.snapshot().max_score_estimate, 6);
    }

    #[test]
    fn test_custom_profile() {
        let (mut pipeline, clock) = pipeline(Difficulty::Medium, 9);
        let profile = DifficultyProfile::new(6.0, &[Expression::Sad], 0.25, "latihan").unwrap();
        pipeline.use_profile(Difficulty::Easy, profile);
        pipeline.start();
        clock.advance_secs(0.5);
        let report = pipeline.tick(Some(&sad_face()), FRAME_WIDTH, FRAME_HEIGHT);
        assert!(report.outcome.is_scored());
        assert_eq!(report.snapshot.current_target, Some(Expression::Sad));
    }

    #[test]
    fn test_reset_clears_diagnostics() {
        let (mut pipeline, clock) = pipeline(Difficulty::Medium, 2);
        pipeline.start();
        clock.advance_secs(1.0);
        pipeline.tick(Some(&surprised_face()), FRAME_WIDTH, FRAME_HEIGHT);
        pipeline.reset();
        assert_eq!(pipeline.last_detected(), Expression::Neutral);
        assert!(pipeline.last_metrics().is_none());
        assert_eq!(pipeline.snapshot().score, 0);
        assert_eq!(pipeline.snapshot().current_target, None);
    }
}
