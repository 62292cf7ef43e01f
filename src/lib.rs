pub mod utils;
pub mod pipeline;
pub mod config;
pub mod helper;
pub mod modules;
pub mod error;

pub use config::config::ClassifierConfig;
pub use config::difficulty::{Difficulty, DifficultyCatalog, DifficultyProfile};
pub use error::ExpressifyError;
pub use helper::metrics_helper::FaceMetrics;
pub use modules::challenge_engine::{ChallengeEngine, ChallengeSnapshot, EngineState, UpdateOutcome};
pub use modules::expression::Expression;
pub use modules::expression_classifier::{Classification, ExpressionClassifier};
pub use pipeline::pipeline::{GamePipeline, TickReport};
pub use utils::coordinate::{Coordinate2D, LandmarkSet};
