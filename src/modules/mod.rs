pub mod challenge_engine;
pub mod expression;
pub mod expression_classifier;
pub mod grading;
pub mod leaderboard;
