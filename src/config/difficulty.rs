use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use tracing::warn;
use crate::error::ExpressifyError;
use crate::modules::expression::Expression;

/// Built-in difficulty levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Exact-name lookup. Unknown names, including other spellings, fall back to `Medium`.
    pub fn from_name(name: &str) -> Difficulty {
        match Difficulty::ALL.into_iter().find(|d| d.name() == name) {
            Some(difficulty) => difficulty,
            None => {
                warn!(name, "unknown difficulty, falling back to medium");
                Difficulty::Medium
            }
        }
    }

    pub fn profile(self) -> &'static DifficultyProfile {
        DifficultyCatalog::profile(self)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unvalidated profile fields as read from configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyProfileFields {
    pub duration_seconds: f64,
    pub expression_set: Vec<Expression>,
    pub cooldown_seconds: f64,
    pub display_name: String,
}

/// Parameters of one play session. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DifficultyProfileFields", into = "DifficultyProfileFields")]
pub struct DifficultyProfile {
    duration: Duration,
    expression_set: Vec<Expression>,
    cooldown: Duration,
    display_name: String,
}

impl DifficultyProfile {
    /// Builds a validated profile. Duplicate expressions are dropped, keeping
    /// first-seen order so uniform sampling stays uniform over distinct labels.
    pub fn new(
        duration_seconds: f64,
        expression_set: &[Expression],
        cooldown_seconds: f64,
        display_name: impl Into<String>,
    ) -> Result<Self, ExpressifyError> {
        let duration = match Duration::try_from_secs_f64(duration_seconds) {
            Ok(duration) if !duration.is_zero() => duration,
            _ => {
                return Err(ExpressifyError::InvalidProfile(format!(
                    "duration must be positive and representable, got {duration_seconds}"
                )))
            }
        };
        let cooldown = Duration::try_from_secs_f64(cooldown_seconds).map_err(|_| {
            ExpressifyError::InvalidProfile(format!(
                "cooldown must be non-negative and representable, got {cooldown_seconds}"
            ))
        })?;

        let mut distinct: Vec<Expression> = Vec::with_capacity(expression_set.len());
        for expression in expression_set {
            if !distinct.contains(expression) {
                distinct.push(*expression);
            }
        }
        if distinct.is_empty() {
            return Err(ExpressifyError::InvalidProfile(
                "expression set must not be empty".to_string(),
            ));
        }

        Ok(DifficultyProfile {
            duration,
            expression_set: distinct,
            cooldown,
            display_name: display_name.into(),
        })
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration.as_secs_f64()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn expression_set(&self) -> &[Expression] {
        &self.expression_set
    }

    pub fn cooldown_seconds(&self) -> f64 {
        self.cooldown.as_secs_f64()
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl From<DifficultyProfile> for DifficultyProfileFields {
    fn from(profile: DifficultyProfile) -> Self {
        DifficultyProfileFields {
            duration_seconds: profile.duration.as_secs_f64(),
            expression_set: profile.expression_set,
            cooldown_seconds: profile.cooldown.as_secs_f64(),
            display_name: profile.display_name,
        }
    }
}

impl TryFrom<DifficultyProfileFields> for DifficultyProfile {
    type Error = ExpressifyError;

    fn try_from(fields: DifficultyProfileFields) -> Result<Self, Self::Error> {
        DifficultyProfile::new(
            fields.duration_seconds,
            &fields.expression_set,
            fields.cooldown_seconds,
            fields.display_name,
        )
    }
}

static CATALOG: LazyLock<[DifficultyProfile; 3]> = LazyLock::new(|| {
    [
        DifficultyProfile {
            duration: Duration::from_secs(30),
            expression_set: vec![Expression::Happy, Expression::Sad],
            cooldown: Duration::from_millis(1500),
            display_name: "MUDAH".to_string(),
        },
        DifficultyProfile {
            duration: Duration::from_secs(20),
            expression_set: Expression::ALL.to_vec(),
            cooldown: Duration::from_secs(1),
            display_name: "SEDANG".to_string(),
        },
        DifficultyProfile {
            duration: Duration::from_secs(15),
            expression_set: Expression::ALL.to_vec(),
            cooldown: Duration::from_millis(500),
            display_name: "SULIT".to_string(),
        },
    ]
});

/// Read-only table of the built-in profiles.
pub struct DifficultyCatalog;

impl DifficultyCatalog {
    pub fn profile(difficulty: Difficulty) -> &'static DifficultyProfile {
        let idx = match difficulty {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        };
        &CATALOG[idx]
    }

    /// Looks a profile up by name; unknown names resolve to `medium`.
    pub fn get(name: &str) -> &'static DifficultyProfile {
        Self::profile(Difficulty::from_name(name))
    }

    pub fn entries() -> impl Iterator<Item = (Difficulty, &'static DifficultyProfile)> {
        Difficulty::ALL.into_iter().map(|d| (d, Self::profile(d)))
    }
}
