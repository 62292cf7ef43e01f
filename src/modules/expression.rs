use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::ExpressifyError;

/// Expression labels the classifier can produce. `Neutral` is the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expression {
    Happy,
    Sad,
    Surprised,
    #[default]
    Neutral,
}

/// Display text shown to the player for one expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpressionLabel {
    pub expression: Expression,
    pub label: &'static str,
    pub display_name: &'static str,
    pub tip: &'static str,
}

static EXPRESSION_LABELS: [ExpressionLabel; 4] = [
    ExpressionLabel {
        expression: Expression::Happy,
        label: "happy",
        display_name: "😊 SENYUM LEBAR!",
        tip: "😊 SENYUM LEBAR! Angkat sudut bibir ke atas!",
    },
    ExpressionLabel {
        expression: Expression::Sad,
        label: "sad",
        display_name: "😢 CEMBERUT SEDIH!",
        tip: "😢 CEMBERUT! Turunkan sudut bibir & rileks wajah",
    },
    ExpressionLabel {
        expression: Expression::Surprised,
        label: "surprised",
        display_name: "😲 KAGET MAKSIMAL!",
        tip: "😲 KAGET! Buka mulut lebar & angkat alis!",
    },
    ExpressionLabel {
        expression: Expression::Neutral,
        label: "neutral",
        display_name: "😐 WAJAH DATAR!",
        tip: "😐 WAJAH DATAR! Rileks & jangan ekspresikan apa-apa",
    },
];

impl Expression {
    pub const ALL: [Expression; 4] = [
        Expression::Happy,
        Expression::Sad,
        Expression::Surprised,
        Expression::Neutral,
    ];

    /// Read-only view of the display table.
    pub fn labels() -> &'static [ExpressionLabel] {
        &EXPRESSION_LABELS
    }

    pub fn label_info(self) -> &'static ExpressionLabel {
        let idx = match self {
            Expression::Happy => 0,
            Expression::Sad => 1,
            Expression::Surprised => 2,
            Expression::Neutral => 3,
        };
        &EXPRESSION_LABELS[idx]
    }

    pub fn as_str(self) -> &'static str {
        self.label_info().label
    }

    pub fn display_name(self) -> &'static str {
        self.label_info().display_name
    }

    pub fn tip(self) -> &'static str {
        self.label_info().tip
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Expression {
    type Err = ExpressifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        EXPRESSION_LABELS
            .iter()
            .find(|entry| entry.label.eq_ignore_ascii_case(needle))
            .map(|entry| entry.expression)
            .ok_or_else(|| ExpressifyError::UnknownExpression(s.to_string()))
    }
}
