use crate::config::MarketplaceConfig;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// How percentages are rendered on scoresheets and report cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreDisplay {
    pub decimals: u32,
    pub placeholder: String,
}

impl ScoreDisplay {
    pub fn from_config(config: &MarketplaceConfig) -> Self {
        Self {
            decimals: config.score_decimals,
            placeholder: config.empty_placeholder.clone(),
        }
    }

    /// `"92.35%"` for a present score, the placeholder otherwise.
    pub fn format(&self, score: Option<f64>) -> String {
        match score.and_then(|value| to_decimal(value, self.decimals)) {
            Some(rounded) => format!("{:.*}%", self.decimals as usize, rounded),
            None => self.placeholder.clone(),
        }
    }
}

impl Default for ScoreDisplay {
    fn default() -> Self {
        Self::from_config(&MarketplaceConfig::default())
    }
}

/// Rounds half away from zero on the shortest decimal form of `value`, so
/// `92.345` becomes `92.35` even though its binary value sits just below.
pub fn round_score(value: f64, decimals: u32) -> f64 {
    to_decimal(value, decimals)
        .and_then(|rounded| rounded.to_f64())
        .unwrap_or(value)
}

fn to_decimal(value: f64, decimals: u32) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    // Values with more fractional digits than a Decimal holds go through the binary form.
    Decimal::from_str_exact(&value.to_string())
        .ok()
        .or_else(|| Decimal::from_f64_retain(value))
        .map(|exact| exact.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero))
}
