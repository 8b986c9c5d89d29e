//! Fusion strategy selection.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array3, ArrayView3};
use serde::Serialize;

use crate::error::FusionError;
use crate::rules::{self, CoefficientRule};

/// Selects the coefficient fusion rule.
///
/// `All` stands for every concrete strategy in [`FusionStrategy::BATCH`]
/// order and is only meaningful to batch runners.
///
/// # Example
///
/// ```
/// use tfuse_fusion::FusionStrategy;
///
/// let strategy: FusionStrategy = "macd".parse().unwrap();
/// assert_eq!(strategy, FusionStrategy::Macd);
/// assert_eq!(strategy.to_string(), "MACD");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum FusionStrategy {
    /// Element-wise average.
    Mean,
    /// Soft element-wise minimum.
    Min,
    /// Soft element-wise maximum.
    Max,
    /// Entropy-weighted blend.
    Entropy,
    /// Activity / match / decision.
    #[serde(rename = "MACD")]
    Macd,
    /// Edge-entropy-weighted blend.
    Edge,
    /// Tile-wise standard-deviation weighting.
    Deviation,
    /// Every concrete strategy.
    All,
}

/// The single strategy-to-rule table.
const RULES: [(FusionStrategy, CoefficientRule); 7] = [
    (FusionStrategy::Mean, rules::mean),
    (FusionStrategy::Min, rules::min),
    (FusionStrategy::Max, rules::max),
    (FusionStrategy::Entropy, rules::entropy),
    (FusionStrategy::Macd, rules::macd),
    (FusionStrategy::Edge, rules::edge),
    (FusionStrategy::Deviation, rules::deviation),
];

impl FusionStrategy {
    /// Concrete strategies in batch order.
    pub const BATCH: [FusionStrategy; 7] = [
        Self::Min,
        Self::Max,
        Self::Mean,
        Self::Entropy,
        Self::Macd,
        Self::Edge,
        Self::Deviation,
    ];

    /// Display name, also used as the result title.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mean => "Mean",
            Self::Min => "Min",
            Self::Max => "Max",
            Self::Entropy => "Entropy",
            Self::Macd => "MACD",
            Self::Edge => "Edge",
            Self::Deviation => "Deviation",
            Self::All => "All",
        }
    }

    /// Parses a case-insensitive strategy name.
    ///
    /// # Errors
    ///
    /// Returns [`FusionError::InvalidStrategy`] for unknown names.
    pub fn from_name(name: &str) -> Result<Self, FusionError> {
        let needle = name.trim();
        Self::BATCH
            .into_iter()
            .chain([Self::All])
            .find(|s| s.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| FusionError::InvalidStrategy(name.to_string()))
    }

    /// The rule implementing this strategy, or `None` for `All`.
    pub fn rule(&self) -> Option<CoefficientRule> {
        RULES
            .iter()
            .find(|(strategy, _)| strategy == self)
            .map(|(_, rule)| *rule)
    }

    /// Applies the strategy's rule to one pair of bands.
    ///
    /// # Errors
    ///
    /// Returns [`FusionError::InvalidStrategy`] for `All` and
    /// [`FusionError::ShapeMismatch`] if the bands differ in shape.
    pub fn apply(
        &self,
        a: ArrayView3<'_, f64>,
        b: ArrayView3<'_, f64>,
    ) -> Result<Array3<f64>, FusionError> {
        let rule = self.rule().ok_or_else(|| self.not_applicable())?;
        if a.dim() != b.dim() {
            return Err(FusionError::ShapeMismatch {
                left: a.dim(),
                right: b.dim(),
            });
        }
        Ok(rule(a, b))
    }

    pub(crate) fn not_applicable(&self) -> FusionError {
        FusionError::InvalidStrategy(format!(
            "{} is a batch selector and cannot fuse a single pair",
            self.name()
        ))
    }
}

impl FromStr for FusionStrategy {
    type Err = FusionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for FusionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
