//! The bias analyzer: fan out every dimension, combine with the RMS norm.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::info;
use verdict_core::errors::ensure_finite;
use verdict_core::models::{BiasReport, SeverityTier};
use verdict_core::VerdictResult;

use super::context::BiasContext;
use super::dimensions::{default_dimensions, BiasDimension};

/// Computes a [`BiasReport`] from an interchangeable set of dimension
/// strategies. Dimensions are independent, so they run in parallel; the
/// index-stable collect keeps the output deterministic.
pub struct BiasAnalyzer {
    dimensions: Vec<Box<dyn BiasDimension>>,
}

impl BiasAnalyzer {
    pub fn new(dimensions: Vec<Box<dyn BiasDimension>>) -> Self {
        Self { dimensions }
    }

    /// Analyzer with the six shipped dimensions.
    pub fn with_default_dimensions() -> Self {
        Self::new(default_dimensions())
    }

    pub fn dimension_names(&self) -> Vec<&'static str> {
        self.dimensions.iter().map(|d| d.name()).collect()
    }

    /// Score every dimension and combine: `total_bias = sqrt(Σ score_d²)`.
    /// Any non-finite dimension score aborts the whole report.
    pub fn analyze(&self, ctx: &BiasContext<'_>) -> VerdictResult<BiasReport> {
        let scored: Vec<VerdictResult<(&'static str, f64)>> = self
            .dimensions
            .par_iter()
            .map(|dimension| dimension.score(ctx).map(|score| (dimension.name(), score)))
            .collect();

        let mut per_dimension_scores = BTreeMap::new();
        for result in scored {
            let (name, score) = result?;
            let score = ensure_finite(score, "bias dimension score", name)?;
            per_dimension_scores.insert(name.to_string(), score.clamp(0.0, 1.0));
        }

        let total_bias = ensure_finite(
            per_dimension_scores
                .values()
                .map(|score| score * score)
                .sum::<f64>()
                .sqrt(),
            "total bias",
            &ctx.scope,
        )?;
        let severity = SeverityTier::from_total_bias(total_bias);

        info!(
            scope = %ctx.scope,
            total_bias,
            severity = %severity,
            "bias analysis complete"
        );

        Ok(BiasReport {
            scope: ctx.scope.clone(),
            per_dimension_scores,
            total_bias,
            severity,
        })
    }
}

impl Default for BiasAnalyzer {
    fn default() -> Self {
        Self::with_default_dimensions()
    }
}
