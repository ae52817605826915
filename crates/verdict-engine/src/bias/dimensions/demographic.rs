//! Demographic skew: do demographic cohorts vote differently?

use verdict_core::VerdictResult;

use super::{group_skew, BiasDimension};
use crate::bias::context::BiasContext;

pub struct DemographicDimension;

impl BiasDimension for DemographicDimension {
    fn name(&self) -> &'static str {
        "demographic"
    }

    fn score(&self, ctx: &BiasContext<'_>) -> VerdictResult<f64> {
        group_skew(ctx, |profile| profile.demographic_group.as_deref())
    }
}
