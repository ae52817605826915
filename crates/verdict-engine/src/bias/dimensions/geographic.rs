//! Geographic skew: do jurisdictions vote as blocs?

use verdict_core::VerdictResult;

use super::{group_skew, BiasDimension};
use crate::bias::context::BiasContext;

pub struct GeographicDimension;

impl BiasDimension for GeographicDimension {
    fn name(&self) -> &'static str {
        "geographic"
    }

    fn score(&self, ctx: &BiasContext<'_>) -> VerdictResult<f64> {
        group_skew(ctx, |profile| profile.jurisdiction.as_deref())
    }
}
