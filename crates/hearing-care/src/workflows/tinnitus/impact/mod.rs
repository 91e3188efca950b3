mod policy;
mod rules;

pub use policy::impact_for_total;
pub use rules::{SECTION_C_BONUS, SECTION_SCORE_RANGE};

use serde::{Deserialize, Serialize};

use super::domain::{ImpactBand, RecommendedStep, TinnitusImpactInputs};
use crate::workflows::InvalidInput;

/// Impact band and the PTM step it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactAssessment {
    pub impact: ImpactBand,
    #[serde(rename = "recommended_step")]
    pub step: RecommendedStep,
}

impl ImpactAssessment {
    pub fn recommendation(&self) -> &'static str {
        self.step.recommendation()
    }
}

/// Band the THS section scores and recommend a stepped-care level.
///
/// Scores outside 0..=10 are rejected rather than clamped.
pub fn classify_impact(inputs: &TinnitusImpactInputs) -> Result<ImpactAssessment, InvalidInput> {
    rules::validate_sections(inputs)?;
    Ok(impact_for_total(rules::total_score(inputs)))
}
