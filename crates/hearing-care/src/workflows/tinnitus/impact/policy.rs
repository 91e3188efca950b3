use super::super::domain::{ImpactBand, RecommendedStep};
use super::ImpactAssessment;

/// Inclusive upper bound of each band. Calibrated clinical cut points; not tunable.
const BANDS: [(u32, ImpactBand, RecommendedStep); 4] = [
    (7, ImpactBand::None, RecommendedStep::Step2),
    (15, ImpactBand::Mild, RecommendedStep::Step3),
    (25, ImpactBand::Moderate, RecommendedStep::Step4),
    (35, ImpactBand::Severe, RecommendedStep::Step5),
];

/// Look up the band for a summed THS total.
///
/// Validated section scores top out at 35, so `Catastrophic` is only reached by totals from
/// callers that relax the section bounds.
pub fn impact_for_total(total: u32) -> ImpactAssessment {
    BANDS
        .iter()
        .find(|(upper, _, _)| total <= *upper)
        .map(|&(_, impact, step)| ImpactAssessment { impact, step })
        .unwrap_or(ImpactAssessment {
            impact: ImpactBand::Catastrophic,
            step: RecommendedStep::Step6,
        })
}
