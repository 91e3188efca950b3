use serde::Serialize;

use super::domain::RecommendedStep;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanStepView {
    pub step: RecommendedStep,
    pub title: &'static str,
    pub description: &'static str,
    pub recommended: bool,
}

/// Every PTM step in order, highlighting the one recommended by the latest assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreatmentPlan {
    pub recommended_step: Option<RecommendedStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<&'static str>,
    pub steps: Vec<PlanStepView>,
}

impl TreatmentPlan {
    pub fn for_step(recommended_step: Option<RecommendedStep>) -> Self {
        let steps = RecommendedStep::ALL
            .into_iter()
            .map(|step| PlanStepView {
                step,
                title: step.plan_title(),
                description: step.plan_description(),
                recommended: recommended_step == Some(step),
            })
            .collect();

        Self {
            recommended_step,
            recommendation: recommended_step.map(RecommendedStep::recommendation),
            steps,
        }
    }
}
