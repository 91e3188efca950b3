//! Progressive Tinnitus Management care path, projected from activity counts.
//!
//! Nothing here is persisted: every read recomputes the five stage statuses from the number of
//! screenings, the number of THS assessments, and the most recent recommended step.

use serde::{Deserialize, Serialize};

use super::domain::RecommendedStep;
use crate::workflows::InvalidInput;

const FIRST_LEVEL: u8 = 1;
const LAST_LEVEL: u8 = 5;

/// The three facts the care path is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CarePathFacts {
    pub screening_count: i64,
    pub assessment_count: i64,
    pub latest_recommended_step: Option<RecommendedStep>,
}

/// One of the five ordered PTM milestones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareStage {
    Screener,
    Evaluation,
    Education,
    SoundTherapy,
    IndividualizedSupport,
}

impl CareStage {
    pub const ALL: [CareStage; 5] = [
        CareStage::Screener,
        CareStage::Evaluation,
        CareStage::Education,
        CareStage::SoundTherapy,
        CareStage::IndividualizedSupport,
    ];

    pub const fn level(self) -> u8 {
        match self {
            CareStage::Screener => 1,
            CareStage::Evaluation => 2,
            CareStage::Education => 3,
            CareStage::SoundTherapy => 4,
            CareStage::IndividualizedSupport => 5,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            CareStage::Screener => "Level 1: Triage & referral",
            CareStage::Evaluation => "Level 2: Audiologic evaluation",
            CareStage::Education => "Level 3: Skills education",
            CareStage::SoundTherapy => "Level 4: Sound therapy",
            CareStage::IndividualizedSupport => "Level 5: Individualized support",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            CareStage::Screener => "Complete your tinnitus screener to triage needs.",
            CareStage::Evaluation => "Finish the THS assessment and tinnitus interview.",
            CareStage::Education => "Learn coping skills, sound strategies, and daily routines.",
            CareStage::SoundTherapy => "Use sound masking and relaxation guidance.",
            CareStage::IndividualizedSupport => "Coordinate advanced care and long-term support.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Completed,
    Current,
    Locked,
}

impl StageStatus {
    pub const fn label(self) -> &'static str {
        match self {
            StageStatus::Completed => "Completed",
            StageStatus::Current => "Current",
            StageStatus::Locked => "Locked",
        }
    }

    /// Call to action offered for a stage in this status.
    pub const fn action_label(self) -> &'static str {
        match self {
            StageStatus::Completed => "Review",
            StageStatus::Current => "Continue",
            StageStatus::Locked => "Locked",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CareStageView {
    pub level: u8,
    pub stage: CareStage,
    pub title: &'static str,
    pub description: &'static str,
    pub completed: bool,
    pub status: StageStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarePath {
    pub current_level: u8,
    pub stages: Vec<CareStageView>,
}

impl CarePath {
    pub fn current_stage(&self) -> Option<&CareStageView> {
        self.stages
            .iter()
            .find(|stage| stage.status == StageStatus::Current)
    }

    pub fn stage(&self, stage: CareStage) -> Option<&CareStageView> {
        self.stages.iter().find(|view| view.stage == stage)
    }
}

/// Project the care path for the given facts.
///
/// The current level is the higher of the level unlocked by the latest recommendation and the
/// level implied by having screened at all, clamped to 1..=5.
pub fn derive_care_path(facts: &CarePathFacts) -> Result<CarePath, InvalidInput> {
    if facts.screening_count < 0 {
        return Err(InvalidInput::new(
            "screening_count",
            format!("{} is negative", facts.screening_count),
        ));
    }
    if facts.assessment_count < 0 {
        return Err(InvalidInput::new(
            "assessment_count",
            format!("{} is negative", facts.assessment_count),
        ));
    }

    let recommended_level = facts
        .latest_recommended_step
        .map(RecommendedStep::care_level)
        .unwrap_or(FIRST_LEVEL);
    let default_level = if facts.screening_count > 0 { 2 } else { FIRST_LEVEL };
    let current_level = recommended_level
        .max(default_level)
        .clamp(FIRST_LEVEL, LAST_LEVEL);

    let stages = CareStage::ALL
        .into_iter()
        .map(|stage| {
            let level = stage.level();
            let completed = match stage {
                CareStage::Screener => facts.screening_count > 0,
                CareStage::Evaluation => facts.assessment_count > 0,
                _ => current_level > level,
            };
            let status = if completed || level < current_level {
                StageStatus::Completed
            } else if level == current_level {
                StageStatus::Current
            } else {
                StageStatus::Locked
            };

            CareStageView {
                level,
                stage,
                title: stage.title(),
                description: stage.description(),
                completed,
                status,
            }
        })
        .collect();

    Ok(CarePath {
        current_level,
        stages,
    })
}
