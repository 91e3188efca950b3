use crate::infra::InMemoryClinicalStore;
use clap::Args;
use hearing_care::error::AppError;
use hearing_care::workflows::patient::{PatientCareService, PatientId};
use hearing_care::workflows::tinnitus::{
    classify_impact, derive_care_path, CarePath, CarePathFacts, ImpactAssessment,
    OutcomeSubmission, RecommendedStep, ScreenerSubmission, SoundMaskingSubmission, ThsSubmission,
    TinnitusImpactInputs,
};
use hearing_care::workflows::triage::{
    classify_risk, FamilyHistory, HearingDifficulty, NoiseExposureBand, RiskLevel,
    TinnitusPresence, TriageAnswers, TriageSubmission,
};
use hearing_care::workflows::MEDICAL_DISCLAIMER;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct TriageArgs {
    /// Age in years (1-120)
    #[arg(long)]
    pub(crate) age: u8,
    /// Daily noise exposure: <1hr, 1-3hr, 4-6hr or 6+hr
    #[arg(long)]
    pub(crate) noise_exposure: NoiseExposureBand,
    /// No, Sometimes, Often or Always
    #[arg(long)]
    pub(crate) hearing_difficulty: HearingDifficulty,
    /// No, Occasionally or Frequently
    #[arg(long)]
    pub(crate) tinnitus: TinnitusPresence,
    /// No, Yes or Unsure
    #[arg(long)]
    pub(crate) family_history: FamilyHistory,
}

#[derive(Args, Debug)]
pub(crate) struct ImpactArgs {
    /// Section A score (0-10)
    #[arg(long)]
    pub(crate) section_a: u8,
    /// Section B score (0-10)
    #[arg(long)]
    pub(crate) section_b: u8,
    /// Section C screening was positive
    #[arg(long)]
    pub(crate) section_c: bool,
    /// Section D score (0-10)
    #[arg(long)]
    pub(crate) section_d: u8,
}

#[derive(Args, Debug)]
pub(crate) struct CarePathArgs {
    /// Number of completed tinnitus screeners
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) screenings: i64,
    /// Number of completed THS assessments
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) assessments: i64,
    /// Step recommended by the most recent assessment (step_2 .. step_6)
    #[arg(long)]
    pub(crate) latest_step: Option<RecommendedStep>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Patient identifier used for the walkthrough
    #[arg(long, default_value = "demo-patient")]
    pub(crate) patient: String,
    /// Print the medical disclaimer before the walkthrough
    #[arg(long)]
    pub(crate) show_disclaimer: bool,
}

pub(crate) fn run_triage(args: TriageArgs) -> Result<(), AppError> {
    let answers = TriageAnswers::new(
        args.age,
        args.noise_exposure,
        args.hearing_difficulty,
        args.tinnitus,
        args.family_history,
    )?;
    let risk = classify_risk(&answers)?;
    for line in render_risk(risk) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn run_impact(args: ImpactArgs) -> Result<(), AppError> {
    let inputs = TinnitusImpactInputs {
        section_a: args.section_a,
        section_b: args.section_b,
        section_c: args.section_c,
        section_d: args.section_d,
    };
    let assessment = classify_impact(&inputs)?;
    for line in render_impact(&assessment) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn run_care_path(args: CarePathArgs) -> Result<(), AppError> {
    let path = derive_care_path(&CarePathFacts {
        screening_count: args.screenings,
        assessment_count: args.assessments,
        latest_recommended_step: args.latest_step,
    })?;
    for line in render_care_path(&path) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(InMemoryClinicalStore::default());
    let service = PatientCareService::new(store.clone());
    let patient = PatientId(args.patient);

    if args.show_disclaimer {
        println!("{MEDICAL_DISCLAIMER}\n");
    }
    println!("Hearing care walkthrough for {patient}");

    let triage = service.assess_risk(Some(&patient), &demo_triage())?;
    println!("\n1. Hearing risk triage");
    for line in render_risk(triage.risk_level) {
        println!("   {line}");
    }

    let receipt = service.submit_screening(Some(&patient), &demo_screener())?;
    let screening_id = receipt.screening_id.map(|id| id.0);
    println!(
        "\n2. Tinnitus screener saved as {}",
        screening_id.as_deref().unwrap_or("(not saved)")
    );

    let record = service.submit_assessment(
        Some(&patient),
        &ThsSubmission {
            screening_id,
            section_a_score: 6,
            section_b_score: 5,
            section_c_screening: true,
            section_d_score: 4,
        },
    )?;
    println!("\n3. THS assessment {}", record.assessment_id.0);
    for line in render_impact(&record.assessment()) {
        println!("   {line}");
    }

    let recommendation =
        service.treatment_recommendation(Some(&patient), &record.assessment_id)?;
    println!("   Recommendation on file: {}", recommendation.recommendation);

    println!("\n4. Care path");
    let path = service.care_path(Some(&patient))?;
    for line in render_care_path(&path) {
        println!("   {line}");
    }

    println!("\n5. Treatment plan");
    let plan = service.treatment_plan(Some(&patient))?;
    for step in &plan.steps {
        let marker = if step.recommended { "*" } else { " " };
        println!("   {marker} {} - {}", step.title, step.description);
    }

    service.record_masking_session(
        Some(&patient),
        &SoundMaskingSubmission {
            sound_type: "pink_noise".to_string(),
            duration_minutes: 30,
            volume_level: 40,
        },
    )?;
    service.record_outcome(
        Some(&patient),
        &OutcomeSubmission {
            treatment_id: None,
            measurement_type: "ths".to_string(),
            score: 27,
            global_change: "a_little_better".to_string(),
        },
    )?;
    println!(
        "\n6. Follow-up: {} triage record(s), {} masking session(s), {} outcome measure(s) stored",
        store.triage_entries().len(),
        store.session_count(),
        store.outcome_count()
    );

    Ok(())
}

fn demo_triage() -> TriageSubmission {
    TriageSubmission {
        age: 48,
        noise_exposure: "4-6hr".to_string(),
        hearing_difficulty: "Sometimes".to_string(),
        tinnitus: "Frequently".to_string(),
        family_history: "Unsure".to_string(),
    }
}

fn demo_screener() -> ScreenerSubmission {
    ScreenerSubmission {
        duration: "persistent".to_string(),
        bothersomeness_score: 6,
        sleep_impact: "moderate".to_string(),
        concentration_impact: "mild".to_string(),
        emotional_impact: "mild".to_string(),
        hearing_difficulty: "sometimes".to_string(),
    }
}

fn render_risk(risk: RiskLevel) -> Vec<String> {
    vec![
        format!("Risk level: {} ({})", risk.title(), risk.label()),
        risk.guidance().to_string(),
    ]
}

fn render_impact(assessment: &ImpactAssessment) -> Vec<String> {
    vec![
        format!(
            "Impact: {} | recommended {}",
            assessment.impact, assessment.step
        ),
        format!(
            "{}: {}",
            assessment.step.plan_title(),
            assessment.recommendation()
        ),
    ]
}

fn render_care_path(path: &CarePath) -> Vec<String> {
    let mut lines = vec![format!("Current level: {}", path.current_level)];
    lines.extend(path.stages.iter().map(|stage| {
        format!(
            "[{:<9}] {} ({})",
            stage.status.label(),
            stage.title,
            stage.status.action_label()
        )
    }));
    lines
}
