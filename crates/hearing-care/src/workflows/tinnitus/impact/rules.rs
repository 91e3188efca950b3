use std::ops::RangeInclusive;

use super::super::domain::TinnitusImpactInputs;
use crate::workflows::validation::bounded_u8;
use crate::workflows::InvalidInput;

pub const SECTION_SCORE_RANGE: RangeInclusive<u8> = 0..=10;

/// Fixed contribution of a positive section C screening item.
pub const SECTION_C_BONUS: u32 = 5;

pub(crate) fn validate_sections(inputs: &TinnitusImpactInputs) -> Result<(), InvalidInput> {
    let sections = [
        ("section_a", inputs.section_a),
        ("section_b", inputs.section_b),
        ("section_d", inputs.section_d),
    ];
    for (field, score) in sections {
        bounded_u8(field, i64::from(score), SECTION_SCORE_RANGE)?;
    }
    Ok(())
}

pub(crate) fn total_score(inputs: &TinnitusImpactInputs) -> u32 {
    let bonus = if inputs.section_c { SECTION_C_BONUS } else { 0 };
    [inputs.section_a, inputs.section_b, inputs.section_d]
        .into_iter()
        .map(u32::from)
        .sum::<u32>()
        + bonus
}
