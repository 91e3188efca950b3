use std::ops::RangeInclusive;

/// Rejection raised when a value falls outside its declared clinical domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: {reason}")]
pub struct InvalidInput {
    pub field: &'static str,
    pub reason: String,
}

impl InvalidInput {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_range<T>(
        field: &'static str,
        value: i64,
        range: RangeInclusive<T>,
    ) -> Self
    where
        T: std::fmt::Display,
    {
        let reason = format!("{value} is outside [{}, {}]", range.start(), range.end());
        Self::new(field, reason)
    }

    pub(crate) fn unrecognized(field: &'static str, value: &str) -> Self {
        Self::new(field, format!("'{value}' is not a recognized option"))
    }
}

/// Checks an integer form value against an inclusive range and narrows it.
pub(crate) fn bounded_u8(
    field: &'static str,
    value: i64,
    range: RangeInclusive<u8>,
) -> Result<u8, InvalidInput> {
    match u8::try_from(value) {
        Ok(narrowed) if range.contains(&narrowed) => Ok(narrowed),
        _ => Err(InvalidInput::out_of_range(field, value, range)),
    }
}

pub(crate) fn bounded_u16(
    field: &'static str,
    value: i64,
    range: RangeInclusive<u16>,
) -> Result<u16, InvalidInput> {
    match u16::try_from(value) {
        Ok(narrowed) if range.contains(&narrowed) => Ok(narrowed),
        _ => Err(InvalidInput::out_of_range(field, value, range)),
    }
}
