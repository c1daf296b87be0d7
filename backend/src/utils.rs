use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use shared::validation::ValidationError;

pub fn parse_timestamp(raw: &str) -> Result<OffsetDateTime, ValidationError> {
    OffsetDateTime::parse(raw, &Rfc3339)
        .map_err(|_| ValidationError::InvalidTimestamp(raw.to_string()))
}

/// Range intervals are inclusive on both ends and must not be inverted.
pub fn validate_interval(from: OffsetDateTime, to: OffsetDateTime) -> Result<(), ValidationError> {
    if from >= to {
        Err(ValidationError::InvalidInterval)
    } else {
        Ok(())
    }
}
