use thiserror::Error;
use validator::ValidationErrors;

use crate::services::provider::ProviderError;

/// Errors surfaced by the recommendation and planning entry points
#[derive(Debug, Error)]
pub enum PlanError {
    /// Malformed or out-of-range request field
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// A dataset could not be obtained from the provider
    #[error("Dataset unavailable: {dataset}")]
    DataUnavailable {
        dataset: String,
        #[source]
        source: ProviderError,
    },

    /// The caller cancelled planning before every day was composed
    #[error("Planning cancelled after {completed_days} day(s)")]
    Cancelled { completed_days: usize },
}

impl PlanError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn data_unavailable(dataset: impl Into<String>, source: ProviderError) -> Self {
        Self::DataUnavailable {
            dataset: dataset.into(),
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl From<ValidationErrors> for PlanError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, _)| field.to_string())
            .collect();
        fields.sort();

        let field = fields
            .into_iter()
            .next()
            .unwrap_or_else(|| "request".to_string());

        Self::Validation {
            field,
            message: errors.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(range(min = 1))]
        party_size: u32,
    }

    #[test]
    fn test_validation_errors_convert_with_field_name() {
        let err: PlanError = Probe { party_size: 0 }.validate().unwrap_err().into();
        match err {
            PlanError::Validation { field, .. } => assert_eq!(field, "party_size"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_data_unavailable_preserves_cause() {
        let err = PlanError::data_unavailable("hotels", ProviderError::Missing("hotels".into()));
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("Dataset not provided: hotels"));
    }
}
