use thiserror::Error;

/// Errors that can occur while collecting ingredients or requesting a recipe
#[derive(Error, Debug)]
pub enum RecipeError {
    /// The request to the recipe provider failed at the transport level
    #[error("Failed to reach recipe provider: {0}")]
    Http(#[from] reqwest::Error),

    /// The recipe provider answered with a non-success status
    #[error("Recipe provider returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The recipe provider answered but the recipe text was missing
    #[error("Malformed response from recipe provider: {0}")]
    MalformedResponse(String),

    /// A recipe was requested without any ingredients
    #[error("Add at least one ingredient before asking for a recipe")]
    EmptyIngredients,

    /// A recipe request is already waiting for an answer
    #[error("A recipe request is already in flight")]
    FetchInFlight,

    /// Provider could not be created from configuration
    #[error("Provider error: {0}")]
    Provider(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error (binding the relay, reading stdin)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecipeError {
    /// Whether this failure came from the recipe provider rather than local input
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            RecipeError::Http(_)
                | RecipeError::UpstreamStatus { .. }
                | RecipeError::MalformedResponse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_classification() {
        let status = RecipeError::UpstreamStatus {
            status: 500,
            body: "boom".to_string(),
        };
        assert!(status.is_upstream());
        assert!(RecipeError::MalformedResponse("no choices".to_string()).is_upstream());
        assert!(!RecipeError::EmptyIngredients.is_upstream());
        assert!(!RecipeError::FetchInFlight.is_upstream());
    }

    #[test]
    fn test_status_message_includes_code() {
        let err = RecipeError::UpstreamStatus {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Recipe provider returned HTTP 503: unavailable"
        );
    }
}
