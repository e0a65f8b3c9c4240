//! Error types for SocialFlow

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SocialFlowError>;

#[derive(Error, Debug)]
pub enum SocialFlowError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Errors from store mutations
///
/// Reads return `Option`; mutations return one of these so callers can tell
/// a no-op apart from a success.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("No post found with id: {0}")]
    PostNotFound(String),

    #[error("A post with id {0} already exists")]
    DuplicateId(String),
}

/// Errors from the content generation gateway
#[derive(Error, Debug, Clone)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Invalid response shape: {0}")]
    InvalidResponseShape(String),

    #[error("Generation returned no content")]
    EmptyContent,

    #[error("A generation request is already in flight")]
    InFlight,
}

/// Errors from a publishing provider
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    #[error("Account linking failed: {0}")]
    Linking(String),

    #[error("Publishing failed: {0}")]
    Publishing(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_formatting_invalid_input() {
        let error = SocialFlowError::InvalidInput("Topic cannot be empty".to_string());
        let message = format!("{}", error);
        assert_eq!(message, "Invalid input: Topic cannot be empty");
    }

    #[test]
    fn test_error_message_formatting_store() {
        let error = SocialFlowError::Store(StoreError::PostNotFound("abc-123".to_string()));
        let message = format!("{}", error);
        assert_eq!(message, "Store error: No post found with id: abc-123");
    }

    #[test]
    fn test_error_message_formatting_duplicate_id() {
        let error = StoreError::DuplicateId("post-1".to_string());
        assert_eq!(format!("{}", error), "A post with id post-1 already exists");
    }

    #[test]
    fn test_error_message_formatting_config() {
        let config_error = ConfigError::MissingField("GEMINI_API_KEY".to_string());
        let error = SocialFlowError::Config(config_error);
        let message = format!("{}", error);
        assert_eq!(
            message,
            "Configuration error: Missing required field: GEMINI_API_KEY"
        );
    }

    #[test]
    fn test_generation_error_variants() {
        let network = GenerationError::Network("Connection refused".to_string());
        assert_eq!(format!("{}", network), "Network error: Connection refused");

        let rate_limit = GenerationError::RateLimit("Too many requests".to_string());
        assert_eq!(
            format!("{}", rate_limit),
            "Rate limit exceeded: Too many requests"
        );

        let shape = GenerationError::InvalidResponseShape("expected array".to_string());
        assert_eq!(
            format!("{}", shape),
            "Invalid response shape: expected array"
        );

        let empty = GenerationError::EmptyContent;
        assert_eq!(format!("{}", empty), "Generation returned no content");

        let in_flight = GenerationError::InFlight;
        assert_eq!(
            format!("{}", in_flight),
            "A generation request is already in flight"
        );
    }

    #[test]
    fn test_provider_error_variants() {
        let linking = ProviderError::Linking("handshake timed out".to_string());
        assert_eq!(
            format!("{}", linking),
            "Account linking failed: handshake timed out"
        );

        let publishing = ProviderError::Publishing("rejected by platform".to_string());
        assert_eq!(
            format!("{}", publishing),
            "Publishing failed: rejected by platform"
        );
    }

    #[test]
    fn test_error_conversion_from_config_error() {
        let config_error = ConfigError::MissingField("test".to_string());
        let error: SocialFlowError = config_error.into();

        assert!(matches!(error, SocialFlowError::Config(_)));
    }

    #[test]
    fn test_error_conversion_from_store_error() {
        let store_error = StoreError::PostNotFound("missing".to_string());
        let error: SocialFlowError = store_error.into();

        match error {
            SocialFlowError::Store(StoreError::PostNotFound(id)) => assert_eq!(id, "missing"),
            _ => panic!("Expected SocialFlowError::Store"),
        }
    }

    #[test]
    fn test_error_conversion_from_generation_error() {
        let generation_error = GenerationError::EmptyContent;
        let error: SocialFlowError = generation_error.into();

        assert!(matches!(
            error,
            SocialFlowError::Generation(GenerationError::EmptyContent)
        ));
    }

    #[test]
    fn test_error_conversion_from_provider_error() {
        let provider_error = ProviderError::Publishing("test".to_string());
        let error: SocialFlowError = provider_error.into();

        assert!(matches!(error, SocialFlowError::Provider(_)));
    }

    #[test]
    fn test_config_error_read_error_formatting() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let config_error = ConfigError::ReadError(io_error);
        let message = format!("{}", config_error);
        assert!(message.contains("Failed to read config file"));
    }

    #[test]
    fn test_generation_error_clone() {
        let original = GenerationError::Network("Connection failed".to_string());
        let cloned = original.clone();

        assert_eq!(format!("{}", original), format!("{}", cloned));
    }

    #[test]
    fn test_store_error_equality() {
        assert_eq!(
            StoreError::PostNotFound("a".to_string()),
            StoreError::PostNotFound("a".to_string())
        );
        assert_ne!(
            StoreError::PostNotFound("a".to_string()),
            StoreError::DuplicateId("a".to_string())
        );
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<String> {
            Ok("success".to_string())
        }

        fn returns_err() -> Result<String> {
            Err(SocialFlowError::InvalidInput("test".to_string()))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }

    #[test]
    fn test_error_debug_output() {
        let error = SocialFlowError::Generation(GenerationError::InvalidResponseShape(
            "not an array".to_string(),
        ));

        let debug_output = format!("{:?}", error);
        assert!(debug_output.contains("Generation"));
        assert!(debug_output.contains("InvalidResponseShape"));
    }
}
