//! Unit tests for error handling
//!
//! Tests error types, conversions, and error message formatting.

#[cfg(test)]
mod tests {
    use crate::errors::AskDeskError;
    use std::io;

    // ====== Error Type Tests ======

    #[test]
    fn test_custom_error() {
        let error = AskDeskError::Custom("Test error message".to_string());
        let display = format!("{}", error);
        assert_eq!(display, "Test error message");
    }

    #[test]
    fn test_config_error() {
        let error = AskDeskError::ConfigError("Invalid configuration".to_string());
        assert!(matches!(error, AskDeskError::ConfigError(_)));
        let display = format!("{}", error);
        assert!(display.contains("configuration"));
    }

    #[test]
    fn test_feature_unavailable_names_role_and_feature() {
        let error = AskDeskError::FeatureUnavailable {
            role: "guest".to_string(),
            feature: "ai_assistant".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("guest"));
        assert!(display.contains("ai_assistant"));
    }

    #[test]
    fn test_store_invariant_errors() {
        let dup = AskDeskError::DuplicateDocument("doc-001".to_string());
        assert_eq!(dup.to_string(), "Duplicate document id: doc-001");

        let empty = AskDeskError::EmptyKeywords("doc-002".to_string());
        assert_eq!(empty.to_string(), "Document doc-002 has no keywords");
    }

    // ====== Error Conversion Tests ======

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err: AskDeskError = io_err.into();

        assert!(matches!(err, AskDeskError::Io(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let parse_result: Result<serde_json::Value, _> = serde_json::from_str("{invalid json}");

        if let Err(json_err) = parse_result {
            let err: AskDeskError = json_err.into();
            assert!(matches!(err, AskDeskError::Serialization(_)));
        }
    }

    #[test]
    fn test_error_from_toml() {
        let parse_result: Result<toml::Value, _> = toml::from_str("= broken");
        let err: AskDeskError = parse_result.unwrap_err().into();
        assert!(matches!(err, AskDeskError::TomlParsing(_)));
    }

    // ====== Error Chain Tests ======

    #[test]
    fn test_error_source_chain() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "Root cause");
        let err: AskDeskError = io_err.into();

        match err {
            AskDeskError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_result_and_then() {
        let result: crate::Result<i32> = Ok(42);
        let chained = result.and_then(|v| {
            if v > 40 {
                Ok(v + 10)
            } else {
                Err(AskDeskError::Custom("Too small".to_string()))
            }
        });
        assert_eq!(chained.unwrap(), 52);
    }
}
