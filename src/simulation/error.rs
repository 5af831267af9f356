//! Error types for the warehouse twin
//!
//! Most generators in this crate are total: bad input yields an empty result
//! rather than an error. The variants here cover the few operations that can
//! genuinely fail, such as parsing a metric name from the command line or
//! changing the status of a resource that is not registered.

use crate::types::ConfigValidationError;
use thiserror::Error;

/// Errors that can occur while building or running the warehouse twin
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    InvalidConfiguration(String),

    /// A heatmap metric name was not recognised
    #[error("Unsupported heatmap metric: {0}")]
    UnsupportedMetric(String),

    /// A resource id does not belong to the simulator's roster
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<ConfigValidationError> for WarehouseError {
    fn from(error: ConfigValidationError) -> Self {
        WarehouseError::InvalidConfiguration(error.to_string())
    }
}

impl WarehouseError {
    /// Create a configuration error
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Create an unsupported metric error
    pub fn unsupported_metric(name: impl Into<String>) -> Self {
        Self::UnsupportedMetric(name.into())
    }

    /// Create an unknown resource error
    pub fn unknown_resource(id: impl Into<String>) -> Self {
        Self::UnknownResource(id.into())
    }

    /// Check if this is a recoverable error
    ///
    /// Recoverable errors affect a single request; the layout, generators and
    /// simulator remain usable afterwards.
    pub fn is_recoverable(&self) -> bool {
        match self {
            WarehouseError::InvalidConfiguration(_) => false,
            WarehouseError::UnsupportedMetric(_) => true,
            WarehouseError::UnknownResource(_) => true,
            WarehouseError::IoError(_) => true,
            WarehouseError::SerializationError(_) => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            WarehouseError::InvalidConfiguration(_) => "Configuration",
            WarehouseError::UnsupportedMetric(_) => "Heatmap",
            WarehouseError::UnknownResource(_) => "Resource",
            WarehouseError::IoError(_) => "IO",
            WarehouseError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for warehouse operations
pub type WarehouseResult<T> = Result<T, WarehouseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_creation() {
        let config_error = WarehouseError::invalid_configuration("Invalid config");
        assert!(matches!(config_error, WarehouseError::InvalidConfiguration(_)));
        assert_eq!(config_error.to_string(), "Configuration validation failed: Invalid config");

        let metric_error = WarehouseError::unsupported_metric("temperature");
        assert_eq!(metric_error.to_string(), "Unsupported heatmap metric: temperature");

        let resource_error = WarehouseError::unknown_resource("FL-999");
        assert_eq!(resource_error.to_string(), "Unknown resource: FL-999");
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: WarehouseError = io_error.into();
        assert!(matches!(error, WarehouseError::IoError(_)));
    }

    #[test]
    fn test_error_from_validation_error() {
        let error: WarehouseError = ConfigValidationError::InvalidTimeRange(0).into();
        assert!(matches!(error, WarehouseError::InvalidConfiguration(_)));
        assert!(error.to_string().contains("Time range"));
    }

    #[test]
    fn test_error_recoverability() {
        assert!(!WarehouseError::invalid_configuration("bad").is_recoverable());
        assert!(WarehouseError::unsupported_metric("x").is_recoverable());
        assert!(WarehouseError::unknown_resource("x").is_recoverable());
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(WarehouseError::invalid_configuration("x").category(), "Configuration");
        assert_eq!(WarehouseError::unsupported_metric("x").category(), "Heatmap");
        assert_eq!(WarehouseError::unknown_resource("x").category(), "Resource");
    }

    #[test]
    fn test_warehouse_result_type() {
        let success: WarehouseResult<i32> = Ok(42);
        assert!(success.is_ok());

        let failure: WarehouseResult<i32> = Err(WarehouseError::unknown_resource("FL-404"));
        assert!(failure.is_err());
    }
}
