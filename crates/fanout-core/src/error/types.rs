//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Error types for the telemetry fan-out pipeline
//!
//! This module provides the main error type used throughout the pipeline.
//! Only a handful of conditions are fatal to a poll cycle; everything else
//! travels through the warning channel in `error::warnings`.

use std::error::Error as StdError;
use thiserror::Error;

/// Result type for pipeline operations
pub type FanoutResult<T> = Result<T, FanoutError>;

/// Main error type for the pipeline
#[derive(Error, Debug)]
pub enum FanoutError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Structurally malformed raw document (the only cycle-aborting input error)
    #[error("Malformed document: {message}")]
    Document {
        message: String,
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Backend projection errors
    #[error("Projection error: {message}")]
    Projection {
        message: String,
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Transport delivery errors reported by the dispatch collaborator
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Internal errors
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

impl FanoutError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        FanoutError::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        FanoutError::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a malformed document error
    pub fn document(message: impl Into<String>) -> Self {
        FanoutError::Document {
            message: message.into(),
            source: None,
        }
    }

    /// Create a malformed document error with source
    pub fn document_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        FanoutError::Document {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a projection error
    pub fn projection(message: impl Into<String>) -> Self {
        FanoutError::Projection {
            message: message.into(),
            source: None,
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        FanoutError::Serialization {
            message: message.into(),
            source: None,
        }
    }

    /// Create a serialization error with source
    pub fn serialization_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        FanoutError::Serialization {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        FanoutError::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create a transport error with source
    pub fn transport_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        FanoutError::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        FanoutError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Check if the error aborts the whole poll cycle
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FanoutError::Configuration { .. } | FanoutError::Document { .. }
        )
    }

    /// Check if the error originates at the transport boundary
    pub fn is_transport(&self) -> bool {
        matches!(self, FanoutError::Transport { .. })
    }

    /// Get the error type as a string
    pub fn error_type(&self) -> &'static str {
        match self {
            FanoutError::Configuration { .. } => "Configuration",
            FanoutError::Document { .. } => "Document",
            FanoutError::Projection { .. } => "Projection",
            FanoutError::Serialization { .. } => "Serialization",
            FanoutError::Transport { .. } => "Transport",
            FanoutError::Internal { .. } => "Internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = FanoutError::configuration("missing backend list");
        assert!(matches!(config_err, FanoutError::Configuration { .. }));
        assert!(config_err.is_fatal());

        let doc_err = FanoutError::document("root is not an object");
        assert!(doc_err.is_fatal());

        let transport_err = FanoutError::transport("connection refused");
        assert!(!transport_err.is_fatal());
        assert!(transport_err.is_transport());
    }

    #[test]
    fn test_error_type_names() {
        assert_eq!(
            FanoutError::projection("bad fragment").error_type(),
            "Projection"
        );
        assert_eq!(FanoutError::internal("oops").error_type(), "Internal");
    }

    #[test]
    fn test_error_with_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = FanoutError::transport_with_source("delivery failed", io);
        assert!(err.to_string().contains("delivery failed"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
