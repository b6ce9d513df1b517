//! Error types for the cropscan library

use thiserror::Error;

/// Result type alias for cropscan operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for index-image analysis operations
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Image source could not be read or decoded
    #[error("Failed to decode image: {message}")]
    DecodeError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Raw RGBA data does not match the declared dimensions
    #[error("Invalid pixel buffer: expected {expected} bytes for the declared dimensions, got {actual}")]
    InvalidBuffer { expected: usize, actual: usize },

    /// Hex color string could not be parsed
    #[error("Invalid hex color: {value}")]
    InvalidHexColor { value: String },

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AnalysisError {
    /// Create a decode error with an underlying cause
    pub fn decode<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::DecodeError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a decode error without an underlying cause
    pub fn decode_message(message: impl Into<String>) -> Self {
        Self::DecodeError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with an underlying cause
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check if this error indicates a recoverable condition
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalysisError::InvalidHexColor { .. } | AnalysisError::ConfigError { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::DecodeError { .. } => {
                "No se pudo cargar la imagen del índice. Verifique el formato del archivo e intente nuevamente.".to_string()
            }
            AnalysisError::InvalidBuffer { .. } => {
                "Los datos de la imagen no coinciden con sus dimensiones. Vuelva a generar la imagen del índice.".to_string()
            }
            AnalysisError::InvalidHexColor { value } => {
                format!("El color '{}' no es un color hexadecimal válido.", value)
            }
            AnalysisError::ConfigError { .. } => {
                "No se pudo leer la configuración del análisis. Se usarán los valores por defecto.".to_string()
            }
        }
    }
}
