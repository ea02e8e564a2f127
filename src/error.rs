//! Error type shared by every pipeline stage.
//!
//! Each error carries a kind that decides the process exit code, plus a
//! human-readable message that `main` prints to stderr.

use thiserror::Error;

/// Which stage failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The flags or environment describe a run that cannot be made.
    Config,
    /// An input XML file is missing, unreadable, or structurally invalid.
    DataFormat,
    /// The report could not be written to disk.
    Output,
    /// Chart or template rendering failed.
    Render,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Config => 1,
            ErrorKind::DataFormat => 2,
            ErrorKind::Output => 3,
            ErrorKind::Render => 4,
        }
    }
}

#[derive(Clone, Error)]
#[error("{message}")]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn data_format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DataFormat, message)
    }

    pub fn output(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Output, message)
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Render, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("exit_code", &self.exit_code())
            .field("message", &self.message)
            .finish()
    }
}
