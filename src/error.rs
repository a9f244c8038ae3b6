use miette::Diagnostic;
use thiserror::Error;

/// Main error type for brickwork operations
#[derive(Error, Diagnostic, Debug)]
pub enum BrickError {
    #[error("IO error: {0}")]
    #[diagnostic(code(brickwork::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(brickwork::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Failed to decode {path}: {message}")]
    #[diagnostic(code(brickwork::decode))]
    Decode {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Unsupported output format '{extension}' for {path}")]
    #[diagnostic(
        code(brickwork::format),
        help("Use a .png (lossless) or .jpg/.jpeg (lossy) output path")
    )]
    UnsupportedFormat {
        path: std::path::PathBuf,
        extension: String,
    },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(brickwork::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Report error: {message}")]
    #[diagnostic(code(brickwork::report))]
    Report { message: String },
}

pub type Result<T> = std::result::Result<T, BrickError>;
