use thiserror::Error;

/// Failures while loading the primary signal file or its label table.
///
/// The display strings for the signal-file variants are the exact one-line
/// messages printed to the console before the process exits with status 1.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("File not found.")]
    NotFound,
    #[error("Parse error.")]
    Parse,
    #[error("Empty file.")]
    Empty,
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
