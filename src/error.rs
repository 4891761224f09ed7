use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClockError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unable to get term size :(")]
    TerminalSize,

    #[error("Invalid color '{0}', expected a hex string such as #ffd700")]
    InvalidColor(String),

    #[error("No glyph set has the name of '{0}'. Available: egyptian, latin")]
    UnknownGlyphSet(String),

    /// A handle that the scene never handed out.
    #[error("Unknown drawing item: {0}")]
    UnknownItem(String),
}

pub type Result<T> = std::result::Result<T, ClockError>;
