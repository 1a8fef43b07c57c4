/// Fatal error classes surfaced to the caller.
///
/// Row-level parse failures never appear here; they are absorbed during
/// collection (see `data::parse::RowReject`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Every configured instrument entry was malformed.
    NoValidInstruments,
    /// A supplied start/end date string failed to parse.
    InvalidDateInput,
    /// Resolved start date is after the resolved end date.
    InvertedRange,
    /// Network/HTTP failure while fetching a page.
    Transport,
    /// The merged dataset is empty, so no default range can be resolved.
    NoDataAvailable,
    /// Terminal/IO failure outside the collection pipeline.
    Io,
}

impl ErrorCode {
    /// Process exit code: 2 for configuration errors, 4 for data/runtime errors.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorCode::NoValidInstruments | ErrorCode::InvalidDateInput | ErrorCode::InvertedRange => 2,
            ErrorCode::Transport | ErrorCode::NoDataAvailable | ErrorCode::Io => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    code: ErrorCode,
    message: String,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn exit_code(&self) -> u8 {
        self.code.exit_code()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("code", &self.code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
