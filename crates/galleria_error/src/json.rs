//! Album record (de)serialization errors.

/// Direction of the failed conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RecordDirection {
    /// Album to stored JSON
    #[display("encode")]
    Encode,
    /// Stored JSON to album
    #[display("decode")]
    Decode,
}

/// A published record that could not be written or read as JSON.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: cannot {} album record: {} at line {} in {}", direction, message, line, file)]
pub struct JsonError {
    /// Whether encoding or decoding failed
    pub direction: RecordDirection,
    /// serde_json's description, with its line/column for decode failures
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Failure turning an album into its record.
    #[track_caller]
    pub fn encode(message: impl Into<String>) -> Self {
        Self::at(RecordDirection::Encode, message.into())
    }

    /// Failure reading a stored record back.
    ///
    /// ```
    /// use galleria_error::{JsonError, RecordDirection};
    ///
    /// let err = JsonError::decode("expected value at line 1 column 1");
    /// assert_eq!(err.direction, RecordDirection::Decode);
    /// assert!(err.to_string().contains("cannot decode album record"));
    /// ```
    #[track_caller]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::at(RecordDirection::Decode, message.into())
    }

    #[track_caller]
    fn at(direction: RecordDirection, message: String) -> Self {
        let location = std::panic::Location::caller();
        Self {
            direction,
            message,
            line: location.line(),
            file: location.file(),
        }
    }
}
