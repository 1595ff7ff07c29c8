use thiserror::Error;

#[derive(Debug, Error)]
/// Reasons a document yields no text. The document is skipped, the batch continues.
pub enum ExtractionError {
    /// The document could not be parsed (corrupted or not what its name claims).
    #[error("document '{file_name}' is unreadable: {reason}")]
    Unreadable {
        /// Source file name.
        file_name: String,
        /// Parser message.
        reason: String,
    },

    /// Parsed, but every page was empty.
    #[error("document '{file_name}' has no extractable text ({pages} pages)")]
    NoExtractableText {
        /// Source file name.
        file_name: String,
        /// Page count seen.
        pages: usize,
    },

    /// File type is neither PDF nor plain text.
    #[error("document '{file_name}' has an unsupported format")]
    UnsupportedFormat {
        /// Source file name.
        file_name: String,
    },
}
