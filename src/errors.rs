use thiserror::Error;

/// Represents errors that can surface while turning a document into a slide deck.
///
/// Almost everything in the pipeline fails soft (unknown colors, missing sizes and
/// unrecognized elements all resolve to defaults); only the conditions below reach
/// the caller.
#[derive(Error, Debug)]
pub enum DeckError {
    /// No slide produced a single non-empty block, so the deck would be empty.
    #[error("No content: the document did not produce any non-empty slide")]
    NoContent,

    /// The JSON configuration document could not be parsed.
    #[error("Invalid deck configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// The recorded draw commands could not be serialized.
    #[error("Failed to serialize draw commands: {0}")]
    Serialization(serde_json::Error),
}

/// A type alias for `Result<T, DeckError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, DeckError>;
