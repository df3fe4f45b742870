use thiserror::Error;

/// Errors reported by the codecs.
///
/// Every failure is recoverable and surfaces as a value; nothing in this crate
/// panics across the public API. The caller is expected to render the error
/// text directly (the `Display` impls are written with that in mind).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Huffman decoding was invoked without the code table produced by a
    /// prior encode call (or with an empty bit string).
    #[error("dictionary required: Huffman decoding needs the code table from the encode step")]
    MissingCodeTable,

    /// A serialized Huffman code table could not be parsed.
    #[error("malformed code table entry `{0}`")]
    CodeTableParse(String),

    /// LZW decode input was not a well-formed comma-separated integer sequence.
    #[error("invalid LZW input: `{0}` is not an integer code")]
    CodeFormat(String),

    /// LZW decode met a code that is neither a dictionary entry nor the
    /// next code the decoder was about to assign.
    #[error("invalid LZW code {0}: not in the dictionary")]
    InvalidCode(u32),

    /// LZW encode met a symbol outside the seeded alphabet (code points 0-255).
    #[error("symbol {0:?} is outside the LZW alphabet (code points 0-255)")]
    SymbolOutOfRange(char),

    /// A flattened bitmap string was not exactly 64 `0`/`1` symbols.
    #[error("invalid bitmap string: {0}")]
    GridFormat(String),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;
