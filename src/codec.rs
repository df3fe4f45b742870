//! Lossless compression codecs with replayable step traces.
//!
//! Three independent, stateless codecs live here:
//! - [`rle`]: run-length encoding over characters.
//! - [`huffman`]: frequency analysis, tree construction, and table-driven
//!   prefix coding.
//! - [`lzw`]: adaptive dictionary coding, with the dictionary rebuilt in
//!   lockstep during decoding.
//!
//! Each `encode` returns an [`EncodeResult`] carrying the encoded output,
//! size/ratio accounting, and an ordered trace of the algorithm's steps.
//! The trace is a side output meant for replay/animation; decoding never
//! needs it. Every call builds its working state from scratch; the only
//! thing a caller must retain between calls is the Huffman
//! [`CodeTable`](huffman::CodeTable).

use std::fmt;

pub mod huffman;
pub mod lzw;
pub mod rle;

/// Result of an encode operation.
///
/// `S` is the codec's trace-step type ([`rle::RleStep`], [`huffman::HuffmanStep`]
/// or [`lzw::LzwStep`]); each step implements `Display` with a human-readable
/// description of that point in the algorithm.
///
/// Sizes are counted in a consistent unit per codec: characters for RLE,
/// bits for Huffman and LZW (where the original size is always
/// `chars * 8`, an 8-bit baseline per symbol).
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeResult<S> {
    /// The codec's output representation: a character stream for RLE, a bit
    /// string for Huffman, comma-separated integer codes for LZW.
    pub encoded: String,
    /// Input size in the codec's unit.
    pub original_len: usize,
    /// Output size in the codec's unit.
    pub encoded_len: usize,
    /// `encoded_len / original_len * 100`; `0.0` for empty input. Values
    /// above 100 mean the encoding made the input bigger.
    pub ratio: f64,
    /// Ordered, finite trace of the algorithm's execution.
    pub steps: Vec<S>,
}

impl<S> EncodeResult<S> {
    pub(crate) fn new(encoded: String, original_len: usize, encoded_len: usize, steps: Vec<S>) -> Self {
        let ratio = if original_len == 0 {
            0.0
        } else {
            encoded_len as f64 / original_len as f64 * 100.0
        };
        EncodeResult {
            encoded,
            original_len,
            encoded_len,
            ratio,
            steps,
        }
    }
}

/// Static, input-independent metadata about a codec, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecDescription {
    pub name: &'static str,
    pub summary: &'static str,
    pub strengths: &'static str,
    pub weaknesses: &'static str,
}

/// Identifies one of the three codecs, for callers that select by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecKind {
    Rle,
    Huffman,
    Lzw,
}

impl CodecKind {
    /// Look up a codec by its display name (case-insensitive).
    ///
    /// # Example
    ///
    /// ```
    /// use compresslab::codec::CodecKind;
    ///
    /// assert_eq!(CodecKind::from_name("huffman"), Some(CodecKind::Huffman));
    /// assert_eq!(CodecKind::from_name("zstd"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<CodecKind> {
        match name.to_ascii_lowercase().as_str() {
            "rle" => Some(CodecKind::Rle),
            "huffman" => Some(CodecKind::Huffman),
            "lzw" => Some(CodecKind::Lzw),
            _ => None,
        }
    }

    /// The selected codec's static description.
    pub fn description(self) -> CodecDescription {
        match self {
            CodecKind::Rle => rle::description(),
            CodecKind::Huffman => huffman::description(),
            CodecKind::Lzw => lzw::description(),
        }
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description().name)
    }
}
