//! Educational lossless compression codecs.
//!
//! `compresslab` implements three classic algorithms (run-length encoding,
//! Huffman coding, and LZW) over plain text or a flattened 8x8 bitmap.
//! Every encode call returns the encoded output, size and ratio accounting,
//! and an ordered trace of the algorithm's steps so a caller can replay the
//! run incrementally (for animation or teaching).
//!
//! All operations are pure, synchronous functions: state such as frequency
//! maps, trees, and dictionaries is built fresh per call and discarded. The
//! one thing a caller carries between calls is the Huffman
//! [`CodeTable`](codec::huffman::CodeTable), which decode requires.
//!
//! ```
//! use compresslab::codec::{huffman, lzw, rle};
//!
//! let runs = rle::encode("AAAAABBBCCCCC");
//! assert_eq!(runs.encoded, "A5B3C5");
//!
//! let huff = huffman::encode("AAAAABBBCCCCC");
//! assert_eq!(huffman::decode(&huff.result.encoded, &huff.code_table).unwrap(),
//!            "AAAAABBBCCCCC");
//!
//! let codes = lzw::encode("AAAAABBBCCCCC").unwrap();
//! assert_eq!(lzw::decode(&codes.encoded).unwrap(), "AAAAABBBCCCCC");
//! ```

pub mod codec;
pub mod error;
pub mod grid;

pub use codec::{CodecDescription, CodecKind, EncodeResult};
pub use error::{Error, Result};
