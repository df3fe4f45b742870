//! Run-length encoding over characters.
//!
//! Each maximal run of identical symbols is replaced by the symbol followed
//! by its decimal run length, so `"AAAAA"` becomes `"A5"`. The ratio is
//! character-count based, not bit-accurate, which makes the format easy to
//! read and keeps the tradeoff visible: a run of length 1 *doubles* in size.
//!
//! The format is ambiguous when the input alphabet contains decimal digits
//! (a literal `'3'` cannot be told apart from a run count). The decoder keeps
//! the permissive behavior of skipping anything it cannot parse instead of
//! erroring; see [`decode`].

use log::debug;
use std::fmt;

use crate::codec::{CodecDescription, EncodeResult};

/// One encoded run, recorded for trace replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RleStep {
    /// Index (in characters) where the run starts.
    pub start: usize,
    /// Number of repeated symbols in the run.
    pub run_len: usize,
    /// The repeated symbol.
    pub symbol: char,
    /// The chunk this run contributed to the output, e.g. `"A5"`.
    pub chunk: String,
    /// The cumulative encoded output after this run.
    pub encoded_so_far: String,
}

impl fmt::Display for RleStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run of {:?} with length {} at index {}: emit \"{}\"",
            self.symbol, self.run_len, self.start, self.chunk
        )
    }
}

/// Encode `text` with run-length encoding.
///
/// Scans left to right; each maximal run of identical consecutive symbols
/// emits the symbol followed by the decimal run length. Empty input yields an
/// empty encoding with ratio `0.0` and no steps.
///
/// # Example
///
/// ```
/// use compresslab::codec::rle;
///
/// let result = rle::encode("AAAAABBBCCCCC");
/// assert_eq!(result.encoded, "A5B3C5");
/// assert_eq!(result.original_len, 13);
/// assert_eq!(result.encoded_len, 6);
/// ```
pub fn encode(text: &str) -> EncodeResult<RleStep> {
    let chars: Vec<char> = text.chars().collect();
    let mut encoded = String::new();
    let mut steps = Vec::new();

    let mut i = 0;
    while i < chars.len() {
        let symbol = chars[i];
        let mut run_len = 1;
        while i + run_len < chars.len() && chars[i + run_len] == symbol {
            run_len += 1;
        }
        let chunk = format!("{}{}", symbol, run_len);
        encoded.push_str(&chunk);
        steps.push(RleStep {
            start: i,
            run_len,
            symbol,
            chunk,
            encoded_so_far: encoded.clone(),
        });
        i += run_len;
    }

    let encoded_len = encoded.chars().count();
    debug!(
        "rle: encoded {} chars into {} chars over {} runs",
        chars.len(),
        encoded_len,
        steps.len()
    );
    EncodeResult::new(encoded, chars.len(), encoded_len, steps)
}

/// Decode a run-length encoded string.
///
/// Repeatedly matches "one non-digit symbol followed by one or more decimal
/// digits", leftmost-first and non-overlapping, and expands each match.
/// Fragments that do not match the pattern (trailing garbage, digits in the
/// symbol position) are silently skipped rather than reported; a stricter
/// decoder would be a behavior change for callers that rely on this. A run
/// count too large for `usize` is treated the same way: the whole run is
/// skipped, not expanded or saturated.
///
/// # Example
///
/// ```
/// use compresslab::codec::rle;
///
/// assert_eq!(rle::decode("A5B3C5"), "AAAAABBBCCCCC");
/// assert_eq!(rle::decode("A2-junk-B1"), "AAB");
/// ```
pub fn decode(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut decoded = String::new();

    let mut i = 0;
    while i < chars.len() {
        let symbol = chars[i];
        if symbol.is_ascii_digit() {
            i += 1;
            continue;
        }
        let mut j = i + 1;
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        if j == i + 1 {
            // Symbol with no count attached; skip it.
            i += 1;
            continue;
        }
        let digits: String = chars[i + 1..j].iter().collect();
        if let Ok(count) = digits.parse::<usize>() {
            for _ in 0..count {
                decoded.push(symbol);
            }
        }
        i = j;
    }

    debug!("rle: decoded {} chars into {} chars", chars.len(), decoded.chars().count());
    decoded
}

/// Static description of the codec, for display.
pub fn description() -> CodecDescription {
    CodecDescription {
        name: "RLE",
        summary: "Replaces each run of identical symbols with the symbol and its repeat count.",
        strengths: "Trivially simple and fast; excellent on long runs, such as flat regions of a bitmap.",
        weaknesses: "Doubles the size of runs of length one; cannot represent digits in the input alphabet.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{distributions::Uniform, Rng, SeedableRng};

    #[test]
    fn test_empty_input() {
        let result = encode("");
        assert_eq!(result.encoded, "");
        assert_eq!(result.ratio, 0.0);
        assert!(result.steps.is_empty());
    }

    #[test]
    fn test_known_encoding() {
        let result = encode("AAAAABBBCCCCC");
        assert_eq!(result.encoded, "A5B3C5");
        assert_eq!(result.original_len, 13);
        assert_eq!(result.encoded_len, 6);
        assert!((result.ratio - 6.0 / 13.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_symbol_ratio_is_200() {
        let result = encode("A");
        assert_eq!(result.encoded, "A1");
        assert_eq!(result.ratio, 200.0);
    }

    #[test]
    fn test_steps_record_runs() {
        let result = encode("AAB");
        assert_eq!(result.steps.len(), 2);
        assert_eq!(result.steps[0].start, 0);
        assert_eq!(result.steps[0].run_len, 2);
        assert_eq!(result.steps[0].chunk, "A2");
        assert_eq!(result.steps[0].encoded_so_far, "A2");
        assert_eq!(result.steps[1].start, 2);
        assert_eq!(result.steps[1].encoded_so_far, "A2B1");
    }

    #[test]
    fn test_decode_known() {
        assert_eq!(decode("A5B3C5"), "AAAAABBBCCCCC");
    }

    #[test]
    fn test_decode_skips_garbage() {
        // Symbols without counts and stray digits are dropped, not errors.
        assert_eq!(decode("A2xyB3"), "AABBB");
        assert_eq!(decode("123"), "");
        assert_eq!(decode(""), "");
    }

    #[test]
    fn test_decode_skips_oversized_count() {
        // A count beyond usize parses to nothing; the run is dropped whole.
        let oversized = format!("A{}", "9".repeat(24));
        assert_eq!(decode(&oversized), "");
        assert_eq!(decode(&format!("B2{}C3", oversized)), "BBCCC");
    }

    #[test]
    fn test_decode_multi_digit_count() {
        assert_eq!(decode("x12"), "x".repeat(12));
    }

    #[test]
    fn test_round_trip_digit_free_alphabet() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let alphabet = ['a', 'b', 'c', '!', '\u{3042}'];
        let dist = Uniform::from(0..alphabet.len());
        for _ in 0..50 {
            let len = rng.gen_range(0..200);
            let input: String = (0..len).map(|_| alphabet[rng.sample(dist)]).collect();
            assert_eq!(decode(&encode(&input).encoded), input);
        }
    }

    #[test]
    fn test_run_longer_than_nine() {
        let input = "z".repeat(42);
        let result = encode(&input);
        assert_eq!(result.encoded, "z42");
        assert_eq!(decode(&result.encoded), input);
    }
}
