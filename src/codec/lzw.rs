//! LZW: adaptive dictionary coding.
//!
//! Both sides seed a dictionary with the 256 single-character strings for
//! code points 0-255, then grow it one entry at a time: the encoder adds
//! `w + c` the first time that sequence fails to match, and the decoder
//! replays exactly the same growth from the code stream alone. The
//! dictionary is never transmitted, capped, or reset.
//!
//! The output is the sequence of emitted integer codes joined by commas.
//! Size accounting assumes a fixed 12 bits per code; that figure exists for
//! ratio comparison against the 8-bit-per-symbol baseline, not as a real
//! bitstream width.

use log::debug;
use std::collections::HashMap;
use std::fmt;

use crate::codec::{CodecDescription, EncodeResult};
use crate::error::{Error, Result};

/// Display-only width of one emitted code, in bits.
pub const CODE_BITS: usize = 12;

const SEED_SIZE: u32 = 256;

/// One trace step of the LZW encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LzwStep {
    /// The extended sequence `w + c` was already in the dictionary; the
    /// working prefix grew and nothing was emitted.
    DictionaryHit { sequence: String },
    /// The extended sequence missed: the code for the old prefix was
    /// emitted and the sequence was registered under a fresh code.
    Emitted {
        code: u32,
        new_entry: String,
        new_code: u32,
        prefix: String,
    },
    /// The code for the leftover prefix, emitted after the input ended.
    Final { code: u32, sequence: String },
}

impl fmt::Display for LzwStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LzwStep::DictionaryHit { sequence } => {
                write!(f, "{:?} is in the dictionary; keep scanning", sequence)
            }
            LzwStep::Emitted {
                code,
                new_entry,
                new_code,
                prefix,
            } => write!(
                f,
                "emit {}; add {:?} as code {}; prefix restarts at {:?}",
                code, new_entry, new_code, prefix
            ),
            LzwStep::Final { code, sequence } => {
                write!(f, "input ended; emit {} for the remaining {:?}", code, sequence)
            }
        }
    }
}

/// Encode `text` with LZW.
///
/// The working prefix `w` starts empty. For each symbol `c`, `w + c` either
/// matches a dictionary entry (then `w` grows) or misses (then the code for
/// `w` is emitted, `w + c` is registered, and `w` restarts at `c`). A
/// non-empty leftover prefix is flushed after the loop.
///
/// Symbols must lie in the seeded alphabet; anything above code point 255
/// yields [`Error::SymbolOutOfRange`].
///
/// # Example
///
/// ```
/// use compresslab::codec::lzw;
///
/// let result = lzw::encode("AAAA").unwrap();
/// assert_eq!(result.encoded, "65,256,65");
/// ```
pub fn encode(text: &str) -> Result<EncodeResult<LzwStep>> {
    let mut dict: HashMap<String, u32> = (0..SEED_SIZE)
        .filter_map(|i| char::from_u32(i).map(|c| (c.to_string(), i)))
        .collect();
    let mut next_code = SEED_SIZE;

    let mut codes: Vec<u32> = Vec::new();
    let mut steps = Vec::new();
    let mut w = String::new();
    for c in text.chars() {
        if c as u32 >= SEED_SIZE {
            return Err(Error::SymbolOutOfRange(c));
        }
        let mut wc = w.clone();
        wc.push(c);
        if dict.contains_key(&wc) {
            w = wc;
            steps.push(LzwStep::DictionaryHit { sequence: w.clone() });
        } else {
            let code = dict
                .get(&w)
                .copied()
                .expect("scanned prefix is always registered");
            codes.push(code);
            dict.insert(wc.clone(), next_code);
            steps.push(LzwStep::Emitted {
                code,
                new_entry: wc,
                new_code: next_code,
                prefix: c.to_string(),
            });
            next_code += 1;
            w = c.to_string();
        }
    }
    if !w.is_empty() {
        let code = dict
            .get(&w)
            .copied()
            .expect("scanned prefix is always registered");
        codes.push(code);
        steps.push(LzwStep::Final { code, sequence: w });
    }

    let encoded = codes
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",");
    let original_len = text.chars().count() * 8;
    let encoded_len = codes.len() * CODE_BITS;
    debug!(
        "lzw: encoded {} bits into {} codes ({} dictionary entries added)",
        original_len,
        codes.len(),
        next_code - SEED_SIZE
    );
    Ok(EncodeResult::new(encoded, original_len, encoded_len, steps))
}

/// Decode a comma-separated LZW code sequence.
///
/// Rebuilds the encoder's dictionary in lockstep: each decoded entry
/// registers `w + first_char(entry)` under the next code, exactly mirroring
/// the insertion the encoder made when it emitted that code. A code equal to
/// the next unassigned code is the classic self-referential case and decodes
/// as `w + first_char(w)`; any larger code is invalid.
///
/// # Example
///
/// ```
/// use compresslab::codec::lzw;
///
/// let result = lzw::encode("MISSISSIPPI").unwrap();
/// assert_eq!(lzw::decode(&result.encoded).unwrap(), "MISSISSIPPI");
/// ```
pub fn decode(input: &str) -> Result<String> {
    if input.is_empty() {
        return Ok(String::new());
    }
    let codes = input
        .split(',')
        .map(|token| {
            token
                .trim()
                .parse::<u32>()
                .map_err(|_| Error::CodeFormat(token.trim().to_string()))
        })
        .collect::<Result<Vec<u32>>>()?;

    let mut dict: Vec<String> = (0..SEED_SIZE)
        .filter_map(char::from_u32)
        .map(String::from)
        .collect();

    let first = codes[0];
    if first >= SEED_SIZE {
        return Err(Error::InvalidCode(first));
    }
    let mut w = dict[first as usize].clone();
    let mut decoded = w.clone();

    for &code in &codes[1..] {
        let entry = if (code as usize) < dict.len() {
            dict[code as usize].clone()
        } else if code as usize == dict.len() {
            // The encoder referenced the entry it had just created.
            let mut entry = w.clone();
            entry.push(first_char(&w));
            entry
        } else {
            return Err(Error::InvalidCode(code));
        };
        decoded.push_str(&entry);
        let mut registered = w.clone();
        registered.push(first_char(&entry));
        dict.push(registered);
        w = entry;
    }
    debug!(
        "lzw: decoded {} codes into {} chars",
        codes.len(),
        decoded.chars().count()
    );
    Ok(decoded)
}

fn first_char(s: &str) -> char {
    s.chars().next().expect("dictionary entries are never empty")
}

/// Static description of the codec, for display.
pub fn description() -> CodecDescription {
    CodecDescription {
        name: "LZW",
        summary: "Builds a dictionary of repeated sequences on the fly and emits one code per match.",
        strengths: "Adapts to the input without a prior pass; the dictionary never has to be transmitted.",
        weaknesses: "Needs repeated substrings to pay off; short or high-entropy input gets larger.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_code_sequence() {
        let result = encode("AAAA").unwrap();
        assert_eq!(result.encoded, "65,256,65");
        assert_eq!(result.original_len, 32);
        assert_eq!(result.encoded_len, 36);
    }

    #[test]
    fn test_mississippi_round_trip() {
        let result = encode("MISSISSIPPI").unwrap();
        assert_eq!(decode(&result.encoded).unwrap(), "MISSISSIPPI");
    }

    #[test]
    fn test_round_trip_with_repetition() {
        let input = "TOBEORNOTTOBEORTOBEORNOT";
        let result = encode(input).unwrap();
        assert_eq!(decode(&result.encoded).unwrap(), input);
        assert!(result.encoded_len < result.original_len);
    }

    #[test]
    fn test_self_referential_code() {
        // "65,256,65" forces the decoder through the not-yet-registered case.
        assert_eq!(decode("65,256,65").unwrap(), "AAAA");
    }

    #[test]
    fn test_empty_input() {
        let result = encode("").unwrap();
        assert_eq!(result.encoded, "");
        assert_eq!(result.ratio, 0.0);
        assert!(result.steps.is_empty());
        assert_eq!(decode("").unwrap(), "");
    }

    #[test]
    fn test_trace_steps() {
        let result = encode("AAAA").unwrap();
        assert_eq!(
            result.steps,
            vec![
                LzwStep::DictionaryHit { sequence: "A".into() },
                LzwStep::Emitted {
                    code: 65,
                    new_entry: "AA".into(),
                    new_code: 256,
                    prefix: "A".into(),
                },
                LzwStep::DictionaryHit { sequence: "AA".into() },
                LzwStep::Emitted {
                    code: 256,
                    new_entry: "AAA".into(),
                    new_code: 257,
                    prefix: "A".into(),
                },
                LzwStep::Final { code: 65, sequence: "A".into() },
            ]
        );
    }

    #[test]
    fn test_format_error() {
        assert_eq!(decode("65,abc"), Err(Error::CodeFormat("abc".into())));
        assert_eq!(decode("65,,66"), Err(Error::CodeFormat("".into())));
    }

    #[test]
    fn test_invalid_code_error() {
        assert_eq!(decode("65,999"), Err(Error::InvalidCode(999)));
        assert_eq!(decode("300"), Err(Error::InvalidCode(300)));
    }

    #[test]
    fn test_symbol_out_of_range() {
        assert_eq!(encode("ok\u{3042}"), Err(Error::SymbolOutOfRange('\u{3042}')));
    }

    #[test]
    fn test_beats_baseline_on_skewed_input() {
        let result = encode("AAAAABBBCCCCC").unwrap();
        assert_eq!(result.original_len, 104);
        assert!(result.encoded_len < 104);
    }

    #[test]
    fn test_full_byte_alphabet() {
        let input: String = (0u32..256).filter_map(char::from_u32).collect();
        let result = encode(&input).unwrap();
        assert_eq!(decode(&result.encoded).unwrap(), input);
    }
}
