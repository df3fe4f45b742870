//! Huffman coding: frequency analysis, tree construction, and table-driven
//! prefix coding.
//!
//! Encoding builds a binary tree bottom-up by repeatedly merging the two
//! lowest-frequency nodes, then reads each leaf's root-to-leaf path as its
//! code (`'0'` left, `'1'` right). The walk guarantees a prefix-free code:
//! no code is a prefix of another, so decoding needs no lookahead.
//!
//! The tree itself is transient; only the derived [`CodeTable`] survives the
//! encode call, and the caller must hand it back to [`decode`]. The table
//! serializes to plain text via `Display`/`FromStr` so a caller can store or
//! ship it alongside the bit string.

use log::debug;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::codec::{CodecDescription, EncodeResult};
use crate::error::{Error, Result};

/// A node in the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A leaf holds one symbol and its frequency.
    Leaf { symbol: char, freq: usize },
    /// An internal node holds the combined frequency of its two children.
    Internal {
        freq: usize,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// The frequency weight of this node.
    pub fn freq(&self) -> usize {
        match self {
            HuffmanNode::Leaf { freq, .. } => *freq,
            HuffmanNode::Internal { freq, .. } => *freq,
        }
    }
}

/// Min-heap entry. Frequency decides priority; the insertion sequence number
/// breaks ties so the tree shape is deterministic and tests are reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HeapEntry {
    freq: usize,
    seq: usize,
    node: Box<HuffmanNode>,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the smallest first.
        (other.freq, other.seq).cmp(&(self.freq, self.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The symbol-to-code mapping produced by [`encode`].
///
/// Decoding is stateless and cannot reconstruct the mapping on its own, so
/// the caller retains this table between an encode call and a later
/// [`decode`] call. The `Display` form is `<code point>=<bits>` entries
/// joined by commas (e.g. `65=0,66=10`), and `FromStr` parses it back;
/// malformed text yields [`Error::CodeTableParse`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: HashMap<char, String>,
}

impl CodeTable {
    /// The bit-string code for `symbol`, if it appears in the table.
    pub fn get(&self, symbol: char) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate over `(symbol, code)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.codes.iter().map(|(&c, code)| (c, code.as_str()))
    }

    /// Inverse mapping from code to symbol. Unambiguous because generated
    /// codes are prefix-free.
    fn invert(&self) -> HashMap<&str, char> {
        self.codes.iter().map(|(&c, code)| (code.as_str(), c)).collect()
    }
}

impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.codes.iter().collect();
        entries.sort_by_key(|(&c, _)| c);
        let mut first = true;
        for (c, code) in entries {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{}={}", *c as u32, code)?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for CodeTable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut codes = HashMap::new();
        if s.trim().is_empty() {
            return Ok(CodeTable { codes });
        }
        for entry in s.split(',') {
            let (point, code) = entry
                .split_once('=')
                .ok_or_else(|| Error::CodeTableParse(entry.to_string()))?;
            let symbol = point
                .trim()
                .parse::<u32>()
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| Error::CodeTableParse(entry.to_string()))?;
            if code.is_empty() || !code.chars().all(|b| b == '0' || b == '1') {
                return Err(Error::CodeTableParse(entry.to_string()));
            }
            codes.insert(symbol, code.to_string());
        }
        Ok(CodeTable { codes })
    }
}

/// One trace step of the Huffman encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanStep {
    /// The code table has been derived from the tree; emitted once before
    /// any symbol is encoded. Codes are listed in first-appearance order.
    TableBuilt { codes: Vec<(char, String)> },
    /// One input symbol was replaced by its code.
    Encoded {
        symbol: char,
        code: String,
        encoded_so_far: String,
    },
}

impl fmt::Display for HuffmanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HuffmanStep::TableBuilt { codes } => {
                write!(f, "code table built for {} symbols: ", codes.len())?;
                let mut first = true;
                for (c, code) in codes {
                    if !first {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}={}", c, code)?;
                    first = false;
                }
                Ok(())
            }
            HuffmanStep::Encoded { symbol, code, .. } => {
                write!(f, "{:?} encodes as {}", symbol, code)
            }
        }
    }
}

/// Everything an encode call produces: the bit string with its accounting
/// and trace, the code table the caller must keep for decoding, and the
/// frequency table (sorted descending) for display.
#[derive(Debug, Clone, PartialEq)]
pub struct HuffmanEncoded {
    pub result: EncodeResult<HuffmanStep>,
    pub code_table: CodeTable,
    /// Symbol frequencies sorted by descending count; ties keep the order of
    /// first appearance in the input.
    pub frequencies: Vec<(char, usize)>,
}

/// Tally symbol frequencies in order of first appearance.
pub fn build_frequency_table(input: &str) -> Vec<(char, usize)> {
    let mut index: HashMap<char, usize> = HashMap::new();
    let mut freqs: Vec<(char, usize)> = Vec::new();
    for ch in input.chars() {
        match index.get(&ch).copied() {
            Some(i) => freqs[i].1 += 1,
            None => {
                index.insert(ch, freqs.len());
                freqs.push((ch, 1));
            }
        }
    }
    freqs
}

/// Build the Huffman tree from a frequency table.
///
/// Returns `None` for an empty table. The two lowest-weight nodes are merged
/// repeatedly (first popped becomes the left child) until one root remains;
/// ties are broken by insertion order, so the shape is deterministic.
pub fn build_tree(freqs: &[(char, usize)]) -> Option<Box<HuffmanNode>> {
    let mut heap = BinaryHeap::new();
    let mut seq = 0;
    for &(symbol, freq) in freqs {
        heap.push(HeapEntry {
            freq,
            seq,
            node: Box::new(HuffmanNode::Leaf { symbol, freq }),
        });
        seq += 1;
    }
    while heap.len() > 1 {
        let left = heap.pop()?;
        let right = heap.pop()?;
        let freq = left.freq + right.freq;
        heap.push(HeapEntry {
            freq,
            seq,
            node: Box::new(HuffmanNode::Internal {
                freq,
                left: left.node,
                right: right.node,
            }),
        });
        seq += 1;
    }
    heap.pop().map(|entry| entry.node)
}

/// Derive the code table by walking the tree: `'0'` on every left descent,
/// `'1'` on every right descent; a leaf's accumulated path is its code.
///
/// A tree that is a single leaf (one distinct symbol in the input) gets the
/// one-bit code `"0"`; the empty code it would otherwise receive cannot be
/// decoded.
pub fn build_code_table(root: &HuffmanNode) -> CodeTable {
    let mut codes = HashMap::new();
    assign_codes(root, String::new(), &mut codes);
    CodeTable { codes }
}

fn assign_codes(node: &HuffmanNode, prefix: String, codes: &mut HashMap<char, String>) {
    match node {
        HuffmanNode::Leaf { symbol, .. } => {
            let code = if prefix.is_empty() { "0".to_string() } else { prefix };
            codes.insert(*symbol, code);
        }
        HuffmanNode::Internal { left, right, .. } => {
            let mut left_prefix = prefix.clone();
            left_prefix.push('0');
            assign_codes(left, left_prefix, codes);
            let mut right_prefix = prefix;
            right_prefix.push('1');
            assign_codes(right, right_prefix, codes);
        }
    }
}

/// Encode `text` with Huffman coding.
///
/// Builds the frequency table, tree, and code table, then concatenates each
/// symbol's code in input order. The tree is discarded; the returned
/// [`CodeTable`] is what [`decode`] needs. Sizes are in bits against an
/// 8-bit-per-symbol baseline.
///
/// # Example
///
/// ```
/// use compresslab::codec::huffman;
///
/// let encoded = huffman::encode("AAAA");
/// assert_eq!(encoded.code_table.get('A'), Some("0"));
/// assert_eq!(encoded.result.encoded, "0000");
/// let decoded = huffman::decode(&encoded.result.encoded, &encoded.code_table).unwrap();
/// assert_eq!(decoded, "AAAA");
/// ```
pub fn encode(text: &str) -> HuffmanEncoded {
    let freqs = build_frequency_table(text);
    let code_table = match build_tree(&freqs) {
        Some(root) => build_code_table(&root),
        None => CodeTable::default(),
    };

    let mut steps = Vec::new();
    let mut encoded = String::new();
    if !freqs.is_empty() {
        let codes = freqs
            .iter()
            .map(|&(c, _)| (c, code_table.codes[&c].clone()))
            .collect();
        steps.push(HuffmanStep::TableBuilt { codes });
        for symbol in text.chars() {
            let code = code_table.codes[&symbol].clone();
            encoded.push_str(&code);
            steps.push(HuffmanStep::Encoded {
                symbol,
                code,
                encoded_so_far: encoded.clone(),
            });
        }
    }

    let mut frequencies = freqs;
    frequencies.sort_by(|a, b| b.1.cmp(&a.1));

    let original_len = text.chars().count() * 8;
    let encoded_len = encoded.len();
    debug!(
        "huffman: encoded {} bits into {} bits with {} codes",
        original_len,
        encoded_len,
        code_table.len()
    );
    HuffmanEncoded {
        result: EncodeResult::new(encoded, original_len, encoded_len, steps),
        code_table,
        frequencies,
    }
}

/// Decode a Huffman bit string with the code table from the encode step.
///
/// Bits accumulate into a candidate code; every exact table match emits the
/// symbol and resets the candidate. Leftover bits that never complete a code
/// are dropped at end of input without an error. An empty bit string or an
/// empty table yields [`Error::MissingCodeTable`].
///
/// # Example
///
/// ```
/// use compresslab::codec::huffman::{self, CodeTable};
/// use compresslab::Error;
///
/// assert_eq!(
///     huffman::decode("0101", &CodeTable::default()),
///     Err(Error::MissingCodeTable)
/// );
/// ```
pub fn decode(bits: &str, table: &CodeTable) -> Result<String> {
    if bits.is_empty() || table.is_empty() {
        return Err(Error::MissingCodeTable);
    }
    let inverse = table.invert();
    let mut decoded = String::new();
    let mut candidate = String::new();
    for bit in bits.chars() {
        candidate.push(bit);
        if let Some(&symbol) = inverse.get(candidate.as_str()) {
            decoded.push(symbol);
            candidate.clear();
        }
    }
    debug!(
        "huffman: decoded {} bits into {} chars ({} bits unmatched)",
        bits.len(),
        decoded.chars().count(),
        candidate.len()
    );
    Ok(decoded)
}

/// Static description of the codec, for display.
pub fn description() -> CodecDescription {
    CodecDescription {
        name: "Huffman",
        summary: "Assigns short prefix-free bit codes to frequent symbols and long ones to rare symbols.",
        strengths: "Optimal among per-symbol codes for skewed frequency distributions.",
        weaknesses: "The code table must travel with the data; no gain on uniformly distributed input.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_table_first_appearance_order() {
        let freqs = build_frequency_table("abcaab");
        assert_eq!(freqs, vec![('a', 3), ('b', 2), ('c', 1)]);
    }

    #[test]
    fn test_round_trip() {
        let input = "it was the best of times, it was the worst of times";
        let encoded = encode(input);
        let decoded = decode(&encoded.result.encoded, &encoded.code_table).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn test_single_symbol_gets_code_zero() {
        let encoded = encode("AAAA");
        assert_eq!(encoded.code_table.get('A'), Some("0"));
        assert_eq!(encoded.result.encoded, "0000");
        assert_eq!(decode("0000", &encoded.code_table).unwrap(), "AAAA");
    }

    #[test]
    fn test_prefix_free_property() {
        let encoded = encode("the quick brown fox jumps over the lazy dog");
        let codes: Vec<_> = encoded.code_table.iter().map(|(_, code)| code).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a), "{} is a prefix of {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_deterministic_tree_shape() {
        // All frequencies equal: tie-breaks must still give a stable table.
        let first = encode("abcd");
        let second = encode("abcd");
        assert_eq!(first.code_table, second.code_table);
        assert_eq!(first.result.encoded, second.result.encoded);
    }

    #[test]
    fn test_beats_baseline_on_skewed_input() {
        let encoded = encode("AAAAABBBCCCCC");
        assert_eq!(encoded.result.original_len, 104);
        assert!(encoded.result.encoded_len < 104);
        assert!(encoded.result.ratio < 100.0);
    }

    #[test]
    fn test_frequencies_sorted_descending() {
        let encoded = encode("AAAAABBBCCCCC");
        assert_eq!(encoded.frequencies[0].1, 5);
        assert_eq!(encoded.frequencies[2], ('B', 3));
    }

    #[test]
    fn test_trace_steps() {
        let encoded = encode("ab");
        assert_eq!(encoded.result.steps.len(), 3);
        assert!(matches!(encoded.result.steps[0], HuffmanStep::TableBuilt { .. }));
        match &encoded.result.steps[2] {
            HuffmanStep::Encoded { symbol, encoded_so_far, .. } => {
                assert_eq!(*symbol, 'b');
                assert_eq!(encoded_so_far, &encoded.result.encoded);
            }
            other => panic!("unexpected step {:?}", other),
        }
    }

    #[test]
    fn test_decode_without_table_is_an_error() {
        assert_eq!(
            decode("0101", &CodeTable::default()),
            Err(Error::MissingCodeTable)
        );
        let encoded = encode("ab");
        assert_eq!(decode("", &encoded.code_table), Err(Error::MissingCodeTable));
    }

    #[test]
    fn test_decode_drops_trailing_bits() {
        // Three distinct symbols, so the table holds a length-2 code and a
        // lone trailing '1' completes nothing: b="0", a="11", c="10".
        let encoded = encode("aabbc");
        assert!(encoded.code_table.iter().all(|(_, code)| code != "1"));
        let mut bits = encoded.result.encoded.clone();
        bits.push('1');
        let padded = decode(&bits, &encoded.code_table).unwrap();
        assert_eq!(padded, "aabbc");
    }

    #[test]
    fn test_code_table_serialization_round_trip() {
        let encoded = encode("mississippi");
        let text = encoded.code_table.to_string();
        let parsed: CodeTable = text.parse().unwrap();
        assert_eq!(parsed, encoded.code_table);
    }

    #[test]
    fn test_code_table_parse_errors() {
        assert!(matches!(
            "not a table".parse::<CodeTable>(),
            Err(Error::CodeTableParse(_))
        ));
        assert!(matches!(
            "65=0,66".parse::<CodeTable>(),
            Err(Error::CodeTableParse(_))
        ));
        assert!(matches!(
            "65=012".parse::<CodeTable>(),
            Err(Error::CodeTableParse(_))
        ));
        assert_eq!("".parse::<CodeTable>().unwrap(), CodeTable::default());
    }

    #[test]
    fn test_empty_input() {
        let encoded = encode("");
        assert_eq!(encoded.result.encoded, "");
        assert_eq!(encoded.result.ratio, 0.0);
        assert!(encoded.result.steps.is_empty());
        assert!(encoded.code_table.is_empty());
    }

    #[test]
    fn test_unicode_symbols() {
        let input = "náïve déjà vu";
        let encoded = encode(input);
        assert_eq!(decode(&encoded.result.encoded, &encoded.code_table).unwrap(), input);
        let parsed: CodeTable = encoded.code_table.to_string().parse().unwrap();
        assert_eq!(parsed, encoded.code_table);
    }
}
