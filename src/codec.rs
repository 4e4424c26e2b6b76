//! Encoding plaintext to bitstrings and decoding it back, on a coded [`HuffmanTree`].
//!
//! [`HuffmanTree`]: crate::tree::HuffmanTree

use std::collections::BTreeMap;

use bitvec::prelude::*;
use tracing::trace;

use crate::bits::Bitstring;
use crate::error::{Error, Result};
use crate::tree::TreeNode;

/// Looks up each symbol's code and concatenates them.
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'a> {
    codes: &'a BTreeMap<char, String>,
}

impl<'a> Encoder<'a> {
    pub fn new(codes: &'a BTreeMap<char, String>) -> Self {
        Encoder { codes }
    }

    /// fails on the first symbol without a code, nothing is skipped
    pub fn encode(&self, text: &str) -> Result<String> {
        let mut encoded = String::new();
        for (position, symbol) in text.chars().enumerate() {
            let code = self
                .codes
                .get(&symbol)
                .ok_or(Error::InvalidAlphabet { symbol, position })?;
            encoded.push_str(code);
        }
        Ok(encoded)
    }
}

/// Walks the tree bit by bit, emitting a symbol at each leaf and restarting from the root.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    root: &'a TreeNode,
}

impl<'a> Decoder<'a> {
    pub fn new(root: &'a TreeNode) -> Self {
        Decoder { root }
    }

    pub fn decode(&self, bits: &str) -> Result<String> {
        let bits: Bitstring = bits.parse()?;
        self.decode_bits(bits.as_bitslice())
    }

    /// A single leaf root has the empty code, so each bit of either value decodes to one
    /// occurrence of its symbol.
    pub fn decode_bits(&self, bits: &BitSlice<u8, Msb0>) -> Result<String> {
        if let Some(symbol) = self.root.symbol() {
            return Ok(std::iter::repeat(symbol).take(bits.len()).collect());
        }

        let mut decoded = String::new();
        let mut node = self.root;
        // first bit of the code being read
        let mut start = 0;
        for (position, bit) in bits.iter().by_vals().enumerate() {
            node = node
                .child(bit)
                .ok_or(Error::Unreachable("decoder descended from a leaf"))?;
            if let Some(symbol) = node.symbol() {
                trace!(?symbol, start, "decoded symbol");
                decoded.push(symbol);
                node = self.root;
                start = position + 1;
            }
        }

        if start < bits.len() {
            return Err(Error::MalformedCode {
                position: start,
                remaining: bits.len() - start,
            });
        }
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use crate::table::{FrequencyTable, SymbolEntry};
    use crate::tree::HuffmanTree;

    use super::*;

    fn tree(entries: &[(char, u64)]) -> HuffmanTree {
        let table = FrequencyTable::new(
            entries
                .iter()
                .map(|&(symbol, frequency)| SymbolEntry::new(symbol, frequency))
                .collect(),
        )
        .unwrap();
        HuffmanTree::new(&table).unwrap()
    }

    #[test]
    fn encodes_in_input_order() {
        let tree = tree(&[('A', 2), ('B', 2), ('C', 5)]);
        assert_eq!(tree.encode("CAB").unwrap(), "10001");
        assert_eq!(tree.encode("").unwrap(), "");
    }

    #[test]
    fn unknown_symbol_is_an_error() {
        let tree = tree(&[('A', 2), ('B', 2), ('C', 5)]);
        match tree.encode("ABZC") {
            Err(Error::InvalidAlphabet { symbol, position }) => {
                assert_eq!(symbol, 'Z');
                assert_eq!(position, 2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn decodes_back_to_symbols() {
        let tree = tree(&[('A', 2), ('B', 2), ('C', 5)]);
        assert_eq!(tree.decode("10001").unwrap(), "CAB");
        assert_eq!(tree.decode("").unwrap(), "");
    }

    #[test]
    fn truncated_code_is_malformed() {
        // A=000 B=001 C=010 D=011 E=1
        let tree = tree(&[('A', 1), ('B', 1), ('C', 1), ('D', 1), ('E', 10)]);
        assert_eq!(tree.code('C'), Some("010"));
        assert!(matches!(
            tree.decode("01"),
            Err(Error::MalformedCode {
                position: 0,
                remaining: 2
            })
        ));
        assert!(matches!(
            tree.decode("0001"),
            Err(Error::MalformedCode {
                position: 3,
                remaining: 1
            })
        ));
    }

    #[test]
    fn non_binary_input_is_rejected() {
        let tree = tree(&[('A', 2), ('B', 2), ('C', 5)]);
        assert!(matches!(
            tree.decode("10x"),
            Err(Error::NonBinary {
                found: 'x',
                position: 2
            })
        ));
    }

    #[test]
    fn single_symbol_decodes_one_per_bit() {
        let tree = tree(&[('A', 10)]);
        assert_eq!(tree.encode("AAA").unwrap(), "");
        assert_eq!(tree.decode("0101").unwrap(), "AAAA");
        assert_eq!(tree.decode("").unwrap(), "");
    }

    #[test]
    fn decoder_reads_bit_slices() {
        let tree = tree(&[('A', 2), ('B', 2), ('C', 5)]);
        let bits = bits![u8, Msb0; 0, 1, 1];
        assert_eq!(tree.decoder().decode_bits(bits).unwrap(), "BC");
    }
}
