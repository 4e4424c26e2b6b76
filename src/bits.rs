//! Textual bitstrings, validated and held as real bits.

use std::fmt;
use std::str::FromStr;

use bitvec::prelude::*;

use crate::error::{Error, Result};

/// A sequence of bits read from, and written back as, a string of `0`s and `1`s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitstring {
    bits: BitVec<u8, Msb0>,
}

impl Bitstring {
    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

impl FromStr for Bitstring {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut bits = BitVec::with_capacity(s.len());
        for (position, found) in s.chars().enumerate() {
            match found {
                '0' => bits.push(false),
                '1' => bits.push(true),
                found => return Err(Error::NonBinary { found, position }),
            }
        }
        Ok(Bitstring { bits })
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter().by_vals() {
            write!(f, "{}", if bit { 1 } else { 0 })?;
        }
        Ok(())
    }
}
