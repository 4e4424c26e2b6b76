//! Huffman coding driven by a letter frequency table.
//!
//! A [`FrequencyTable`] is merged into a binary tree by [`TreeBuilder`], whose ties are broken by
//! a fixed total order so the same table always yields the same codes. [`CodeAssigner`] then
//! labels every leaf with its root path, giving a [`HuffmanTree`] that encodes plaintext into a
//! string of `0`s and `1`s and decodes such strings back.
//!
//! ```
//! use freq_huffman::{FrequencyTable, HuffmanTree};
//!
//! let table: FrequencyTable = "A 2\nB 2\nC 5".parse()?;
//! let tree = HuffmanTree::new(&table)?;
//! assert_eq!(tree.code('A'), Some("00"));
//! assert_eq!(tree.encode("CAB")?, "10001");
//! assert_eq!(tree.decode("10001")?, "CAB");
//! # Ok::<(), freq_huffman::Error>(())
//! ```

pub mod bits;
pub mod codec;
pub mod error;
pub mod report;
pub mod table;
pub mod text;
pub mod tree;

pub use bits::Bitstring;
pub use codec::{Decoder, Encoder};
pub use error::{Error, Result};
pub use table::{FrequencyTable, SymbolEntry};
pub use tree::{CodeAssigner, HuffmanTree, TreeBuilder, TreeNode};
