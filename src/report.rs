//! Human readable listings of a tree, its codes and coded messages.

use std::io::{self, Write};

use tracing::warn;

use crate::error::Result;
use crate::table::FrequencyTable;
use crate::tree::HuffmanTree;

/// format the tree to a string with each symbol and its code
/// Each symbol-code relation is newline separated, leaves from left to right,
/// and each symbol-code relation is represented by tab separated pair of symbol and code.
pub fn format_codebook(tree: &HuffmanTree) -> String {
    let mut result = String::new();
    for leaf in tree.root().leaves() {
        if !result.is_empty() {
            result.push('\n');
        }
        if let (Some(symbol), Some(code)) = (leaf.symbol(), leaf.code()) {
            result.push_str(&format!("{}\t{}", symbol, code));
        }
    }
    result
}

/// Writes the full run report: the tree in preorder, the code table, then every clear message
/// with its encoding followed by every encoded message with its decoding.
///
/// A message that fails to encode or decode is reported in place and does not stop the report.
pub fn write_report<W, C, E>(
    out: &mut W,
    table: &FrequencyTable,
    tree: &HuffmanTree,
    clear: &[C],
    encoded: &[E],
) -> io::Result<()>
where
    W: Write,
    C: AsRef<str>,
    E: AsRef<str>,
{
    writeln!(out, "\n\n---------Huffman tree in preorder---------")?;
    for node in tree.root().preorder() {
        writeln!(out, "{}: {}", node.label(), node.frequency())?;
    }

    writeln!(out, "\n\n---------Table of Huffman values---------")?;
    writeln!(out, "(Char : Freq : Huffman code)")?;
    for entry in table {
        writeln!(
            out,
            "{} : {} : {}",
            entry.symbol(),
            entry.frequency(),
            tree.code(entry.symbol()).unwrap_or_default()
        )?;
    }

    writeln!(out, "\n\n---------Input/output strings---------")?;
    for message in clear {
        write_pair(out, message.as_ref(), tree.encode(message.as_ref()))?;
    }
    for message in encoded {
        write_pair(out, message.as_ref(), tree.decode(message.as_ref()))?;
    }
    Ok(())
}

fn write_pair<W: Write>(out: &mut W, input: &str, output: Result<String>) -> io::Result<()> {
    writeln!(out, "\nInput: {}", input)?;
    match output {
        Ok(output) => writeln!(out, "Output: {}", output),
        Err(err) => {
            warn!(input, %err, "message skipped");
            writeln!(out, "Output: error: {}", err)
        }
    }
}
