//! Huffman tree construction and prefix code assignment.
//!
//! Construction runs in two stages. [`TreeBuilder`] merges leaves into an uncoded tree, then
//! [`CodeAssigner`] walks that tree once and hands back a [`HuffmanTree`], which is never
//! mutated again and can be shared freely between encoders and decoders.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use tracing::{debug, warn};

use crate::codec::{Decoder, Encoder};
use crate::error::{Error, Result};
use crate::table::{FrequencyTable, SymbolEntry};

/// A node of the merge tree: a single symbol or the merge of two subtrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// frequency of the symbol, or the sum of the children's
    frequency: u64,

    /// every symbol beneath this node, left to right
    label: String,

    kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    Leaf {
        symbol: char,
        /// `None` until codes are assigned
        code: Option<String>,
    },
    Internal {
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    pub fn leaf(entry: SymbolEntry) -> Self {
        TreeNode {
            frequency: entry.frequency(),
            label: entry.symbol().to_string(),
            kind: NodeKind::Leaf {
                symbol: entry.symbol(),
                code: None,
            },
        }
    }

    /// merge two subtrees, the one ordered first by [`tie_break`] goes to the left
    pub(crate) fn merge(a: Self, b: Self) -> Result<Self> {
        let frequency = a
            .frequency
            .checked_add(b.frequency)
            .ok_or(Error::FrequencyOverflow)?;
        let (left, right) = match tie_break(&a, &b) {
            Ordering::Greater => (b, a),
            _ => (a, b),
        };
        let mut label = String::with_capacity(left.label.len() + right.label.len());
        label.push_str(&left.label);
        label.push_str(&right.label);
        Ok(TreeNode {
            frequency,
            label,
            kind: NodeKind::Internal {
                left: Box::new(left),
                right: Box::new(right),
            },
        })
    }

    pub fn frequency(&self) -> u64 {
        self.frequency
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// the symbol of a leaf, `None` for internal nodes
    pub fn symbol(&self) -> Option<char> {
        match self.kind {
            NodeKind::Leaf { symbol, .. } => Some(symbol),
            NodeKind::Internal { .. } => None,
        }
    }

    /// the code of a leaf once assigned, `None` otherwise
    pub fn code(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Leaf { code, .. } => code.as_deref(),
            NodeKind::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    pub fn left(&self) -> Option<&TreeNode> {
        self.child(false)
    }

    pub fn right(&self) -> Option<&TreeNode> {
        self.child(true)
    }

    /// the child reached by following `bit`: `false` is `0`/left, `true` is `1`/right
    pub fn child(&self, bit: bool) -> Option<&TreeNode> {
        match &self.kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Internal { left, right } => Some(if bit { &**right } else { &**left }),
        }
    }

    /// this node and all nodes beneath it, parents before children, left before right
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }

    /// leaves in left to right order
    pub fn leaves(&self) -> impl Iterator<Item = &TreeNode> {
        self.preorder().filter(|node| node.is_leaf())
    }

    /// number of symbols beneath this node
    fn width(&self) -> usize {
        self.label.chars().count()
    }
}

/// Total order deciding both which nodes merge first and which side of the merge they land on.
///
/// Lower frequency first; on equal frequency the node subsuming fewer symbols; on equal size
/// the smaller label by code point, which for two leaves is plain alphabetical order. Labels of
/// live nodes never share a symbol, so two distinct nodes never compare equal.
pub fn tie_break(a: &TreeNode, b: &TreeNode) -> Ordering {
    a.frequency
        .cmp(&b.frequency)
        .then_with(|| a.width().cmp(&b.width()))
        .then_with(|| a.label.cmp(&b.label))
}

pub struct Preorder<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let NodeKind::Internal { left, right } = &node.kind {
            self.stack.push(right);
            self.stack.push(left);
        }
        Some(node)
    }
}

/// heap entry popping the node ordered first by [`tie_break`]
#[derive(Debug)]
struct Queued(TreeNode);

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap
        tie_break(&other.0, &self.0)
    }
}
impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.cmp(other), Ordering::Equal)
    }
}
impl Eq for Queued {}

/// Greedily merges the two lowest nodes until a single root is left.
#[derive(Debug)]
pub struct TreeBuilder {
    queue: BinaryHeap<Queued>,
}

impl TreeBuilder {
    /// one leaf per table entry, zero frequencies included
    pub fn new(table: &FrequencyTable) -> Self {
        TreeBuilder {
            queue: table.iter().map(|entry| Queued(TreeNode::leaf(*entry))).collect(),
        }
    }

    pub fn build(mut self) -> Result<TreeNode> {
        let mut merges = 0usize;
        loop {
            match (self.queue.pop(), self.queue.pop()) {
                (Some(Queued(a)), Some(Queued(b))) => {
                    let merged = TreeNode::merge(a, b)?;
                    debug!(
                        label = merged.label(),
                        frequency = merged.frequency(),
                        "merged nodes"
                    );
                    self.queue.push(Queued(merged));
                    merges += 1;
                }
                (Some(Queued(root)), None) => {
                    if merges == 0 {
                        warn!(label = root.label(), "single symbol table, its code is empty");
                    }
                    return Ok(root);
                }
                _ => return Err(Error::EmptyTable),
            }
        }
    }
}

/// Assigns each leaf the `0`/`1` path leading to it from the root, in a single traversal.
#[derive(Debug, Default)]
pub struct CodeAssigner {
    path: String,
    codes: BTreeMap<char, String>,
}

impl CodeAssigner {
    pub fn assign(mut root: TreeNode) -> HuffmanTree {
        let mut assigner = CodeAssigner::default();
        assigner.visit(&mut root);
        debug!(leaves = assigner.codes.len(), "assigned codes");
        HuffmanTree {
            root,
            codes: assigner.codes,
        }
    }

    fn visit(&mut self, node: &mut TreeNode) {
        match &mut node.kind {
            NodeKind::Leaf { symbol, code } => {
                *code = Some(self.path.clone());
                self.codes.insert(*symbol, self.path.clone());
            }
            NodeKind::Internal { left, right } => {
                self.path.push('0');
                self.visit(left);
                self.path.pop();
                self.path.push('1');
                self.visit(right);
                self.path.pop();
            }
        }
    }
}

/// A fully built and coded tree along with a symbol to code lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: TreeNode,
    codes: BTreeMap<char, String>,
}

impl HuffmanTree {
    pub fn new(table: &FrequencyTable) -> Result<Self> {
        let root = TreeBuilder::new(table).build()?;
        Ok(CodeAssigner::assign(root))
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn code(&self, symbol: char) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    /// every symbol with its code, ordered by symbol
    pub fn codes(&self) -> &BTreeMap<char, String> {
        &self.codes
    }

    /// a single symbol tree, whose root is a leaf coded by the empty string
    pub fn is_degenerate(&self) -> bool {
        self.root.is_leaf()
    }

    pub fn encoder(&self) -> Encoder<'_> {
        Encoder::new(&self.codes)
    }

    pub fn decoder(&self) -> Decoder<'_> {
        Decoder::new(&self.root)
    }

    pub fn encode(&self, text: &str) -> Result<String> {
        self.encoder().encode(text)
    }

    /// Decodes a textual bitstring.
    ///
    /// For a degenerate tree every bit decodes to the one symbol, while encoding yields the
    /// empty string, so `decode(encode(s)) == s` only holds for two or more symbols.
    pub fn decode(&self, bits: &str) -> Result<String> {
        self.decoder().decode(bits)
    }
}
