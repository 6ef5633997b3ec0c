use std::collections::BTreeMap;

use bitvec::prelude::*;

use crate::{
    frequency::{FrequencyMap, Symbol},
    tree::{HuffmanTree, Node},
};

/// The bits of one Huffman code, first bit first.
pub type Code = BitVec<u8, Msb0>;

/// Maps each symbol to its Huffman code.
///
/// Codes are the root-to-leaf paths of a strict binary tree (left = 0,
/// right = 1), so no code is a prefix of another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    sym_to_code: BTreeMap<Symbol, Code>,
}

impl CodeTable {
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut sym_to_code = BTreeMap::new();

        // A lone leaf would otherwise get the empty code, which can't be decoded.
        if let Node::Leaf { symbol, .. } = tree.root() {
            sym_to_code.insert(*symbol, bitvec![u8, Msb0; 0]);
            return Self { sym_to_code };
        }

        let mut stack = vec![(tree.root(), Code::new())];
        while let Some((node, path)) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    sym_to_code.insert(*symbol, path);
                }
                Node::Internal { left, right, .. } => {
                    let mut left_path = path.clone();
                    left_path.push(false);
                    let mut right_path = path;
                    right_path.push(true);

                    stack.push((right.as_ref(), right_path));
                    stack.push((left.as_ref(), left_path));
                }
            }
        }

        Self { sym_to_code }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&BitSlice<u8, Msb0>> {
        self.sym_to_code.get(&symbol).map(|code| code.as_bitslice())
    }

    pub fn len(&self) -> usize {
        self.sym_to_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sym_to_code.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &BitSlice<u8, Msb0>)> + '_ {
        self.sym_to_code
            .iter()
            .map(|(&s, code)| (s, code.as_bitslice()))
    }

    /// Exact size in bits of the payload that encoding `freqs` would produce.
    ///
    /// Symbols absent from the table contribute nothing. Saturates at
    /// `u64::MAX`.
    pub fn encoded_bit_len(&self, freqs: &FrequencyMap) -> u64 {
        freqs
            .iter()
            .filter_map(|(symbol, count)| {
                Some(count.saturating_mul(self.get(symbol)?.len() as u64))
            })
            .fold(0, u64::saturating_add)
    }
}
