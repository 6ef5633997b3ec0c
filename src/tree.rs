use std::{cmp::Ordering, collections::BinaryHeap};

use tracing::trace;

use crate::{
    errors::{Error, Result},
    frequency::{FrequencyMap, Symbol},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }
}

/// A Huffman tree, built deterministically from a frequency map.
///
/// Building twice from equal maps always yields equal trees, which is what
/// lets the decoder recover the encoder's codes from the frequency table alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    pub fn build(freqs: &FrequencyMap) -> Result<Self> {
        let mut heap: BinaryHeap<Pending> = freqs
            .iter()
            .map(|(symbol, weight)| Pending {
                weight,
                min_symbol: symbol,
                node: Node::Leaf { symbol, weight },
            })
            .collect();

        // Merge the two lightest subtrees until only the root is left.
        let root = loop {
            let Some(left) = heap.pop() else {
                return Err(Error::InvalidInput(
                    "cannot build a Huffman tree with no symbols".into(),
                ));
            };
            let Some(right) = heap.pop() else {
                break left.node;
            };
            heap.push(left.merge(right)?);
        };

        trace!(
            symbols = freqs.len(),
            weight = root.weight(),
            "built Huffman tree"
        );

        Ok(Self { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }
}

/// A subtree waiting in the priority queue.
///
/// `min_symbol` is the smallest symbol among the subtree's leaves. Subtrees in
/// the queue never share leaves, so `(weight, min_symbol)` is unique per entry
/// and the extraction order is fully determined.
#[derive(Debug)]
struct Pending {
    weight: u64,
    min_symbol: Symbol,
    node: Node,
}

impl Pending {
    fn merge(self, other: Pending) -> Result<Pending> {
        let weight = self.weight.checked_add(other.weight).ok_or_else(|| {
            Error::InvalidInput("symbol counts overflow a 64-bit total".into())
        })?;

        Ok(Pending {
            weight,
            min_symbol: self.min_symbol.min(other.min_symbol),
            node: Node::Internal {
                weight,
                left: Box::new(self.node),
                right: Box::new(other.node),
            },
        })
    }

    fn key(&self) -> (u64, Symbol) {
        (self.weight, self.min_symbol)
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    /// Reversed, so that `BinaryHeap` (a max-heap) pops the lightest subtree first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(symbol: u8, weight: u64) -> Node {
        Node::Leaf { symbol, weight }
    }

    fn internal(left: Node, right: Node) -> Node {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[test]
    fn empty_map_is_rejected() {
        let err = HuffmanTree::build(&FrequencyMap::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn single_symbol_is_a_bare_leaf() {
        let tree = HuffmanTree::build(&FrequencyMap::from_bytes(b"aaaa")).unwrap();
        assert_eq!(tree.root(), &leaf(b'a', 4));
    }

    #[test]
    fn abracadabra_shape() {
        let tree = HuffmanTree::build(&FrequencyMap::from_bytes(b"abracadabra")).unwrap();

        // c+d (tie at 1, 'c' first), then b beats cd (tie at 2, 'b' < 'c'),
        // then r joins them, and finally a.
        let cd = internal(leaf(b'c', 1), leaf(b'd', 1));
        let bcd = internal(leaf(b'b', 2), cd);
        let rbcd = internal(leaf(b'r', 2), bcd);
        let expected = internal(leaf(b'a', 5), rbcd);

        assert_eq!(tree.root(), &expected);
        assert_eq!(tree.root().weight(), 11);
    }

    /// On equal weight, the subtree holding the smallest symbol is taken
    /// first, whether it's a leaf or a merged node.
    #[test]
    fn ties_break_on_smallest_symbol() {
        let freqs: FrequencyMap = [(b'a', 1), (b'b', 1), (b'c', 2)].into_iter().collect();
        let tree = HuffmanTree::build(&freqs).unwrap();
        let ab = internal(leaf(b'a', 1), leaf(b'b', 1));
        assert_eq!(tree.root(), &internal(ab, leaf(b'c', 2)));

        let freqs: FrequencyMap = [(b'x', 1), (b'y', 1), (b'a', 2)].into_iter().collect();
        let tree = HuffmanTree::build(&freqs).unwrap();
        let xy = internal(leaf(b'x', 1), leaf(b'y', 1));
        assert_eq!(tree.root(), &internal(leaf(b'a', 2), xy));
    }

    #[test]
    fn internal_weights_are_child_sums() {
        fn check(node: &Node) {
            if let Node::Internal {
                weight,
                left,
                right,
            } = node
            {
                assert_eq!(*weight, left.weight() + right.weight());
                check(left);
                check(right);
            }
        }

        let freqs = FrequencyMap::from_bytes(b"the quick brown fox jumps over the lazy dog");
        let tree = HuffmanTree::build(&freqs).unwrap();
        check(tree.root());
        assert_eq!(tree.root().weight(), freqs.total());
    }

    #[test]
    fn weight_overflow_is_rejected() {
        let freqs: FrequencyMap = [(b'x', u64::MAX), (b'y', 1)].into_iter().collect();
        let err = HuffmanTree::build(&freqs).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
