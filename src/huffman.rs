use crate::symbol::Symbol;

pub type Weight = u64;
pub type CreationIndex = u32;

/// A node of one pattern's Huffman tree. Children are owned, so a tree is
/// acyclic and dropped as a whole once its codebook has been extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        weight: Weight,
        creation: CreationIndex,
    },
    Internal {
        weight: Weight,
        creation: CreationIndex,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// The fields an ordering policy is allowed to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeKey {
    pub weight: Weight,
    /// `Some` for leaves, `None` for internal nodes.
    pub symbol: Option<Symbol>,
    pub creation: CreationIndex,
}

impl NodeKey {
    pub fn is_leaf(&self) -> bool {
        self.symbol.is_some()
    }

    pub fn rank(&self) -> Option<usize> {
        self.symbol.map(Symbol::rank)
    }
}

impl Node {
    pub fn leaf(symbol: Symbol, weight: Weight, creation: CreationIndex) -> Self {
        Node::Leaf {
            symbol,
            weight,
            creation,
        }
    }

    pub fn weight(&self) -> Weight {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn creation(&self) -> CreationIndex {
        match self {
            Node::Leaf { creation, .. } | Node::Internal { creation, .. } => *creation,
        }
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn key(&self) -> NodeKey {
        NodeKey {
            weight: self.weight(),
            symbol: self.symbol(),
            creation: self.creation(),
        }
    }

    pub fn children(&self) -> Option<(&Node, &Node)> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some((left, right)),
        }
    }
}

/// A finished tree: the root plus how many merges produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    pub root: Node,
    pub merges: usize,
}

impl HuffmanTree {
    pub fn weight(&self) -> Weight {
        self.root.weight()
    }

    /// All nodes, parents before children, left before right.
    pub fn nodes(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            out.push(node);
            if let Some((left, right)) = node.children() {
                stack.push(right);
                stack.push(left);
            }
        }
        out
    }

    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        self.nodes().into_iter().filter(|n| n.is_leaf())
    }
}
