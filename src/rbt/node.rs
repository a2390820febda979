/// Left child, index into [Node::link].
pub const LEFT: usize = 0;
/// Right child, index into [Node::link].
pub const RIGHT: usize = 1;

/// Return the opposite direction, `!dir`.
#[inline]
pub fn flip(dir: usize) -> usize {
    dir ^ 1
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

// Node corresponds to a single entry in the tree. Children are handles
// into the arena owned by the index, and each handle is referenced by
// exactly one parent link (or by the index root).
#[derive(Clone, Debug)]
pub struct Node<K, V> {
    pub key: K,
    pub value: V,
    pub link: [Option<usize>; 2], // store: left and right child
    pub color: Color,
}

impl<K, V> Node<K, V> {
    /// New nodes are always red, with no children.
    pub fn new(key: K, value: V) -> Node<K, V> {
        Node {
            key,
            value,
            link: [None, None],
            color: Color::Red,
        }
    }

    #[inline]
    pub fn set_red(&mut self) {
        self.color = Color::Red
    }

    #[inline]
    pub fn set_black(&mut self) {
        self.color = Color::Black
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline]
    pub fn as_key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub fn as_value(&self) -> &V {
        &self.value
    }

    /// Return the only present child, if any. Meaningful for nodes with
    /// at most one child.
    #[inline]
    pub fn to_sole_child(&self) -> Option<usize> {
        self.link[(self.link[LEFT].is_none()) as usize]
    }
}

/// Color check for an optional handle, absent nodes are black.
#[inline]
pub fn is_red<K, V>(nodes: &[Node<K, V>], node: Option<usize>) -> bool {
    node.map_or(false, |n| nodes[n].is_red())
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
