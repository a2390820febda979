use crate::rbt::node::{is_red, Color, Node, RIGHT};

/// Position in a top-down walk, either the sentinel head sitting above
/// the root or a node in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum At {
    Head,
    Node(usize),
}

// Sentinel record placed above the root for the duration of a single
// mutation, so that rotations at the root need no special case. Only
// link[RIGHT] is ever populated. Its color is never observed, recoloring
// the head is a no-op.
struct Head {
    link: [Option<usize>; 2],
}

/// Walk binds the arena with a transient head, for a single top-down
/// insert or remove.
pub struct Walk<'a, K, V> {
    head: Head,
    pub nodes: &'a mut Vec<Node<K, V>>,
}

impl<'a, K, V> Walk<'a, K, V> {
    pub fn new(nodes: &'a mut Vec<Node<K, V>>, root: Option<usize>) -> Self {
        let head = Head {
            link: [None, root],
        };
        Walk { head, nodes }
    }

    /// Return the root as hanging from head, consuming the walk.
    pub fn into_root(self) -> Option<usize> {
        self.head.link[RIGHT]
    }

    #[inline]
    pub fn link(&self, at: At, dir: usize) -> Option<usize> {
        match at {
            At::Head => self.head.link[dir],
            At::Node(n) => self.nodes[n].link[dir],
        }
    }

    #[inline]
    pub fn set_link(&mut self, at: At, dir: usize, child: Option<usize>) {
        match at {
            At::Head => self.head.link[dir] = child,
            At::Node(n) => self.nodes[n].link[dir] = child,
        }
    }

    #[inline]
    pub fn set_color(&mut self, at: At, color: Color) {
        match at {
            At::Head => (),
            At::Node(n) => self.nodes[n].color = color,
        }
    }

    #[inline]
    pub fn is_red(&self, node: Option<usize>) -> bool {
        is_red(&self.nodes[..], node)
    }

    /// Direction under `at` that currently holds `child`.
    #[inline]
    pub fn dir_of(&self, at: At, child: usize) -> usize {
        (self.link(at, RIGHT) == Some(child)) as usize
    }

    /// Add a fresh red node into the arena, returns its handle.
    pub fn alloc(&mut self, key: K, value: V) -> usize {
        self.nodes.push(Node::new(key, value));
        self.nodes.len() - 1
    }
}

#[cfg(test)]
#[path = "walk_test.rs"]
mod walk_test;
