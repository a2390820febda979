use crate::rbt::node::{flip, Node};

// Rotate the sub-tree at `root` towards `dir`, returns the new sub-tree
// root. In-order sequence of keys is preserved.
//
// Rotating towards RIGHT (dir = 1):
//
//              (i)                       (i)
//               |                         |
//              root                     pivot
//              /  \                      / \
//          pivot   r-r                 l-l  root
//           / \                             /  \
//         l-l  l-r                        l-r   r-r
//
pub fn rotate<K, V>(nodes: &mut [Node<K, V>], root: usize, dir: usize) -> usize {
    let pivot = match nodes[root].link[flip(dir)] {
        Some(pivot) => pivot,
        None => panic!("rotate(): missing pivot ? call-the-programmer"),
    };

    nodes[root].link[flip(dir)] = nodes[pivot].link[dir];
    nodes[pivot].link[dir] = Some(root);

    nodes[root].set_red();
    nodes[pivot].set_black();

    pivot
}

// Rotate the child at `root.link[!dir]` towards `!dir` and then rotate
// `root` towards `dir`. Used when the red link to fix is on the inner
// grand-child.
pub fn double_rotate<K, V>(nodes: &mut [Node<K, V>], root: usize, dir: usize) -> usize {
    let child = match nodes[root].link[flip(dir)] {
        Some(child) => child,
        None => panic!("double_rotate(): missing child ? call-the-programmer"),
    };
    nodes[root].link[flip(dir)] = Some(rotate(nodes, child, flip(dir)));
    rotate(nodes, root, dir)
}

#[cfg(test)]
#[path = "rotate_test.rs"]
mod rotate_test;
