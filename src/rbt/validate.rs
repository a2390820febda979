use crate::{
    rbt::{
        node::{is_red, Node, LEFT, RIGHT},
        Depth,
    },
    Error, Result,
};

/// Tree height beyond which validation gives up, a balanced tree would
/// need more than 2^50 entries to reach this depth.
pub const MAX_TREE_DEPTH: usize = 100;

// Walk the sub-tree at `node` and return its black height, absent nodes
// count as one black. `fromred` tells whether the parent is red and `depth`
// is the number of nodes from root up to `node`'s parent. Every node with
// an absent child is sampled into `depths`.
pub fn validate_tree<K, V>(
    nodes: &[Node<K, V>],
    node: Option<usize>,
    fromred: bool,
    depth: usize,
    depths: &mut Depth,
) -> Result<usize>
where
    K: Ord,
{
    let red = is_red(nodes, node);

    let depth = depth + 1;
    let (n, node) = match node {
        Some(n) if fromred && red => {
            err_at!(Fatal, msg: "consecutive reds at node:{} depth:{}", n, depth)?
        }
        Some(n) => (n, &nodes[n]),
        None => return Ok(1),
    };

    if depth > MAX_TREE_DEPTH {
        err_at!(Fatal, msg: "tree exceeds max_depth {}", depth)?;
    }

    // confirm sort order in the tree.
    if let Some(l) = node.link[LEFT] {
        if nodes[l].as_key().ge(node.as_key()) {
            err_at!(Fatal, msg: "sort order left:{}, parent:{} depth:{}", l, n, depth)?;
        }
    }
    if let Some(r) = node.link[RIGHT] {
        if nodes[r].as_key().le(node.as_key()) {
            err_at!(Fatal, msg: "sort order right:{}, parent:{} depth:{}", r, n, depth)?;
        }
    }

    if node.link[LEFT].is_none() || node.link[RIGHT].is_none() {
        depths.sample(depth);
    }

    let lb = validate_tree(nodes, node.link[LEFT], red, depth, depths)?;
    let rb = validate_tree(nodes, node.link[RIGHT], red, depth, depths)?;

    if lb != rb {
        err_at!(Fatal, msg: "unbalanced blacks at node:{} l:{}, r:{}", n, lb, rb)?;
    }

    Ok(if red { lb } else { lb + 1 })
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;
