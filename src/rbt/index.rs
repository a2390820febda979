// Module ``index`` implement a [red-black tree][rbt] that balances
// itself top-down.
//
// Both insert and remove make a single pass from the root, fixing colors
// and rotating sub-trees on the way down, so there is no walk back to the
// root after the mutation. The algorithm is the one described by
// Julienne Walker, refer [eternally confuzzled][ec].
//
// Nodes are held in an arena, a flat vector addressed by handles. Links
// are handles into the same vector and the arena is owned by the index,
// hence cloning an index is a deep-copy and dropping it never recurses.
//
// [rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
// [ec]: https://web.archive.org/web/2014/http://eternallyconfuzzled.com/tuts/datastructures/jsw_tut_rbtree.aspx

use log::debug;

use std::{borrow::Borrow, cmp::Ordering, fmt, mem};

use crate::{
    rbt::{
        node::{flip, is_red, Color, Node, LEFT, RIGHT},
        rotate::{double_rotate, rotate},
        validate::validate_tree,
        walk::{At, Walk},
        Config, Depth, Stats,
    },
    Error, Result,
};

/// Index type, an ordered set of unique keys, each key mapped to a value.
#[derive(Clone)]
pub struct Index<K, V> {
    name: String,
    validate: bool,

    root: Option<usize>,
    nodes: Vec<Node<K, V>>,
}

impl<K, V> Index<K, V> {
    /// Create an empty index, with default configuration.
    pub fn new(name: &str) -> Index<K, V> {
        Index::from_config(Config::new(name))
    }

    /// Create an empty index from `config`.
    pub fn from_config(config: Config) -> Index<K, V> {
        debug!("{}, new index validate:{}", config.name, config.validate);

        Index {
            name: config.name,
            validate: config.validate,

            root: None,
            nodes: Vec::default(),
        }
    }

    /// Return name of this index instance.
    #[inline]
    pub fn to_name(&self) -> String {
        self.name.clone()
    }

    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return whether index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Return quick statistics, without walking the tree.
    pub fn to_stats(&self) -> Stats {
        let mut stats = Stats::new(&self.name);
        stats.node_size = mem::size_of::<Node<K, V>>();
        stats.n_count = self.nodes.len();
        // blacks and depths are available only from validate call.
        stats
    }
}

impl<K, V> Index<K, V>
where
    K: Ord,
{
    /// Return whether `key` is present in the index.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Get the value for `key`. If key is not found return None.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|n| self.nodes[n].as_value())
    }

    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root;
        while let Some(n) = node {
            let nref = &self.nodes[n];
            node = match key.cmp(nref.as_key().borrow()) {
                Ordering::Less => nref.link[LEFT],
                Ordering::Greater => nref.link[RIGHT],
                Ordering::Equal => return Some(n),
            };
        }
        None
    }
}

impl<K, V> Index<K, V>
where
    K: Ord,
{
    /// Insert `key`, `value` into index. If an entry already exists with
    /// the same key, this call is a no-op and the older value is retained.
    pub fn insert(&mut self, key: K, value: V) {
        let root = match self.root {
            Some(root) => root,
            None => {
                let mut node = Node::new(key, value);
                node.set_black();
                self.nodes.push(node);
                self.root = Some(0);
                self.check_invariants("insert");
                return;
            }
        };

        let mut w = Walk::new(&mut self.nodes, Some(root));

        // great-grand-parent, grand-parent, parent and the current node.
        let mut t = At::Head;
        let (mut g, mut p, mut q): (Option<usize>, Option<usize>, Option<usize>) =
            (None, None, Some(root));
        // direction from p to q, and from g to p.
        let (mut dir, mut last) = (LEFT, LEFT);

        loop {
            let qn = match q {
                Some(qn) => qn,
                None => {
                    // insertion point, p cannot be empty here.
                    let pn = match p {
                        Some(pn) => pn,
                        None => unreachable!(),
                    };
                    let qn = w.alloc(key, value);
                    w.set_link(At::Node(pn), dir, Some(qn));
                    fix_red_violation(&mut w, t, g, pn, qn, last);
                    break;
                }
            };

            // split the 4-node on the way down.
            if let [Some(left), Some(right)] = w.nodes[qn].link {
                if w.nodes[left].is_red() && w.nodes[right].is_red() {
                    w.set_color(At::Node(qn), Color::Red);
                    w.set_color(At::Node(left), Color::Black);
                    w.set_color(At::Node(right), Color::Black);
                }
            }

            if let Some(pn) = p {
                fix_red_violation(&mut w, t, g, pn, qn, last);
            }

            last = dir;
            dir = match w.nodes[qn].as_key().cmp(&key) {
                Ordering::Equal => break, // first insert wins
                Ordering::Less => RIGHT,
                Ordering::Greater => LEFT,
            };

            if let Some(gn) = g {
                t = At::Node(gn);
            }
            g = p;
            p = Some(qn);
            q = w.nodes[qn].link[dir];
        }

        self.root = w.into_root();
        self.set_root_black();
        self.check_invariants("insert");
    }

    /// Remove the entry matching `key` from the index. If key is not
    /// present this call is a no-op, except that the tree might get
    /// re-colored and rotated along the path searched for `key`.
    pub fn remove<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if self.root.is_none() {
            return;
        }

        let mut w = Walk::new(&mut self.nodes, self.root);

        // grand-parent, parent and the current node, with found node.
        let mut g: At;
        let (mut p, mut q) = (At::Head, At::Head);
        let mut f: Option<usize> = None;
        let mut dir = RIGHT;

        while let Some(next) = w.link(q, dir) {
            let last = dir;

            g = p;
            p = q;
            q = At::Node(next);

            dir = match key.cmp(w.nodes[next].as_key().borrow()) {
                Ordering::Greater => RIGHT,
                Ordering::Less => LEFT,
                Ordering::Equal => {
                    f = Some(next);
                    LEFT
                }
            };

            // push a red node ahead of the descent.
            if w.is_red(Some(next)) || w.is_red(w.link(q, dir)) {
                continue;
            }

            if w.is_red(w.link(q, flip(dir))) {
                let r = rotate(w.nodes, next, dir);
                w.set_link(p, last, Some(r));
                p = At::Node(r);
                continue;
            }

            let s = match w.link(p, flip(last)) {
                Some(s) => s,
                None => continue,
            };
            let [s_left, s_right] = w.nodes[s].link;
            if !w.is_red(s_left) && !w.is_red(s_right) {
                // color flip.
                w.set_color(p, Color::Black);
                w.set_color(At::Node(s), Color::Red);
                w.set_color(q, Color::Red);
                continue;
            }

            // sibling has a red child, p is a node since head has no sibling.
            let pn = match p {
                At::Node(pn) => pn,
                At::Head => unreachable!(),
            };
            let dir2 = w.dir_of(g, pn);
            let r = if w.is_red(w.nodes[s].link[last]) {
                double_rotate(w.nodes, pn, last)
            } else {
                rotate(w.nodes, pn, last)
            };
            w.set_link(g, dir2, Some(r));

            w.set_color(q, Color::Red);
            w.set_color(At::Node(r), Color::Red);
            let [r_left, r_right] = w.nodes[r].link;
            for child in [r_left, r_right].iter().flatten() {
                w.set_color(At::Node(*child), Color::Black);
            }
        }

        // q terminates the walk, it has atmost one child.
        let unlinked = match (f, q) {
            (Some(fnode), At::Node(qn)) => {
                if fnode != qn {
                    let (fref, qref) = pair_mut(w.nodes, fnode, qn);
                    mem::swap(&mut fref.key, &mut qref.key);
                    mem::swap(&mut fref.value, &mut qref.value);
                }
                let child = w.nodes[qn].to_sole_child();
                let pdir = w.dir_of(p, qn);
                w.set_link(p, pdir, child);
                Some(qn)
            }
            (_, _) => None,
        };

        self.root = w.into_root();
        self.set_root_black();
        if let Some(qn) = unlinked {
            self.free(qn);
        }
        self.check_invariants("remove");
    }

    /// Validate the red-black rules:
    ///
    /// * Root node is always black in color.
    /// * Make sure that the maximum depth do not exceed 100.
    /// * Keys are in sort order, no duplicates.
    /// * No red node has a red child.
    /// * Number of blacks are same on every path from root to leaf.
    ///
    /// Additionally return full statistics on the tree. Refer to [Stats]
    /// for more information.
    pub fn validate(&self) -> Result<Stats> {
        let (red, depth) = (is_red(&self.nodes, self.root), 0);
        if red {
            err_at!(Fatal, msg: "root node must be black")?;
        }

        let mut depths = Depth::default();
        let blacks = validate_tree(&self.nodes, self.root, red, depth, &mut depths)?;

        let n_count = self.count_reachable();
        if n_count != self.nodes.len() {
            err_at!(Fatal, msg: "n_count {} != {}", n_count, self.nodes.len())?;
        }

        let mut stats = self.to_stats();
        stats.blacks = Some(blacks);
        stats.depths = Some(depths);
        Ok(stats)
    }

    // free node `qn`, already unlinked from the tree. The arena's tail
    // node is moved into the hole and its parent link re-pointed.
    fn free(&mut self, qn: usize) {
        let tail = self.nodes.len() - 1;
        if qn != tail {
            match self.find_parent(tail) {
                Some((parent, dir)) => self.nodes[parent].link[dir] = Some(qn),
                None => self.root = Some(qn),
            }
        }
        self.nodes.swap_remove(qn);
    }

    // locate the link referring to `child`, None if `child` is the root.
    fn find_parent(&self, child: usize) -> Option<(usize, usize)> {
        let key = self.nodes[child].as_key();

        let mut node = self.root;
        let mut parent = None;
        while let Some(n) = node {
            if n == child {
                return parent;
            }
            let dir = match self.nodes[n].as_key().cmp(key) {
                Ordering::Less => RIGHT,
                _ => LEFT,
            };
            parent = Some((n, dir));
            node = self.nodes[n].link[dir];
        }

        // every node in the arena is reachable from root.
        unreachable!()
    }

    fn count_reachable(&self) -> usize {
        let (mut n_count, mut stack) = (0, vec![]);
        stack.extend(self.root);
        while let Some(n) = stack.pop() {
            n_count += 1;
            stack.extend(self.nodes[n].link.iter().flatten());
        }
        n_count
    }

    fn set_root_black(&mut self) {
        if let Some(root) = self.root {
            self.nodes[root].set_black()
        }
    }

    #[cfg(debug_assertions)]
    fn check_invariants(&self, op: &str) {
        if self.validate {
            if let Err(err) = self.validate() {
                log::error!("{}, after {}: {}", self.name, op, err);
                panic!("{}, corrupted tree after {}: {}", self.name, op, err);
            }
        }
    }

    #[cfg(not(debug_assertions))]
    #[inline]
    fn check_invariants(&self, _op: &str) {}
}

impl<K, V> fmt::Debug for Index<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Index<{},n_count:{}>", self.name, self.nodes.len())
    }
}

// when q and its parent p are both red, rotate at grand-parent g and
// re-link the rotated sub-tree under t.
fn fix_red_violation<K, V>(
    w: &mut Walk<K, V>,
    t: At,
    g: Option<usize>,
    p: usize,
    q: usize,
    last: usize,
) {
    if !(w.is_red(Some(q)) && w.is_red(Some(p))) {
        return;
    }

    // red-red links show up only below the root's children.
    let gn = match g {
        Some(gn) => gn,
        None => unreachable!(),
    };
    let dir2 = w.dir_of(t, gn);
    let r = if w.nodes[p].link[last] == Some(q) {
        rotate(w.nodes, gn, flip(last))
    } else {
        double_rotate(w.nodes, gn, flip(last))
    };
    w.set_link(t, dir2, Some(r));
}

// borrow two distinct nodes mutably.
fn pair_mut<K, V>(
    nodes: &mut [Node<K, V>],
    a: usize,
    b: usize,
) -> (&mut Node<K, V>, &mut Node<K, V>) {
    if a < b {
        let (x, y) = nodes.split_at_mut(b);
        (&mut x[a], &mut y[0])
    } else {
        let (x, y) = nodes.split_at_mut(a);
        (&mut y[0], &mut x[b])
    }
}

#[cfg(test)]
#[path = "index_test.rs"]
mod index_test;
