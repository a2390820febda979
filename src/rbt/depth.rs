use std::{fmt, result};

/// Statistic type, that captures minimum, maximum, average and percentile
/// of path length from root to the nodes with at least one absent child.
///
/// Maximum depth is the height of the tree.
#[derive(Clone)]
pub struct Depth {
    samples: usize,
    min: usize,
    max: usize,
    total: usize,
    // histogram of samples, indexed by depth, grows on demand.
    depths: Vec<u64>,
}

impl Depth {
    // record the number of nodes on a single path from root to a node
    // missing one or both children.
    pub(crate) fn sample(&mut self, depth: usize) {
        if depth >= self.depths.len() {
            self.depths.resize(depth + 1, 0);
        }
        self.samples += 1;
        self.total += depth;
        self.min = usize::min(self.min, depth);
        self.max = usize::max(self.max, depth);
        self.depths[depth] += 1;
    }

    /// Return number of samples recorded.
    pub fn to_samples(&self) -> usize {
        self.samples
    }

    /// Return the shortest sampled path.
    pub fn to_min(&self) -> usize {
        self.min
    }

    /// Return the longest sampled path, which is the tree height.
    pub fn to_max(&self) -> usize {
        self.max
    }

    /// Return the average sampled path.
    pub fn to_mean(&self) -> usize {
        match self.samples {
            0 => 0,
            n => self.total / n,
        }
    }

    /// Return depth as tuple of percentiles, each tuple provides
    /// (percentile, depth). Returned percentiles from 91 .. 100
    pub fn to_percentiles(&self) -> Vec<(u8, usize)> {
        let mut percentiles: Vec<(u8, usize)> = vec![];
        let (mut acc, mut prev_perc) = (0_u64, 90_u8);
        let iter = self.depths.iter().enumerate().filter(|(_, &item)| item > 0);
        for (depth, samples) in iter {
            acc += *samples;
            let perc = ((acc as f64 / (self.samples as f64)) * 100_f64) as u8;
            if perc > prev_perc {
                percentiles.push((perc, depth));
                prev_perc = perc;
            }
        }
        percentiles
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        let (m, n, x) = (self.to_min(), self.to_mean(), self.to_max());
        let props: Vec<String> = self
            .to_percentiles()
            .into_iter()
            .map(|(perc, depth)| format!(r#""{}" = {}"#, perc, depth))
            .collect();
        let depth = props.join(", ");

        write!(
            f,
            concat!(
                "{{ samples={}, min={}, mean={}, max={}, ",
                "percentiles={{ {} }} }}"
            ),
            self.samples, m, n, x, depth
        )
    }
}

impl Default for Depth {
    fn default() -> Self {
        Depth {
            samples: 0,
            min: usize::MAX,
            max: usize::MIN,
            total: 0,
            depths: Vec::default(),
        }
    }
}

#[cfg(test)]
#[path = "depth_test.rs"]
mod depth_test;
