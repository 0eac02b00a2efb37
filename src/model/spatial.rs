//! 3D spatial index for neighbor queries.
//!
//! A uniform linked-cell hash grid over the world volume. Buckets store
//! intrusive singly-linked lists in flat vectors, so a rebuild every tick is
//! allocation-free after warm-up. Queries return every registered point
//! within a euclidean radius of the probe point, the querying cell included
//! if it was inserted.

use glam::DVec3;

pub struct SpatialHash {
    pub cell_size: f64,
    cols: usize,
    rows: usize,
    layers: usize,
    heads: Vec<i32>,
    next: Vec<i32>,
    entries: Vec<(usize, DVec3)>,
}

impl SpatialHash {
    pub fn new(cell_size: f64, width: f64, height: f64, depth: f64) -> Self {
        let cols = (width / cell_size).ceil().max(1.0) as usize;
        let rows = (height / cell_size).ceil().max(1.0) as usize;
        let layers = (depth / cell_size).ceil().max(1.0) as usize;
        Self {
            cell_size,
            cols,
            rows,
            layers,
            heads: vec![-1; cols * rows * layers],
            next: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.heads.fill(-1);
        self.next.clear();
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline(always)]
    fn bucket_idx(&self, point: DVec3) -> Option<usize> {
        let cx = (point.x / self.cell_size).floor() as i64;
        let cy = (point.y / self.cell_size).floor() as i64;
        let cz = (point.z / self.cell_size).floor() as i64;
        if cx >= 0
            && cx < self.cols as i64
            && cy >= 0
            && cy < self.rows as i64
            && cz >= 0
            && cz < self.layers as i64
        {
            Some(
                (cz as usize * self.rows + cy as usize) * self.cols + cx as usize,
            )
        } else {
            None
        }
    }

    /// Registers a point under an external index. Points outside the world
    /// volume are silently skipped.
    pub fn insert(&mut self, point: DVec3, index: usize) {
        if let Some(bucket) = self.bucket_idx(point) {
            let entry_idx = self.entries.len() as i32;
            self.entries.push((index, point));
            self.next.push(self.heads[bucket]);
            self.heads[bucket] = entry_idx;
        }
    }

    /// Rebuilds the grid from a fresh position snapshot, indices matching
    /// the slice order.
    pub fn rebuild(&mut self, positions: &[DVec3]) {
        self.clear();
        for (idx, &point) in positions.iter().enumerate() {
            self.insert(point, idx);
        }
    }

    /// Returns the indices of all points within `radius` of `point`,
    /// including a point registered exactly at `point` itself.
    pub fn search(&self, point: DVec3, radius: f64) -> Vec<usize> {
        let mut result = Vec::new();
        let radius_sq = radius * radius;
        let min_cx = ((point.x - radius) / self.cell_size).floor() as i64;
        let max_cx = ((point.x + radius) / self.cell_size).floor() as i64;
        let min_cy = ((point.y - radius) / self.cell_size).floor() as i64;
        let max_cy = ((point.y + radius) / self.cell_size).floor() as i64;
        let min_cz = ((point.z - radius) / self.cell_size).floor() as i64;
        let max_cz = ((point.z + radius) / self.cell_size).floor() as i64;

        for cz in min_cz..=max_cz {
            if cz < 0 || cz >= self.layers as i64 {
                continue;
            }
            for cy in min_cy..=max_cy {
                if cy < 0 || cy >= self.rows as i64 {
                    continue;
                }
                for cx in min_cx..=max_cx {
                    if cx < 0 || cx >= self.cols as i64 {
                        continue;
                    }

                    let bucket =
                        (cz as usize * self.rows + cy as usize) * self.cols + cx as usize;
                    let mut head = self.heads[bucket];
                    while head != -1 {
                        let (index, pos) = self.entries[head as usize];
                        if pos.distance_squared(point) <= radius_sq {
                            result.push(index);
                        }
                        head = self.next[head as usize];
                    }
                }
            }
        }
        result
    }
}
