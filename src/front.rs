//! Skyline / free-rectangle front (SPEC_FULL SS4.2).
//!
//! An ordered sequence of horizontal "steps" describing, for each
//! x-interval, the current top surface of placed rectangles inside a
//! candidate enclosure of fixed width `W`. Grounded on the teacher's
//! `SkylineNode` list (`src/packer/skyline.rs`: `can_put`/`split`/`merge`),
//! stripped of rotation and padding (this domain never rotates rectangles and
//! has no texture padding) and generalized from pixel rects to plain
//! `(x, w, y)` steps.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    x: i64,
    y: i64,
    w: i64,
}

/// One feasible x-position for a rectangle of a given width against the
/// current front, with the waste its placement there would create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub x: i64,
    pub bottom_y: i64,
    pub waste: i64,
}

pub(crate) struct Front {
    width: i64,
    steps: Vec<Step>,
}

impl Front {
    /// Creates a front of the given width, flat at height `0`.
    pub fn new(width: i64) -> Self {
        Self {
            width,
            steps: vec![Step { x: 0, y: 0, w: width }],
        }
    }

    /// Every feasible x-position for a rectangle of width `w`, in increasing
    /// `x` order, together with the bottom-y a placement there would land on
    /// and the waste (dead area beneath the rectangle) it would create.
    ///
    /// This folds the `bottom_y` walk and the waste accumulation into one
    /// pass over the overlapped steps (SPEC_FULL SS4.2/SS4.3 describe them as
    /// two concerns; they share the same linear walk so are computed
    /// together here).
    pub fn candidates(&self, w: i64) -> Vec<Candidate> {
        let mut out = Vec::with_capacity(self.steps.len());
        for start in 0..self.steps.len() {
            let x = self.steps[start].x;
            if x + w > self.width {
                continue;
            }
            let mut bottom_y = i64::MIN;
            let mut covered: i64 = 0;
            let mut i = start;
            while covered < w {
                bottom_y = bottom_y.max(self.steps[i].y);
                covered += self.steps[i].w;
                i += 1;
            }
            // Second pass: now that bottom_y is known, sum the per-segment
            // dead area beneath the rectangle.
            let mut waste: i64 = 0;
            let mut covered: i64 = 0;
            let mut i = start;
            while covered < w {
                let seg = self.steps[i];
                let seg_w_here = (w - covered).min(seg.w);
                waste += (bottom_y - seg.y) * seg_w_here;
                covered += seg.w;
                i += 1;
            }
            out.push(Candidate { x, bottom_y, waste });
        }
        out
    }

    /// Raises the front to height `y_top` across `[x, x + w)`. `x` must be
    /// the `x` of some step (i.e. a value previously returned by
    /// [`Front::candidates`] for this front), which is always true for
    /// winners selected by the scorer.
    pub fn install(&mut self, x: i64, y_top: i64, w: i64) {
        let idx = self
            .steps
            .iter()
            .position(|s| s.x == x)
            .expect("install must target an existing step boundary");

        let mut remaining = w;
        let mut i = idx;
        while remaining > 0 {
            let seg = self.steps[i];
            if seg.w <= remaining {
                remaining -= seg.w;
                self.steps.remove(i);
            } else {
                self.steps[i].x += remaining;
                self.steps[i].w -= remaining;
                remaining = 0;
            }
        }
        self.steps.insert(idx, Step { x, y: y_top, w });
        self.merge();
    }

    fn merge(&mut self) {
        let mut i = 1;
        while i < self.steps.len() {
            if self.steps[i - 1].y == self.steps[i].y {
                let w = self.steps[i].w;
                self.steps[i - 1].w += w;
                self.steps.remove(i);
            } else {
                i += 1;
            }
        }
    }

    #[cfg(test)]
    fn total_width(&self) -> i64 {
        self.steps.iter().map(|s| s.w).sum()
    }
}
