// THEORY:
// The `HullIndexBuffer` is the output container of the hull builder: a rectangular
// `[N][M]` grid of `i32` slots. Each row lists the indices of its set's hull vertices
// in clockwise walk order, followed by `SENTINEL` (-1) in every unused trailing slot.
//
// The sentinel-padded layout keeps the buffer flat and allocation free per row, which
// is what lets the data-parallel kernel hand each worker a fixed-size slice. Callers
// that want the variable-length view use `valid_indices` or `resolve_points`, which
// stop at the first sentinel.

use crate::core_modules::error::{GeometryError, Result};
use crate::core_modules::point::point::Point;
use crate::core_modules::point_batch::PointSetBatch;

/// Marks an unused hull slot ("no vertex").
pub const SENTINEL: i32 = -1;

/// Per-set hull vertex indices, padded with [`SENTINEL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HullIndexBuffer {
    sets: usize,
    capacity: usize,
    slots: Vec<i32>,
}

impl HullIndexBuffer {
    /// A buffer of `sets` rows, every slot holding the sentinel.
    pub fn new(sets: usize, capacity: usize) -> Self {
        Self {
            sets,
            capacity,
            slots: vec![SENTINEL; sets * capacity],
        }
    }

    /// Wraps flat row-major slots produced by a kernel.
    pub(crate) fn from_slots(sets: usize, capacity: usize, slots: Vec<i32>) -> Self {
        debug_assert_eq!(slots.len(), sets * capacity);
        Self {
            sets,
            capacity,
            slots,
        }
    }

    pub(crate) fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, i32> {
        self.slots.chunks_exact_mut(self.capacity)
    }

    pub fn sets(&self) -> usize {
        self.sets
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn row(&self, set: usize) -> Result<&[i32]> {
        let range = self.row_range(set)?;
        Ok(&self.slots[range])
    }

    pub fn row_mut(&mut self, set: usize) -> Result<&mut [i32]> {
        let range = self.row_range(set)?;
        Ok(&mut self.slots[range])
    }

    fn row_range(&self, set: usize) -> Result<std::ops::Range<usize>> {
        if set >= self.sets {
            return Err(GeometryError::SetOutOfRange {
                set,
                sets: self.sets,
            });
        }
        let start = set * self.capacity;
        Ok(start..start + self.capacity)
    }

    /// Number of hull vertices recorded for `set`.
    pub fn hull_len(&self, set: usize) -> Result<usize> {
        Ok(self.valid_indices(set)?.count())
    }

    /// Hull vertex indices of `set`, in walk order, sentinels stripped.
    pub fn valid_indices(&self, set: usize) -> Result<impl Iterator<Item = usize> + '_> {
        Ok(self
            .row(set)?
            .iter()
            .take_while(|&&slot| slot != SENTINEL)
            .map(|&slot| slot as usize))
    }

    /// The hull of `set` as an ordered (clockwise) list of points.
    pub fn resolve_points(&self, batch: &PointSetBatch, set: usize) -> Result<Vec<Point>> {
        let row = batch.row(set)?;
        Ok(self.valid_indices(set)?.map(|index| row[index]).collect())
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.slots
    }

    /// Appends the rows of `other` after the rows of `self`.
    pub fn concat(&self, other: &HullIndexBuffer) -> Result<Self> {
        if other.capacity != self.capacity {
            return Err(GeometryError::RaggedBatch {
                set: self.sets,
                expected: self.capacity,
                found: other.capacity,
            });
        }
        let mut slots = self.slots.clone();
        slots.extend_from_slice(&other.slots);
        Ok(Self::from_slots(self.sets + other.sets, self.capacity, slots))
    }
}
