// THEORY:
// The host kernel is the sequential execution strategy: one worker walks every row
// of the batch in order. Its only working state is what `wrap_row` keeps on the
// stack for the row at hand (current hull vertex, running endpoint), so there is
// nothing to share and nothing to lock.

use crate::core_modules::gift_wrapper::wrap_row;
use crate::core_modules::hull_buffer::HullIndexBuffer;
use crate::core_modules::point::point::Point;
use crate::core_modules::point_batch::PointSetBatch;
use log::debug;

/// Builds the hull of every set in `batch`, one row after another.
pub fn giftwrap_host(batch: &PointSetBatch) -> HullIndexBuffer {
    debug!(
        "host giftwrap: {} sets x {} points",
        batch.sets(),
        batch.capacity()
    );
    let mut hull = HullIndexBuffer::new(batch.sets(), batch.capacity());
    for (row, slots) in batch.rows().zip(hull.rows_mut()) {
        wrap_row(row, slots);
    }
    hull
}

/// Runs `kernel` over every row in batch order and collects its outputs.
pub fn map_rows_host<T, F>(batch: &PointSetBatch, mut kernel: F) -> Vec<T>
where
    F: FnMut(&[Point]) -> T,
{
    batch.rows().map(|row| kernel(row)).collect()
}
