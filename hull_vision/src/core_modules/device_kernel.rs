// THEORY:
// The device kernel is the massively data-parallel execution strategy. It models a
// GPU-style launch on top of tokio's blocking pool:
//
// 1.  **Bulk Copy In**: The whole batch is copied once into an immutable, shared
//     "device" buffer. Workers only ever read from it.
// 2.  **Launch Grid**: One logical worker per row. Workers are partitioned into
//     fixed-size groups (`threads_per_group`), and `groups = ceil(N / threads_per_group)`.
//     Each group is one blocking task; at most `concurrent_groups` run at a time.
// 3.  **Bounds Guard**: A worker whose row index is past the end of the batch does no
//     work and exits immediately. Only the last group can contain such workers.
// 4.  **Private State**: Each worker owns its row's output outright. There are no
//     locks, barriers or atomics, because rows never interact.
// 5.  **Bulk Copy Out**: Group outputs are gathered in group order and concatenated
//     into the host-side result. If any group fails, the whole batch fails.
//
// `map_rows_device` is the generic launcher; `giftwrap_device` runs the hull kernel
// through it, and the pipeline uses it to chain the calipers search per worker.

use crate::core_modules::error::{GeometryError, Result};
use crate::core_modules::gift_wrapper::wrap_row;
use crate::core_modules::hull_buffer::{HullIndexBuffer, SENTINEL};
use crate::core_modules::point::point::Point;
use crate::core_modules::point_batch::PointSetBatch;
use futures::{StreamExt, TryStreamExt, stream};
use log::debug;
use std::sync::Arc;

/// Worker-group size used when none is configured.
pub const DEFAULT_THREADS_PER_GROUP: usize = 128;

/// Launch geometry for one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Logical workers per group.
    pub threads_per_group: usize,
    /// Number of groups, enough to give every row a worker.
    pub groups: usize,
    /// How many groups may run at the same time.
    pub concurrent_groups: usize,
}

impl LaunchConfig {
    /// Sizes a launch so that every one of `sets` rows gets a worker.
    pub fn for_batch(
        sets: usize,
        threads_per_group: usize,
        concurrent_groups: usize,
    ) -> Result<Self> {
        if threads_per_group == 0 {
            return Err(GeometryError::InvalidLaunchConfig(
                "threads_per_group must be at least 1".to_string(),
            ));
        }
        if concurrent_groups == 0 {
            return Err(GeometryError::InvalidLaunchConfig(
                "concurrent_groups must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            threads_per_group,
            groups: sets.div_ceil(threads_per_group),
            concurrent_groups,
        })
    }

    /// Total logical workers launched, including guarded-out ones.
    pub fn logical_workers(&self) -> usize {
        self.groups * self.threads_per_group
    }
}

/// Read-only copy of a batch in the device memory domain.
struct DeviceBatch {
    sets: usize,
    capacity: usize,
    points: Arc<[Point]>,
}

impl DeviceBatch {
    fn to_device(batch: &PointSetBatch) -> Self {
        Self {
            sets: batch.sets(),
            capacity: batch.capacity(),
            points: Arc::from(batch.as_points()),
        }
    }

    fn row(&self, row: usize) -> &[Point] {
        let start = row * self.capacity;
        &self.points[start..start + self.capacity]
    }
}

/// Runs the logical workers of one group.
fn run_group<T, F>(group: usize, threads_per_group: usize, device: &DeviceBatch, kernel: &F) -> Vec<T>
where
    F: Fn(&[Point]) -> T,
{
    let mut outputs = Vec::with_capacity(threads_per_group);
    for thread in 0..threads_per_group {
        let row = group * threads_per_group + thread;
        if row >= device.sets {
            break;
        }
        outputs.push(kernel(device.row(row)));
    }
    outputs
}

/// Runs `kernel` once per row, one logical worker per row, and returns the outputs
/// in batch order.
pub async fn map_rows_device<T, F>(
    batch: &PointSetBatch,
    launch: &LaunchConfig,
    kernel: F,
) -> Result<Vec<T>>
where
    T: Send + 'static,
    F: Fn(&[Point]) -> T + Send + Sync + 'static,
{
    debug!(
        "device launch: {} sets over {} groups x {} threads ({} concurrent)",
        batch.sets(),
        launch.groups,
        launch.threads_per_group,
        launch.concurrent_groups
    );

    let device = Arc::new(DeviceBatch::to_device(batch));
    let kernel = Arc::new(kernel);
    let threads_per_group = launch.threads_per_group;

    let group_outputs: Vec<Vec<T>> = stream::iter(0..launch.groups)
        .map(move |group| {
            let device = Arc::clone(&device);
            let kernel = Arc::clone(&kernel);
            tokio::task::spawn_blocking(move || {
                run_group(group, threads_per_group, &device, kernel.as_ref())
            })
        })
        .buffered(launch.concurrent_groups)
        .try_collect()
        .await?;

    Ok(group_outputs.into_iter().flatten().collect())
}

/// Builds the hull of every set in `batch` with one logical worker per row.
pub async fn giftwrap_device(
    batch: &PointSetBatch,
    launch: &LaunchConfig,
) -> Result<HullIndexBuffer> {
    let rows = map_rows_device(batch, launch, |row: &[Point]| {
        let mut slots = vec![SENTINEL; row.len()];
        wrap_row(row, &mut slots);
        slots
    })
    .await?;

    let slots: Vec<i32> = rows.into_iter().flatten().collect();
    Ok(HullIndexBuffer::from_slots(
        batch.sets(),
        batch.capacity(),
        slots,
    ))
}
