// THEORY:
// The `pipeline` module is the top-level API for the whole geometry engine. It wraps
// the layered stack (batch validation, hull construction, calipers search) into a
// single interface: hand it a `PointSetBatch`, get back the hull of every set and,
// optionally, the minimum-area rectangle around each hull.
//
// Data flows one way:
//   PointSetBatch -> hull kernel -> HullIndexBuffer -> resolved hull points
//                 -> rotating calipers -> RectangleResult
//
// The `Execution` setting picks the strategy. `Host` walks the rows one after
// another; `Device` launches one logical worker per row. Both call the same row
// kernels, so their results are identical. In `Device` mode each worker also runs
// the calipers search on its own hull, so a row never leaves its worker until it is
// fully analysed.

use crate::core_modules::device_kernel::{
    DEFAULT_THREADS_PER_GROUP, LaunchConfig, giftwrap_device, map_rows_device,
};
use crate::core_modules::gift_wrapper::wrap_row;
use crate::core_modules::host_kernel::{giftwrap_host, map_rows_host};
use crate::core_modules::rotating_calipers::min_area_rect;
use log::{debug, warn};
use std::str::FromStr;

// Re-export key data structures for the public API.
pub use crate::core_modules::caliper_frame::{CaliperFrame, CaliperRole};
pub use crate::core_modules::error::{GeometryError, Result};
pub use crate::core_modules::hull_buffer::{HullIndexBuffer, SENTINEL};
pub use crate::core_modules::point::point::Point;
pub use crate::core_modules::point_batch::PointSetBatch;
pub use crate::core_modules::rotating_calipers::RectangleResult;

const ENV_EXECUTION: &str = "HULL_VISION_EXECUTION";
const ENV_THREADS_PER_GROUP: &str = "HULL_VISION_THREADS_PER_GROUP";

/// Which execution strategy runs the row kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// One worker, rows in order.
    Host,
    /// One logical worker per row, scheduled in fixed-size groups.
    Device,
}

impl FromStr for Execution {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "host" | "cpu" => Ok(Execution::Host),
            "device" | "parallel" => Ok(Execution::Device),
            other => Err(GeometryError::InvalidLaunchConfig(format!(
                "unknown execution strategy '{other}'"
            ))),
        }
    }
}

/// Configuration for the HullPipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub execution: Execution,
    /// Logical workers per group in `Device` mode.
    pub threads_per_group: usize,
    /// Groups allowed in flight at once in `Device` mode.
    pub concurrent_groups: usize,
    /// Whether `generate_report` runs the calipers search after the hull.
    pub compute_rectangles: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            execution: Execution::Device,
            threads_per_group: DEFAULT_THREADS_PER_GROUP,
            concurrent_groups: num_cpus::get(),
            compute_rectangles: true,
        }
    }
}

impl PipelineConfig {
    /// Defaults, overridden by `HULL_VISION_EXECUTION` and
    /// `HULL_VISION_THREADS_PER_GROUP` when they are set and valid.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = std::env::var(ENV_EXECUTION) {
            match value.parse() {
                Ok(execution) => config.execution = execution,
                Err(e) => warn!("ignoring {ENV_EXECUTION}: {e}"),
            }
        }
        if let Ok(value) = std::env::var(ENV_THREADS_PER_GROUP) {
            match value.trim().parse::<usize>() {
                Ok(threads) if threads > 0 => config.threads_per_group = threads,
                _ => warn!("ignoring {ENV_THREADS_PER_GROUP}='{value}': expected a positive integer"),
            }
        }
        config
    }
}

/// Analysis of one point set.
#[derive(Debug, Clone, PartialEq)]
pub struct SetReport {
    /// Row index in the batch.
    pub set: usize,
    /// Hull vertex indices into the set, clockwise from the leftmost point.
    pub hull: Vec<usize>,
    /// Minimum-area rectangle around the hull, when requested.
    pub rectangle: Option<RectangleResult>,
}

impl SetReport {
    /// The hull as points, in walk order.
    pub fn hull_points(&self, batch: &PointSetBatch) -> Result<Vec<Point>> {
        let row = batch.row(self.set)?;
        Ok(self.hull.iter().map(|&i| row[i]).collect())
    }

    /// The rectangle as four corners, when one was computed.
    pub fn rectangle_corners(&self, batch: &PointSetBatch) -> Result<Option<[Point; 4]>> {
        match &self.rectangle {
            Some(rectangle) => Ok(Some(rectangle.corners(&self.hull_points(batch)?)?)),
            None => Ok(None),
        }
    }
}

/// The primary output of the pipeline for a single batch.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Sentinel-padded hull indices, `[sets][capacity]`.
    pub hulls: HullIndexBuffer,
    /// One report per set, in batch order.
    pub sets: Vec<SetReport>,
}

/// Hull slots of one row plus its rectangle, when requested.
type RowAnalysis = (Vec<i32>, Option<RectangleResult>);

/// Hull and rectangle analysis of one row, run inside a single worker.
fn analyze_row(row: &[Point], compute_rectangles: bool) -> Result<RowAnalysis> {
    let mut slots = vec![SENTINEL; row.len()];
    let count = wrap_row(row, &mut slots);

    let rectangle = if compute_rectangles {
        let hull: Vec<Point> = slots[..count].iter().map(|&i| row[i as usize]).collect();
        Some(min_area_rect(&hull)?)
    } else {
        None
    };
    Ok((slots, rectangle))
}

/// The main, top-level struct for the geometry engine.
pub struct HullPipeline {
    config: PipelineConfig,
}

impl HullPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn launch_config(&self, batch: &PointSetBatch) -> Result<LaunchConfig> {
        LaunchConfig::for_batch(
            batch.sets(),
            self.config.threads_per_group,
            self.config.concurrent_groups,
        )
    }

    /// Builds the hull of every set in the batch.
    pub async fn build_hulls(&self, batch: &PointSetBatch) -> Result<HullIndexBuffer> {
        match self.config.execution {
            Execution::Host => Ok(giftwrap_host(batch)),
            Execution::Device => giftwrap_device(batch, &self.launch_config(batch)?).await,
        }
    }

    /// Builds every hull and, if configured, the minimum-area rectangle of each.
    pub async fn generate_report(&self, batch: &PointSetBatch) -> Result<BatchReport> {
        let compute_rectangles = self.config.compute_rectangles;
        let rows = match self.config.execution {
            Execution::Host => map_rows_host(batch, |row| analyze_row(row, compute_rectangles)),
            Execution::Device => {
                let launch = self.launch_config(batch)?;
                map_rows_device(batch, &launch, move |row: &[Point]| {
                    analyze_row(row, compute_rectangles)
                })
                .await?
            }
        };
        let rows = rows.into_iter().collect::<Result<Vec<RowAnalysis>>>()?;

        let mut slots = Vec::with_capacity(batch.sets() * batch.capacity());
        let mut sets = Vec::with_capacity(batch.sets());
        for (set, (row_slots, rectangle)) in rows.into_iter().enumerate() {
            let hull = row_slots
                .iter()
                .take_while(|&&slot| slot != SENTINEL)
                .map(|&slot| slot as usize)
                .collect();
            slots.extend_from_slice(&row_slots);
            sets.push(SetReport {
                set,
                hull,
                rectangle,
            });
        }

        debug!(
            "report: {} sets, {} hull vertices in total",
            sets.len(),
            sets.iter().map(|s| s.hull.len()).sum::<usize>()
        );

        Ok(BatchReport {
            hulls: HullIndexBuffer::from_slots(batch.sets(), batch.capacity(), slots),
            sets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn demo_batch() -> PointSetBatch {
        PointSetBatch::from_rows(vec![
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
                Point::new(0.5, 0.5),
            ],
            vec![Point::new(4.0, 4.0); 5],
            vec![
                Point::new(0.0, 0.0),
                Point::new(4.0, 0.0),
                Point::new(2.0, 3.0),
                Point::new(2.0, 1.0),
                Point::new(1.0, 0.5),
            ],
        ])
        .unwrap()
    }

    fn config(execution: Execution) -> PipelineConfig {
        PipelineConfig {
            execution,
            threads_per_group: 2,
            concurrent_groups: 2,
            compute_rectangles: true,
        }
    }

    #[test]
    fn every_row_gets_a_rectangle_when_requested() {
        let rows = [
            vec![Point::new(1.0, 1.0)],
            vec![Point::new(-3.0, 0.5); 4],
            vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(1.0, 0.0)],
        ];
        for row in &rows {
            let (slots, rectangle) = analyze_row(row, true).unwrap();
            assert_ne!(slots[0], SENTINEL);
            assert!(rectangle.unwrap().area.abs() < 1e-9);

            let (_, skipped) = analyze_row(row, false).unwrap();
            assert!(skipped.is_none());
        }
    }

    #[test]
    fn execution_parses_case_insensitively() {
        assert_eq!("Device".parse::<Execution>().unwrap(), Execution::Device);
        assert_eq!(" host ".parse::<Execution>().unwrap(), Execution::Host);
        assert!("gpu-ish".parse::<Execution>().is_err());
    }

    #[tokio::test]
    async fn host_and_device_reports_agree() {
        let batch = demo_batch();
        let host = HullPipeline::new(config(Execution::Host))
            .generate_report(&batch)
            .await
            .unwrap();
        let device = HullPipeline::new(config(Execution::Device))
            .generate_report(&batch)
            .await
            .unwrap();
        assert_eq!(host.hulls, device.hulls);
        assert_eq!(host.sets, device.sets);
    }

    #[tokio::test]
    async fn report_matches_build_hulls() {
        let batch = demo_batch();
        let pipeline = HullPipeline::new(config(Execution::Device));
        let hulls = pipeline.build_hulls(&batch).await.unwrap();
        let report = pipeline.generate_report(&batch).await.unwrap();
        assert_eq!(report.hulls, hulls);
    }

    #[tokio::test]
    async fn square_row_yields_unit_rectangle() {
        let batch = demo_batch();
        let report = HullPipeline::new(config(Execution::Host))
            .generate_report(&batch)
            .await
            .unwrap();

        let square = &report.sets[0];
        assert_eq!(square.hull, vec![0, 3, 2, 1]);
        let rectangle = square.rectangle.unwrap();
        assert_relative_eq!(rectangle.area, 1.0, epsilon = 1e-9);

        let corners = square.rectangle_corners(&batch).unwrap().unwrap();
        for corner in corners {
            assert!(corner.x.abs() < 1e-9 || (corner.x - 1.0).abs() < 1e-9);
            assert!(corner.y.abs() < 1e-9 || (corner.y - 1.0).abs() < 1e-9);
        }

        let point = &report.sets[1];
        assert_eq!(point.hull, vec![0]);
        assert_eq!(point.rectangle.unwrap().area, 0.0);
    }

    #[tokio::test]
    async fn rectangles_can_be_skipped() {
        let batch = demo_batch();
        let mut cfg = config(Execution::Device);
        cfg.compute_rectangles = false;
        let report = HullPipeline::new(cfg).generate_report(&batch).await.unwrap();
        assert!(report.sets.iter().all(|s| s.rectangle.is_none()));
        assert_eq!(report.sets[2].hull_points(&batch).unwrap().len(), 3);
    }

    #[tokio::test]
    async fn invalid_launch_is_reported() {
        let batch = demo_batch();
        let mut cfg = config(Execution::Device);
        cfg.threads_per_group = 0;
        let result = HullPipeline::new(cfg).build_hulls(&batch).await;
        assert!(matches!(result, Err(GeometryError::InvalidLaunchConfig(_))));
    }
}
