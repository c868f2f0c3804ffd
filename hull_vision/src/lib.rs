// THEORY:
// This file is the main entry point for the `hull_vision` library crate.
// It follows the standard Rust convention of using `lib.rs` to define the public
// API that will be exposed to external consumers (like the `visual_tester` tool).
//
// The primary goal is to export the `HullPipeline` and its associated data
// structures (`PipelineConfig`, `BatchReport`, etc.) as the high-level interface
// for the whole engine. The lower-level building blocks (`core_modules`) stay
// public as well, so a caller can run a single kernel or a single calipers search
// without going through the pipeline.

pub mod core_modules;
pub mod pipeline;

pub use core_modules::bounding_box::{Bounds, rotated_bbox_corners};
pub use core_modules::device_kernel::{LaunchConfig, giftwrap_device};
pub use core_modules::host_kernel::giftwrap_host;
pub use core_modules::rotating_calipers::min_area_rect;
pub use pipeline::{
    BatchReport, CaliperFrame, CaliperRole, Execution, GeometryError, HullIndexBuffer,
    HullPipeline, PipelineConfig, Point, PointSetBatch, RectangleResult, Result, SENTINEL,
    SetReport,
};
