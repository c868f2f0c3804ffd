// This file is an example of how to use the `hull_vision` library.
// The main library entry point is `src/lib.rs`.

use hull_vision::{HullPipeline, PipelineConfig, Point, PointSetBatch};
use log::info;

fn demo_batch() -> hull_vision::Result<PointSetBatch> {
    PointSetBatch::from_rows(vec![
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
            Point::new(0.5, 0.5),
            Point::new(0.2, 0.7),
        ],
        vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 1.0),
            Point::new(4.0, 2.0),
            Point::new(3.0, 4.0),
            Point::new(1.0, 3.0),
            Point::new(2.0, 2.0),
        ],
        vec![Point::new(7.0, -3.0); 6],
    ])
}

fn main() -> hull_vision::Result<()> {
    env_logger::init();
    println!("Hull Vision Engine - Example Runner");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .enable_all()
        .build()?;

    let config = PipelineConfig::from_env();
    info!("running with {config:?}");
    let pipeline = HullPipeline::new(config);
    let batch = demo_batch()?;

    let report = runtime.block_on(pipeline.generate_report(&batch))?;
    for set in &report.sets {
        let area = set.rectangle.map(|r| r.area);
        println!("set {}: hull {:?}, min-area rectangle {:?}", set.set, set.hull, area);
        if let Some(corners) = set.rectangle_corners(&batch)? {
            println!("    corners {corners:?}");
        }
    }
    Ok(())
}
