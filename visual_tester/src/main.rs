use hull_vision::core_modules::utils::image_helper::image_helper::{render_overlay, save};
use hull_vision::{HullPipeline, PipelineConfig, PointSetBatch};
use log::info;
use std::env;
use std::path::Path;

const CANVAS_WIDTH: u32 = 640;
const CANVAS_HEIGHT: u32 = 480;

#[tokio::main]
async fn main() -> hull_vision::Result<()> {
    env_logger::init();

    // --- 1. Argument Parsing & Setup ---
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        println!("Usage: visual_tester <input_points_path> <output_dir>");
        return Ok(());
    }
    let input_path = &args[1];
    let output_dir = Path::new(&args[2]);
    std::fs::create_dir_all(output_dir)?;

    // --- 2. Batch Loading ---
    let text = std::fs::read_to_string(input_path)?;
    let batch = PointSetBatch::parse(&text)?;
    info!(
        "loaded {} sets of {} points from {input_path}",
        batch.sets(),
        batch.capacity()
    );

    // --- 3. Pipeline Initialization ---
    let config = PipelineConfig::from_env();
    println!("Running with {:?} execution", config.execution);
    let pipeline = HullPipeline::new(config);

    // --- 4. Analysis ---
    let report = pipeline.generate_report(&batch).await?;

    // --- 5. Rendering ---
    for set in &report.sets {
        let points = batch.row(set.set)?;
        let hull = set.hull_points(&batch)?;
        let corners = set.rectangle_corners(&batch)?;

        let image = render_overlay(points, &hull, corners.as_ref(), CANVAS_WIDTH, CANVAS_HEIGHT)?;
        let path = output_dir.join(format!("set_{}.png", set.set));
        save(&path, &image)?;

        match set.rectangle {
            Some(rectangle) => println!(
                "set {:>4}: {:>3} hull vertices, rectangle area {:.6} -> {}",
                set.set,
                set.hull.len(),
                rectangle.area,
                path.display()
            ),
            None => println!(
                "set {:>4}: {:>3} hull vertices -> {}",
                set.set,
                set.hull.len(),
                path.display()
            ),
        }
    }

    println!("Processing complete. {} overlays written.", report.sets.len());
    Ok(())
}
