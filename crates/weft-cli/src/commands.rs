//! CLI command implementations.

use weft_bench::metrics::BenchmarkMetrics;
use weft_bench::runner::BenchmarkRunner;
use weft_bench::scenarios::{Scenario, ScenarioKind};
use weft_io::{load_config, validate_input, JsonFrameExporter, SimulationInput};
use weft_solver::{FrameDriver, FrameRecorder};
use weft_telemetry::{EventBus, TracingSink};

/// Run a simulation from a scene file.
pub fn simulate(scene_path: &str, output_path: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    println!("weft Simulation");
    println!("───────────────");
    println!("Scene: {scene_path}");
    println!();

    let input = SimulationInput::load(scene_path)?;
    validate_input(&input)?;

    let mut state = input.initialize()?;
    let mut source = input.collider_source();

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new()));
    let mut driver = FrameDriver::with_bus(bus);

    println!(
        "Running: {} verts, {} links, {} anchors, {} frames × {} substeps ({})",
        state.vertex_count(),
        state.link_count(),
        state.attachment_count(),
        input.frame_count,
        input.config.substeps,
        input.config.execution.name(),
    );

    let summary = match output_path {
        Some(path) => {
            let mut exporter = JsonFrameExporter::new(path, &input.mesh);
            let summary = driver.run(&mut state, &mut source, &mut exporter, input.frame_count)?;
            exporter.finalize()?;
            println!("Frames written to: {path}");
            summary
        }
        None => {
            let mut recorder = FrameRecorder::default();
            driver.run(&mut state, &mut source, &mut recorder, input.frame_count)?
        }
    };

    println!();
    println!("  Wall time:      {:.3}s", summary.total_wall_time());
    println!("  Contacts:       {}", summary.total_contacts());
    println!("  Final KE:       {:.6e}", state.kinetic_energy());
    println!("  Link deviation: {:.6e}", state.link_deviation());

    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(scenario_name: &str, output_path: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    println!("weft Benchmark Suite");
    println!("════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        match ScenarioKind::from_name(scenario_name) {
            Some(kind) => vec![kind],
            None => {
                let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
                return Err(format!(
                    "Unknown scenario: '{scenario_name}'. Available: {}, all",
                    available.join(", ")
                )
                .into());
            }
        }
    };

    let mut all_metrics = Vec::new();

    for &kind in &scenarios {
        let scenario = Scenario::from_kind(kind);

        println!(
            "Running: {} ({} verts, {} tris, {} frames)",
            kind.name(),
            scenario.mesh.vertex_count(),
            scenario.mesh.triangle_count(),
            scenario.frames,
        );

        let metrics = BenchmarkRunner::run(&scenario).map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg frame:     {:.3}ms", metrics.avg_frame_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Max displace:  {:.4}m", metrics.max_displacement);
        println!("  Contacts:      {}", metrics.total_contacts);
        println!();

        all_metrics.push(metrics);
    }

    let csv = BenchmarkMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }

    Ok(())
}

/// Validate a solver config or a scene.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("weft Validator");
    println!("──────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        let config = load_config(path)?;
        config.validate()?;
        println!("✅ Config is valid.");
    } else if path.ends_with(".json") {
        println!("Validating scene: {path}");
        let input = SimulationInput::load(path)?;
        validate_input(&input)?;
        println!(
            "✅ Scene is valid ({} verts, {} tris, {} frames).",
            input.mesh.vertex_count(),
            input.mesh.triangle_count(),
            input.frame_count,
        );
    } else {
        return Err("Unsupported file format. Use .toml (config) or .json (scene).".into());
    }

    Ok(())
}
