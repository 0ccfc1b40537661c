use bladestress::{
    default_schedule, deviatoric_norm_field, render_summary, save_stress_map, BeamSection,
    BladeConfig, FieldSummary, Grid, Material, RenderSettings, RunSummary,
};
use std::error::Error;
use tracing::{debug, info, Level};

fn main() -> Result<(), Box<dyn Error>> {
    // Diagnostics go to stderr so stdout only carries the completion line.
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    // Every parameter is fixed; the configuration is validated once and only
    // read from here on.
    let section = BeamSection::new(0.3, 0.1, 0.025, 1.0, 1.3)?;
    let material = Material::new((4500.0, 0.7), (8908.0, 0.3))?;
    let config = BladeConfig::new(
        section,
        material,
        (60, 200),
        default_schedule(),
        RenderSettings::default(),
    )?;
    info!(
        points = config.schedule.len(),
        nx = config.nx,
        ny = config.ny,
        density = config.material.density(),
        "evaluating blade stress maps"
    );

    // The grid does not depend on the operating point, so it is shared by
    // every map in the schedule.
    let grid = Grid::from_config(&config);

    // Evaluate, draw and save each point in order. The first failure aborts
    // the remaining batch.
    let mut fields = Vec::with_capacity(config.schedule.len());
    for (offset, point) in config.schedule.iter().enumerate() {
        let index = offset + 1;
        let field = deviatoric_norm_field(&config, &grid, point);
        let path = save_stress_map(index, &grid, &field, point, &config.render)?;
        let summary = FieldSummary::new(&config, &grid, index, point, &field);
        info!(
            path = %path.display(),
            peak = summary.peak.map_or(0.0, |peak| peak.sdev),
            "saved stress map"
        );
        fields.push(summary);
    }

    let count = fields.len();
    let summary = RunSummary {
        config: config.clone(),
        fields,
    };
    let json = summary.to_json()?;
    info!("\n{}", render_summary(&summary));
    debug!(summary = %json, "run summary");

    println!(
        "Done. Saved {count} plots to ./{}/",
        config.render.output_dir.display()
    );

    Ok(())
}
