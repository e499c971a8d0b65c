use battlemap_core::{GenerationRequest, Theme, generate, render_map};

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use rayon::prelude::*;
use svg::save as save_as_svg;
use tracing::{Level, event};

#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 48)]
    width: u32,

    /// Grid height in cells
    #[arg(long, default_value_t = 48)]
    height: u32,

    /// Target number of road cells (preset default when omitted)
    #[arg(short, long)]
    road_count: Option<u32>,

    /// Target number of buildings (preset default when omitted)
    #[arg(short, long)]
    building_count: Option<u32>,

    /// Generation preset
    #[clap(short, long, default_value_t, value_enum)]
    theme: Theme,

    /// RNG seed; omit for a non-reproducible map
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of maps to generate; batches run in parallel
    #[arg(short = 'n', long, default_value_t = 1)]
    count: u32,

    /// Output directory
    #[arg(short, long, default_value = "generated")]
    out_dir: PathBuf,
}

impl Args {
    fn request(&self, batch_index: u32) -> GenerationRequest {
        let defaults = self.theme.request_defaults();

        GenerationRequest {
            width: self.width,
            height: self.height,
            road_count: self.road_count.unwrap_or(defaults.road_count),
            building_count: self.building_count.unwrap_or(defaults.building_count),
            theme: self.theme,
            // Batch entries get distinct but still reproducible streams.
            seed: self.seed.map(|seed| seed + u64::from(batch_index)),
            step_budget: None,
        }
    }
}

fn output_path(out_dir: &Path, theme: Theme, batch_index: u32) -> PathBuf {
    use std::time::SystemTime;

    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();

    out_dir.join(format!(
        "{}-{}-{}-map.svg",
        now.as_secs(),
        theme.name(),
        batch_index
    ))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let args = Args::parse();

    if !args.out_dir.try_exists()? {
        std::fs::create_dir_all(&args.out_dir)
            .with_context(|| format!("failed to create {}", args.out_dir.display()))?;
    }

    // Sessions are independent, so a batch fans out across threads.
    let saved = (0..args.count)
        .into_par_iter()
        .map(|batch_index| -> anyhow::Result<PathBuf> {
            let request = args.request(batch_index);
            let result = generate(request)?;

            if !result.outcome().is_complete() {
                event!(
                    Level::WARN,
                    "Map {} is partial: placed {} building/s and {} road cell/s",
                    batch_index,
                    result.buildings_placed(),
                    result.roads_placed()
                );
            }

            let path = output_path(&args.out_dir, args.theme, batch_index);
            save_as_svg(&path, &render_map(&result))
                .with_context(|| format!("failed to save {}", path.display()))?;

            Ok(path)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    for path in saved {
        println!("{}", path.display());
    }

    Ok(())
}
