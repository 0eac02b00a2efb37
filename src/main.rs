use anyhow::Result;
use cellarium_lib::model::config::AppConfig;
use cellarium_lib::model::ecosystem::Ecosystem;
use cellarium_lib::model::history::LiveEvent;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,

    /// Logical milliseconds per tick
    #[arg(long, default_value_t = 16.0)]
    dt: f64,

    /// RNG seed override
    #[arg(short, long)]
    seed: Option<u64>,
}

fn load_config(path: &str) -> Result<AppConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => AppConfig::from_toml(&content),
        Err(_) => {
            tracing::warn!(path, "config file not found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = load_config(&args.config)?;
    if args.seed.is_some() {
        config.world.seed = args.seed;
    }

    let mut eco = Ecosystem::new(config)?;
    tracing::info!(population = eco.population(), ticks = args.ticks, "starting");

    let mut births = 0u64;
    let mut flashes = 0u64;
    for _ in 0..args.ticks {
        for event in eco.update(args.dt)? {
            match event {
                LiveEvent::Birth { .. } => births += 1,
                LiveEvent::Flash { .. } => flashes += 1,
                LiveEvent::Removal { .. } => {}
            }
        }
    }

    println!(
        "{} ticks simulated: population {}, {} births, {} collision flashes",
        eco.tick,
        eco.population(),
        births,
        flashes
    );
    Ok(())
}
