use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dungeon_core::{
    BaselinePopulation, DungeonConfig, DungeonGenerator, LevelData, PopulationPolicy,
    PopulationType, Pos, ScaledPopulation, TileType,
};
use log::info;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Ascii,
    Summary,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    Baseline,
    Scaled,
}

#[derive(Parser)]
#[command(author, version, about = "Generate a dungeon level and dump it", long_about = None)]
struct Args {
    /// TOML file overriding the default generation settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, value_enum, default_value_t = Format::Ascii)]
    format: Format,
    #[arg(short, long, value_enum, default_value_t = Policy::Baseline)]
    policy: Policy,
    /// Overrides the configured difficulty
    #[arg(short, long)]
    difficulty: Option<u32>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DungeonConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => DungeonConfig::default(),
    };
    info!("generating with seed {}", args.seed);

    let level = match args.policy {
        Policy::Baseline => generate(config, BaselinePopulation, &args)?,
        Policy::Scaled => generate(config, ScaledPopulation::default(), &args)?,
    };

    match args.format {
        Format::Json => {
            let json = serde_json::to_string_pretty(&level)
                .context("Failed to serialize level to JSON")?;
            println!("{json}");
        }
        Format::Ascii => print!("{}", render_ascii(&level)),
        Format::Summary => print_summary(&level),
    }
    Ok(())
}

fn generate<P: PopulationPolicy>(config: DungeonConfig, policy: P, args: &Args) -> Result<LevelData> {
    let generator =
        DungeonGenerator::with_policy(config, policy).context("Invalid dungeon config")?;
    let difficulty = args.difficulty.unwrap_or(generator.config().difficulty);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    Ok(generator.generate_with_difficulty(&mut rng, difficulty))
}

/// Top row is the northernmost one.
fn render_ascii(level: &LevelData) -> String {
    let mut out = String::with_capacity((level.width() + 1) * level.height());
    for y in (0..level.height() as i32).rev() {
        for x in 0..level.width() as i32 {
            let pos = Pos { y, x };
            out.push(match level.grid.population_at(pos) {
                PopulationType::Entrance => '<',
                PopulationType::Exit => '>',
                PopulationType::Enemy => 'e',
                PopulationType::Item => '$',
                PopulationType::Unpopulated => match level.tile_at(pos) {
                    TileType::Floor => '.',
                    TileType::Wall => '#',
                },
            });
        }
        out.push('\n');
    }
    out
}

fn print_summary(level: &LevelData) {
    println!("Size: {}x{}", level.width(), level.height());
    println!("Rooms: {}", level.rooms.len());
    println!("Corridors: {}", level.corridors.len());
    println!("Floor cells: {}", level.grid.floor_count());
    println!("Enemies: {}", level.enemy_spawns().len());
    println!("Items: {}", level.item_spawns().len());
    println!("Entrance: {:?}", level.entrance);
    match level.exit {
        Some(exit) => println!("Exit: {exit:?}"),
        None => println!("Exit: none"),
    }
    println!("Fingerprint: {:016x}", level.fingerprint());
}
