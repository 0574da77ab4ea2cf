//! delve: walk an observer down through generated floors while agents give
//! chase, then print the last floor.

use clap::Parser;
use delve_lib::{Floor, render_ascii};
use delve_rl::{BiomeTable, LevelConfig};
use log::info;

#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "Generate dungeon floors and run a headless chase", long_about = None)]
struct Args {
    /// RNG seed; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    /// Starting depth
    #[arg(short, long, default_value = "1")]
    depth: u32,
    /// Number of turns to simulate
    #[arg(short, long, default_value = "200")]
    turns: usize,
    /// Agents spawned on each floor
    #[arg(short, long, default_value = "3")]
    agents: usize,
    #[arg(long, default_value = "60")]
    width: i32,
    #[arg(long, default_value = "40")]
    height: i32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("seed {seed}");

    let config = LevelConfig {
        width: args.width,
        height: args.height,
        ..LevelConfig::default()
    };
    let mut floor = Floor::with_config(config, BiomeTable::default(), args.depth, seed)?;
    floor.spawn_agents(args.agents);

    for turn in 0..args.turns {
        let stairs = floor.level().stairs_down();
        if let Some(next) = floor.observer_step_toward(stairs) {
            floor.move_observer(next - floor.observer());
        }
        if floor.descend()? {
            floor.spawn_agents(args.agents);
            continue;
        }
        floor.tick();
        info!(
            "turn {turn}: depth {}, observer {}, explored rooms {}/{}",
            floor.depth(),
            floor.observer(),
            floor.level().explored_rooms(),
            floor.level().rooms().len()
        );
    }

    let agents: Vec<_> = floor.agents().iter().map(|a| a.pos).collect();
    println!("{}", render_ascii(&floor.level().grid, floor.observer(), &agents));
    println!(
        "depth {} ({}), seed {seed}",
        floor.depth(),
        floor.biome().biome
    );
    Ok(())
}
