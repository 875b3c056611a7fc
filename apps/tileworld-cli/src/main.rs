use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tileworld_common::{Block, ChunkCoord, ItemKind};
use tileworld_input::{TickInput, parse_script};
use tileworld_kernel::{SimConfig, TickStatus, World, WorldEvent};
use tileworld_render::{DebugTextRenderer, RenderView, Renderer, block_glyph};
use tileworld_terrain::TerrainGenerator;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tileworld", about = "Headless driver for the tileworld engine")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and default tunables
    Info,
    /// Generate one chunk and print it as ASCII
    Chunk {
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        cx: i32,
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        cy: i32,
        /// World seed
        #[arg(short, long, default_value = "0")]
        seed: u64,
    },
    /// Run the simulation headless and print a summary
    Run {
        /// Ticks to simulate unless the script quits first
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// World seed, overriding the config file
        #[arg(short, long)]
        seed: Option<u64>,
        /// YAML or JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Input script, one line per tick; idle once exhausted
        #[arg(long)]
        script: Option<PathBuf>,
        /// Print an ASCII frame of the final state
        #[arg(short, long)]
        render: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => info(),
        Commands::Chunk { cx, cy, seed } => {
            print!("{}", dump_chunk(seed, ChunkCoord::new(cx, cy)));
        }
        Commands::Run {
            ticks,
            seed,
            config,
            script,
            render,
        } => run(ticks, seed, config, script, render)?,
    }

    Ok(())
}

fn info() {
    let config = SimConfig::default();
    println!("tileworld v{}", env!("CARGO_PKG_VERSION"));
    println!(
        "stream: load_radius={} unload_radius={} (at most {} chunks resident)",
        config.stream.load_radius,
        config.stream.unload_radius,
        config.stream.max_resident()
    );
    println!(
        "day: {} ticks, spawning below daylight {}",
        config.day.length_ticks, config.day.night_threshold
    );
    println!(
        "agents: health={} speed={} max={}",
        config.agents.health, config.agents.speed, config.agents.max_agents
    );
}

fn dump_chunk(seed: u64, coord: ChunkCoord) -> String {
    let chunk = TerrainGenerator::new(seed).generate_chunk(coord);
    let mut out = format!("chunk ({}, {}) seed={seed}\n", coord.x, coord.y);
    for row in chunk.rows() {
        out.extend(row.iter().map(|b| block_glyph(*b)));
        out.push('\n');
    }
    let counts: Vec<String> = Block::ALL
        .iter()
        .map(|b| format!("{b}={}", chunk.count(*b)))
        .collect();
    out.push_str(&counts.join(" "));
    out.push('\n');
    out
}

fn run(
    ticks: u64,
    seed: Option<u64>,
    config: Option<PathBuf>,
    script: Option<PathBuf>,
    render: bool,
) -> anyhow::Result<()> {
    let mut config = match config {
        Some(path) => SimConfig::load(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }

    let inputs = match script {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading script {}", path.display()))?;
            parse_script(&text).with_context(|| format!("parsing script {}", path.display()))?
        }
        None => Vec::new(),
    };

    let mut world = World::new(config);
    world.populate();
    let summary = simulate(&mut world, &inputs, ticks);

    if render {
        print!(
            "{}",
            DebugTextRenderer::new().render(&world.snapshot(), &RenderView::default())
        );
    }
    println!("{summary}");
    println!("state_hash={:#018x}", world.state_hash());
    Ok(())
}

/// Tallies of what happened during a run.
#[derive(Debug, Default, PartialEq)]
struct RunSummary {
    ticks: u64,
    quit: bool,
    kills: usize,
    shots: usize,
    blocks_placed: usize,
    blocks_broken: usize,
    pickups: usize,
    chunks_loaded: usize,
    chunks_unloaded: usize,
    agents_alive: usize,
    resident_chunks: usize,
    ammo: u32,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "ticks={} quit={}", self.ticks, self.quit)?;
        writeln!(
            f,
            "kills={} shots={} placed={} broken={} pickups={}",
            self.kills, self.shots, self.blocks_placed, self.blocks_broken, self.pickups
        )?;
        write!(
            f,
            "chunks loaded={} unloaded={} resident={} | agents alive={} | ammo={}",
            self.chunks_loaded,
            self.chunks_unloaded,
            self.resident_chunks,
            self.agents_alive,
            self.ammo
        )
    }
}

/// Step `world` up to `ticks` times, feeding `inputs` in order and idling
/// once they run out.
fn simulate(world: &mut World, inputs: &[TickInput], ticks: u64) -> RunSummary {
    let idle = TickInput::idle();
    let mut summary = RunSummary::default();
    for i in 0..ticks {
        let input = usize::try_from(i)
            .ok()
            .and_then(|i| inputs.get(i))
            .unwrap_or(&idle);
        let status = world.step(input);
        summary.ticks += 1;

        for event in world.drain_events() {
            match event {
                WorldEvent::AgentKilled { .. } => summary.kills += 1,
                WorldEvent::ProjectileFired { .. } => summary.shots += 1,
                WorldEvent::BlockPlaced { .. } => summary.blocks_placed += 1,
                WorldEvent::BlockBroken { .. } => summary.blocks_broken += 1,
                WorldEvent::PickupCollected { .. } => summary.pickups += 1,
                WorldEvent::ChunkLoaded { .. } => summary.chunks_loaded += 1,
                WorldEvent::ChunkUnloaded { .. } => summary.chunks_unloaded += 1,
                _ => {}
            }
        }
        if status == TickStatus::Quit {
            tracing::info!(tick = world.tick(), "script requested quit");
            summary.quit = true;
            break;
        }
    }
    summary.agents_alive = world.entities().agents().len();
    summary.resident_chunks = world.store().len();
    summary.ammo = world.player().inventory.count(ItemKind::Ammo);
    summary
}
