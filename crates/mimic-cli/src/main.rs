mod sim;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mimic_core::{EPHEMERAL_CAPACITY, PoolKind, Position, Roster, VoiceConfig};
use mimic_engine::{
    ClipStore, DataLayout, EngineError, FileRoster, IngestionPipeline, PlaybackDirector,
    RosterSource, Session, StaticRole, StaticRoster, WavDecoder, default_root, discover_roster,
    load_config, log_config, to_toml,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::sim::Simulation;

const CONFIG_FILE: &str = "mimic.toml";
const TICK: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(name = "mimic", about = "Ambient voice-line engine")]
struct Cli {
    /// Data directory (default: $MIMIC_DATA_DIR or ~/.mimic)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (default: <data-dir>/mimic.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List actor categories with display names and default flags
    Roster {
        /// Roster file, one type name per line (default: built-in list)
        file: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Roster file used to fill in category defaults
        #[arg(long)]
        roster: Option<PathBuf>,
    },

    /// Ingest a folder once and report what happened
    Scan {
        /// Folder to scan
        dir: PathBuf,

        /// Treat as custom sounds: keep files, accept any length
        #[arg(long)]
        durable: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a simulated session with stand-in actors around a listener
    Run {
        /// Roster file (default: built-in list)
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Join as a client instead of hosting
        #[arg(long)]
        client: bool,

        /// Number of simulated actors
        #[arg(long, default_value_t = 6)]
        actors: usize,

        /// Wall-clock duration in seconds
        #[arg(long, default_value_t = 60.0)]
        seconds: f64,

        /// Simulated seconds per wall-clock second
        #[arg(long, default_value_t = 1.0)]
        time_scale: f64,

        /// Seed for actor placement and playback timing
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl Cli {
    fn layout(&self) -> DataLayout {
        DataLayout::from_root(self.data_dir.clone().unwrap_or_else(default_root))
    }

    fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.layout().root.join(CONFIG_FILE))
    }

    fn load_config(&self) -> Result<VoiceConfig> {
        let path = self.config_path();
        load_config(Some(&path)).with_context(|| format!("failed to load {}", path.display()))
    }
}

fn load_roster(file: Option<&Path>) -> Roster {
    let source: Box<dyn RosterSource> = match file {
        Some(path) => Box::new(FileRoster::new(path)),
        None => Box::new(StaticRoster::builtin()),
    };
    discover_roster(&*source)
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Roster { file } => cmd_roster(file.as_deref()),
        Commands::Config { roster } => cmd_config(&cli, roster.as_deref()),
        Commands::Scan { dir, durable, json } => cmd_scan(dir, *durable, *json).await,
        Commands::Run {
            roster,
            client,
            actors,
            seconds,
            time_scale,
            seed,
        } => {
            let opts = RunOptions {
                roster: roster.as_deref(),
                client: *client,
                actors: *actors,
                seconds: *seconds,
                time_scale: *time_scale,
                seed: *seed,
            };
            cmd_run(&cli, opts).await
        }
    }
}

fn cmd_roster(file: Option<&Path>) -> Result<()> {
    if let Some(path) = file {
        // discover_roster tolerates a missing file; the command should not.
        FileRoster::new(path)
            .discover()
            .with_context(|| format!("failed to read roster {}", path.display()))?;
    }
    let roster = load_roster(file);

    for entry in roster.iter() {
        println!(
            "{:<24} {:<20} {}",
            entry.category,
            entry.display_name,
            if entry.default_enabled { "on" } else { "off" }
        );
    }
    println!("{} categories", roster.len());
    Ok(())
}

fn cmd_config(cli: &Cli, roster: Option<&Path>) -> Result<()> {
    let config = cli.load_config()?.with_roster_defaults(&load_roster(roster));
    let text = to_toml(&config).context("failed to render config")?;
    print!("{text}");
    Ok(())
}

async fn cmd_scan(dir: &Path, durable: bool, json: bool) -> Result<()> {
    if !dir.is_dir() {
        anyhow::bail!("{} is not a directory", dir.display());
    }
    let kind = if durable {
        PoolKind::Durable
    } else {
        PoolKind::Ephemeral
    };

    let store = ClipStore::new(EPHEMERAL_CAPACITY);
    let pipeline = IngestionPipeline::new(store.clone(), Arc::new(WavDecoder));
    let report = pipeline
        .scan_and_ingest(dir, kind, !durable)
        .await
        .with_context(|| format!("failed to scan {}", dir.display()))?;

    while store.is_evicting(kind) {
        tokio::task::yield_now().await;
    }

    if json {
        let value = serde_json::json!({
            "pool": kind,
            "report": report,
            "pool_size": store.len(kind),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("pool:      {kind}");
        println!("listed:    {}", report.listed);
        println!("accepted:  {}", report.accepted);
        println!("rejected:  {}", report.rejected);
        println!("failed:    {}", report.failed);
        println!("deleted:   {}", report.deleted);
        println!("pool size: {}", store.len(kind));
    }
    Ok(())
}

struct RunOptions<'a> {
    roster: Option<&'a Path>,
    client: bool,
    actors: usize,
    seconds: f64,
    time_scale: f64,
    seed: Option<u64>,
}

async fn cmd_run(cli: &Cli, opts: RunOptions<'_>) -> Result<()> {
    let config = cli.load_config()?;
    log_config(&config);
    let roster = load_roster(opts.roster);
    let role = StaticRole(!opts.client);

    let session = match Session::establish(
        config,
        &roster,
        cli.layout(),
        &role,
        Arc::new(WavDecoder),
    )
    .await
    {
        Ok(session) => session,
        Err(EngineError::PlaybackDisabled(freq)) => {
            println!("voice lines disabled (frequency {freq})");
            return Ok(());
        }
        Err(e) => return Err(e).context("failed to start session"),
    };

    let mut rng = match opts.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let sim = Simulation::spawn(&roster, opts.actors, &mut rng);
    let mut director = match opts.seed {
        Some(seed) => PlaybackDirector::with_seed(session.mirror(), session.selector(), seed),
        None => session.director(),
    };

    let stats = session.store().stats();
    println!(
        "session started as {}: {} actors, {} recordings, {} custom sounds",
        if opts.client { "client" } else { "host" },
        sim.actors().len(),
        stats.ephemeral,
        stats.durable
    );

    let deadline = tokio::time::sleep(Duration::from_secs_f64(opts.seconds.max(0.0)));
    tokio::pin!(deadline);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut ticker = tokio::time::interval(TICK);

    let step = TICK.as_secs_f64() * opts.time_scale.max(0.0);
    let mut now = 0.0f64;
    let mut played = 0usize;

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            _ = &mut ctrl_c => {
                eprintln!("interrupted");
                break;
            }
            _ = ticker.tick() => {
                now += step;
                for line in director.tick(now, Position::default(), sim.actors()) {
                    played += 1;
                    println!(
                        "[{now:>8.1}s] {} #{} plays {} ({:.1}s)",
                        sim.describe(line.actor),
                        line.actor.0,
                        line.clip.source(),
                        line.clip.duration_secs()
                    );
                }
            }
        }
    }

    session.teardown().await.context("failed to tear down session")?;
    println!("session ended: {played} voice lines in {now:.0} simulated seconds");
    Ok(())
}
