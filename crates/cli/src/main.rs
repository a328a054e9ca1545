//! turnstep CLI - replay turn-by-turn navigation over stored routes.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use turnstep_core::{DistanceUnit, LocationTrace, Lookahead, NavigationConfig, Route};
use turnstep_progress::{ProgressTracker, StepTracker};
use turnstep_session::{
    spawn_replay, CircularRegionMonitor, LocationEvent, NavigationSession, RoutingProvider,
    SessionConfig, SessionSummary, Speaker, StoredRouteProvider, TracingSpeaker,
    TranscriptSpeaker,
};
use turnstep_storage::{JsonRouteStore, RouteStore};

#[derive(Parser)]
#[command(name = "turnstep")]
#[command(about = "Turn-by-turn navigation progress over geofenced route steps", long_about = None)]
struct Cli {
    /// Store directory for routes and traces
    #[arg(long, global = true, default_value = ".turnstep")]
    store: PathBuf,

    /// Navigation config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Announce distances in this unit (meters, miles)
    #[arg(long, global = true)]
    unit: Option<DistanceUnit>,

    /// Opening announcement lookahead (single, double)
    #[arg(long, global = true)]
    lookahead: Option<Lookahead>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a route JSON file into the store
    Import {
        /// Route file
        file: PathBuf,
        /// Name to store it under
        #[arg(long)]
        name: String,
    },
    /// Import a location trace JSON file into the store
    ImportTrace {
        /// Trace file
        file: PathBuf,
        /// Name to store it under
        #[arg(long)]
        name: String,
    },
    /// List stored routes
    List,
    /// Show a route's steps, geofences and prompts
    Show {
        /// Route name
        name: String,
    },
    /// Replay a stored trace against a stored route
    Simulate {
        /// Route name
        route: String,
        /// Trace name
        #[arg(long)]
        trace: String,
        /// Delay between fixes in milliseconds
        #[arg(long, default_value = "0")]
        interval_ms: u64,
        /// Log prompts as they are spoken instead of printing a transcript
        #[arg(long)]
        live: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = load_config(cli.config.as_deref(), cli.unit, cli.lookahead).await?;
    debug!("Navigation config: {:?}", config);

    let mut store = JsonRouteStore::new(&cli.store)
        .await
        .with_context(|| format!("opening store at {}", cli.store.display()))?;
    debug!("Route store at {}", store.root().display());

    match cli.command {
        Commands::Import { file, name } => {
            let route: Route = read_json(&file).await?;
            anyhow::ensure!(!route.is_empty(), "route {} has no steps", file.display());
            store.save_route(&name, &route).await?;
            println!("Imported route {} ({} steps)", name, route.steps.len());
        }
        Commands::ImportTrace { file, name } => {
            let trace: LocationTrace = read_json(&file).await?;
            store.save_trace(&name, &trace).await?;
            println!("Imported trace {} ({} fixes)", name, trace.len());
        }
        Commands::List => {
            let names = store.list_routes().await?;
            println!("Routes ({})", names.len());
            for name in names {
                println!("  {}", name);
            }
        }
        Commands::Show { name } => {
            let Some(route) = store.load_route(&name).await? else {
                println!("Route not found");
                return Ok(());
            };
            show_route(&name, &route, &config)?;
        }
        Commands::Simulate {
            route,
            trace,
            interval_ms,
            live,
        } => {
            let Some(trace) = store.load_trace(&trace).await? else {
                println!("Trace not found");
                return Ok(());
            };

            let provider = StoredRouteProvider::new(store);
            let route = provider.route(&route).await?;

            let (events, replay) = spawn_replay(trace, Duration::from_millis(interval_ms), 32);
            if live {
                let summary = simulate(TracingSpeaker, &route, &config, events).await?;
                print_summary(&summary, &[]);
            } else {
                let speaker = TranscriptSpeaker::new();
                let summary = simulate(speaker.clone(), &route, &config, events).await?;
                print_summary(&summary, &speaker.transcript());
            }
            replay.abort();
        }
    }

    Ok(())
}

async fn load_config(
    path: Option<&Path>,
    unit: Option<DistanceUnit>,
    lookahead: Option<Lookahead>,
) -> Result<NavigationConfig> {
    let mut config: NavigationConfig = match path {
        Some(path) => read_json(path).await?,
        None => NavigationConfig::default(),
    };
    if let Some(unit) = unit {
        config = config.with_unit(unit);
    }
    if let Some(lookahead) = lookahead {
        config = config.with_lookahead(lookahead);
    }
    Ok(config)
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

async fn simulate<S: Speaker>(
    speaker: S,
    route: &Route,
    config: &NavigationConfig,
    events: mpsc::Receiver<LocationEvent>,
) -> Result<SessionSummary> {
    let mut session = NavigationSession::new(CircularRegionMonitor::new(), speaker)
        .with_navigation(config)
        .with_config(SessionConfig::default());
    session.start(route)?;
    Ok(session.run(events).await)
}

fn print_summary(summary: &SessionSummary, transcript: &[String]) {
    println!("Session {}", summary.session_id);
    for line in transcript {
        println!("  > {}", line);
    }
    println!(
        "  {} events, {} prompts spoken, {}",
        summary.events_handled,
        summary.prompts_spoken,
        if summary.arrived { "arrived" } else { "not arrived" }
    );
    if !summary.arrived {
        let progress = summary.final_progress;
        println!(
            "  At step {} of {} ({:.0}%), {} remaining",
            progress.current_step_index + 1,
            progress.total_steps,
            progress.percentage(),
            progress.remaining_steps()
        );
    }
    info!("Final state: {}", summary.final_state.as_str());
}

fn show_route(name: &str, route: &Route, config: &NavigationConfig) -> Result<()> {
    let mut tracker = StepTracker::with_config(config);
    let load = tracker.load_route(&route.steps)?;

    println!("Route: {}", route.name.as_deref().unwrap_or(name));
    println!("  Steps: {}", route.steps.len());
    println!("  Total: {}", config.unit.format(route.total_distance_meters()));
    if let Some(destination) = route.destination() {
        println!("  Destination: {}", destination);
    }
    println!("  Announced in: {}", config.unit.as_str());
    println!("  Opening: {}", load.announcement);

    for (geofence, prompt) in load.geofences.iter().zip(tracker.prompts()) {
        println!(
            "  [{}] ({}) r={}m | {}",
            geofence.id, geofence.center, geofence.radius_meters, prompt
        );
    }
    Ok(())
}
