//! Offline scoring runner: build the grid, apply trigger updates, print the
//! hotspots. Also previews the SMS alert text.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use hazard_core::alert::{build_sms, check_alert, AlertStatus, SMS_MAX_CHARS};
use hazard_core::store::RiskSnapshot;
use hazard_core::trigger::FixedTrigger;
use hazard_core::{Hotspot, RiskLevel, ServiceConfig, TriggerProvider, TriggerSource};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hazard", about = "Landslide hazard risk scoring")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score the grid and list the highest-risk cells.
    Score(ScoreArgs),

    /// Print the SMS alert text for an area and risk score.
    Sms {
        /// Area named in the alert.
        #[arg(short, long, default_value = hazard_core::alert::DEFAULT_AREA_NAME)]
        area: String,

        /// Risk score to report.
        #[arg(short, long)]
        risk: f32,
    },
}

#[derive(clap::Args, Debug)]
struct ScoreArgs {
    /// JSON config file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of hotspots to list.
    #[arg(short, long)]
    k: Option<usize>,

    /// Trigger provider: random or noise.
    #[arg(short, long)]
    trigger: Option<TriggerSource>,

    /// Scale generated trigger fields by this factor, in [0, 1].
    #[arg(short, long)]
    intensity: Option<f32>,

    /// JSON array of trigger values (one per cell); overrides --trigger.
    #[arg(long)]
    trigger_file: Option<PathBuf>,

    /// Trigger updates to apply before reporting.
    #[arg(short, long, default_value_t = 1)]
    updates: u32,

    /// Emit JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ScoreReport<'a> {
    cells: usize,
    generation: u64,
    source: &'a str,
    alert: AlertStatus,
    hotspots: Vec<HotspotRow>,
}

#[derive(Serialize)]
struct HotspotRow {
    rank: usize,
    cell_id: usize,
    risk: f32,
    level: RiskLevel,
    lon: f64,
    lat: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Score(args) => score(args),
        Command::Sms { area, risk } => {
            let sms = build_sms(&area, risk);
            println!("{sms}");
            eprintln!("({} / {} chars)", sms.chars().count(), SMS_MAX_CHARS);
            Ok(())
        }
    }
}

fn score(args: ScoreArgs) -> Result<()> {
    let mut config = ServiceConfig::load_or_default(args.config.as_deref())
        .with_context(|| format!("loading config {:?}", args.config))?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(k) = args.k {
        config.top_k = k;
    }
    if let Some(trigger) = args.trigger {
        config.trigger = trigger;
    }
    if let Some(intensity) = args.intensity {
        config.trigger_intensity = intensity;
    }
    if args.updates == 0 {
        bail!("--updates must be at least 1");
    }

    let store = config.build_store().context("building risk grid")?;
    let mut provider: Box<dyn TriggerProvider> = match &args.trigger_file {
        Some(path) => Box::new(
            FixedTrigger::from_json_file(path)
                .with_context(|| format!("reading trigger file {}", path.display()))?,
        ),
        None => config.build_trigger_provider(),
    };

    for _ in 0..args.updates {
        store
            .update_trigger(provider.as_mut())
            .with_context(|| format!("applying {} trigger", provider.name()))?;
    }
    tracing::debug!(updates = args.updates, provider = provider.name(), "trigger updates applied");

    let snap = store.current();
    let hotspots = snap.hotspots(config.top_k);
    let alert = check_alert(snap.risk(), config.alert_threshold);

    if args.json {
        let report = ScoreReport {
            cells: snap.len(),
            generation: snap.generation(),
            source: snap.source(),
            alert,
            hotspots: hotspot_rows(&snap, &hotspots),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_table(&snap, &hotspots));
        if alert.alert {
            println!("\n{}", build_sms(&config.area_name, alert.max_risk));
        }
    }
    Ok(())
}

fn hotspot_rows(snap: &RiskSnapshot, hotspots: &[Hotspot]) -> Vec<HotspotRow> {
    hotspots
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let (lon, lat) = snap.grid().cell_centre(h.cell_id).unwrap_or((f64::NAN, f64::NAN));
            HotspotRow {
                rank: i + 1,
                cell_id: h.cell_id,
                risk: h.risk,
                level: RiskLevel::from_risk(h.risk),
                lon,
                lat,
            }
        })
        .collect()
}

fn render_table(snap: &RiskSnapshot, hotspots: &[Hotspot]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} cells, generation {}, trigger source: {}",
        snap.len(),
        snap.generation(),
        snap.source()
    );
    let _ = writeln!(
        out,
        "{:>4}  {:>8}  {:>6}  {:<8}  {:>10}  {:>9}",
        "rank", "cell", "risk", "level", "lon", "lat"
    );
    for row in hotspot_rows(snap, hotspots) {
        let _ = writeln!(
            out,
            "{:>4}  {:>8}  {:>6.4}  {:<8}  {:>10.5}  {:>9.5}",
            row.rank,
            row.cell_id,
            row.risk,
            row.level.as_str(),
            row.lon,
            row.lat
        );
    }
    out
}
