use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "reelsmith", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a playlist and print the schedule as JSON.
    Plan(PlanArgs),
    /// Compile a playlist and print the layer requests sent to the compositor.
    Layers(LayersArgs),
    /// Compile a playlist and write a JSON Lines export manifest.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input playlist JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct LayersArgs {
    /// Input playlist JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input playlist JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output manifest path.
    #[arg(long)]
    out: PathBuf,

    /// Replace an existing output file.
    #[arg(long)]
    overwrite: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Layers(args) => cmd_layers(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn compose(in_path: &Path) -> anyhow::Result<reelsmith::Composed> {
    tracing::debug!(ffprobe = reelsmith::is_ffprobe_on_path(), "media probing");

    let root = in_path.parent().unwrap_or_else(|| Path::new("."));
    let loader = reelsmith::FsSourceLoader::new(root);
    let mut compositor = reelsmith::RecordingCompositor::new();
    let composed = reelsmith::compose_from_path(in_path, &loader, &mut compositor, &mut |status| {
        if let reelsmith::BuildStatus::Loading(stage) = status {
            tracing::info!("{stage}");
        }
    })
    .with_context(|| format!("compose playlist '{}'", in_path.display()))?;
    Ok(composed)
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let composed = compose(&args.in_path)?;
    let json =
        serde_json::to_string_pretty(&composed.schedule).with_context(|| "serialize schedule")?;

    match args.out {
        Some(out) => {
            reelsmith::ensure_parent_dir(&out)?;
            std::fs::write(&out, json)
                .with_context(|| format!("write schedule '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_layers(args: LayersArgs) -> anyhow::Result<()> {
    let composed = compose(&args.in_path)?;
    let json =
        serde_json::to_string_pretty(&composed.plan).with_context(|| "serialize layer plan")?;
    println!("{json}");
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let composed = compose(&args.in_path)?;
    let mut exporter = reelsmith::ManifestExporter::new(&args.out, args.overwrite);

    let mut last_percent = None;
    reelsmith::run_export(&mut exporter, &composed.schedule, &mut |p| {
        let percent = p.percent();
        if last_percent != Some(percent) {
            eprintln!("export {percent}%");
            last_percent = Some(percent);
        }
    })?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
