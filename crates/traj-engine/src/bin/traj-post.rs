use std::io;
use std::path::PathBuf;

use clap::Parser;

use traj_core::error::TrajResult;
use traj_engine::config::{AnalysisConfig, AnalysisKind};
use traj_engine::executor::Executor;

#[derive(Parser)]
#[command(
    name = "traj-post",
    version,
    about = "Fsk, g(r), MSD and Cvv from recorded MD trajectories"
)]
struct Cli {
    /// JSON or YAML analysis parameters; reference defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    input_dir: Option<PathBuf>,
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Run only these analyses, in the given order.
    #[arg(long, value_enum, num_args = 1..)]
    only: Vec<AnalysisKind>,
    /// Keep running the remaining analyses after one fails.
    #[arg(long)]
    keep_going: bool,
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(err) = run_cli() {
        return Err(err.to_string());
    }
    Ok(())
}

fn run_cli() -> TrajResult<()> {
    let cli = Cli::parse();
    let mut cfg = match &cli.config {
        Some(path) => AnalysisConfig::from_path(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(dir) = cli.input_dir {
        cfg.input_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        cfg.output_dir = dir;
    }
    if !cli.only.is_empty() {
        cfg.analyses = cli.only;
    }
    if cli.keep_going {
        cfg.isolate_failures = true;
    }
    let cfg = cfg.validated()?;
    log::info!("running {:?}", cfg.analyses);
    Executor::new(cfg).run_all(io::stdout().lock())?;
    Ok(())
}
