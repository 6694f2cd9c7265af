use clap::Parser;
use nicsim_rs::nic::{NicConfig, NicSim};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(
    name = "nic-sim",
    about = "Simulate a NIC over a textual packet trace"
)]
struct Args {
    /// NIC parameter file (MAC, address/prefix, open ports)
    #[arg(long)]
    params: PathBuf,

    /// Packet trace file, one packet per line
    #[arg(long)]
    packets: PathBuf,

    /// Also write the results as JSON to this path
    #[arg(long)]
    results_json: Option<PathBuf>,
}

fn main() -> ExitCode {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match NicConfig::load(&args.params) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    debug!(?config, "NIC 参数加载完成");

    let mut sim = NicSim::new(config);
    if let Err(err) = sim.run_file(&args.packets) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    let results = sim.results();
    print!("{}", results.render_text());

    if let Some(path) = args.results_json {
        let json = match serde_json::to_string_pretty(&results) {
            Ok(json) => json,
            Err(err) => {
                eprintln!("error: serialize results: {err}");
                return ExitCode::FAILURE;
            }
        };
        if let Err(err) = fs::write(&path, json) {
            eprintln!("error: write {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
        eprintln!("wrote results json to {}", path.display());
    }

    ExitCode::SUCCESS
}
