use clap::{Parser, Subcommand};
use othello_cluster::cluster::Scheduler;
use othello_cluster::logging;
use othello_cluster::network::{run_arbiter, ArbiterConfig, ArbiterSession, SessionEnd};
use othello_cluster::player::ai::config::DEFAULT_CONFIG_PATH;
use othello_cluster::player::ai::EngineConfig;
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Debug, Parser)]
#[command(name = "othello-cluster", about = "Distributed alpha-beta Othello engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Connect to an arbiter and play one game
    Play {
        ip: String,
        port: u16,
        /// Seconds per move (logged, not enforced)
        time_limit: u64,
        log_file: Option<PathBuf>,
        #[arg(long)]
        workers: Option<usize>,
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
    /// Referee one game between connecting engines
    Arbiter {
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: String,
        /// White is played by a built-in random player
        #[arg(long)]
        house_random: bool,
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Play {
            ip,
            port,
            time_limit,
            log_file,
            workers,
            config,
        } => {
            logging::init(log_file.as_deref())?;
            let mut engine_config = EngineConfig::load_or_default(&config);
            if workers.is_some() {
                engine_config.cluster.workers = workers;
            }

            let scheduler = Scheduler::new(
                engine_config.cluster.worker_count(),
                engine_config.search.clone(),
            );
            let addr = format!("{}:{}", ip, port);
            let session =
                ArbiterSession::connect(&addr, scheduler, Duration::from_secs(time_limit)).await?;
            let report = session.run().await;
            if let SessionEnd::Aborted(reason) = report.end {
                anyhow::bail!("game aborted after {} move(s): {}", report.moves_sent, reason);
            }
        }
        Command::Arbiter {
            bind,
            house_random,
            seed,
        } => {
            logging::init(None)?;
            let listener = TcpListener::bind(&bind).await?;
            let summary = run_arbiter(listener, ArbiterConfig { house_random, seed }).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
