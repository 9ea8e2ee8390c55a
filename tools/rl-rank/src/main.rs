//! RL-Rank: print the ranking for a snapshot file

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use rl_rank::{render_text, BuyOrder, Snapshot};
use rl_ranking::{RankingApi, RankingError};
use rl_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};

/// RL-Rank: rank events by votes and purchased slots
#[derive(Parser, Debug)]
#[command(name = "rl-rank")]
#[command(about = "Rank a JSON snapshot of events and purchase bids")]
struct Args {
    /// Snapshot file with `events` and `bids`
    snapshot: PathBuf,

    /// First rank to print (inclusive, 1-based)
    #[arg(long, requires = "end")]
    start: Option<u32>,

    /// Last rank to print (inclusive)
    #[arg(long, requires = "start")]
    end: Option<u32>,

    /// Submit a bid before ranking, as EVENT:RANK:AMOUNT (repeatable)
    #[arg(long = "buy", value_name = "EVENT:RANK:AMOUNT")]
    buys: Vec<BuyOrder>,

    /// Print the ranking as JSON
    #[arg(long)]
    json: bool,

    /// Print Prometheus metrics after ranking
    #[arg(long)]
    metrics: bool,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if let Some(level) = &args.log_level {
        telemetry = telemetry.with_log_level(level.clone());
    }
    let _guard = init_telemetry(telemetry).context("initializing telemetry")?;

    let snapshot = Snapshot::load(&args.snapshot)?;
    info!(
        events = snapshot.events.len(),
        bids = snapshot.bids.len(),
        "Snapshot loaded"
    );
    let service = snapshot.into_service();

    for order in &args.buys {
        match service
            .buy_rank(order.event_id, order.rank, order.amount)
            .await
        {
            Ok(bid) => info!(
                rank = bid.rank.0,
                amount = bid.amount,
                event_id = bid.event_id.0,
                "Purchase admitted"
            ),
            Err(RankingError::Admission(rejection)) => {
                warn!(%rejection, "Purchase rejected");
                eprintln!("rejected: {rejection}");
            }
            Err(e) => return Err(e).context("submitting purchase"),
        }
    }

    let (ranked, first_rank) = match (args.start, args.end) {
        (Some(start), Some(end)) => (service.ranked_range(start, end).await?, start),
        _ => (service.ranked_events().await?, 1),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        print!("{}", render_text(&ranked, first_rank));
    }

    if args.metrics {
        print!("{}", encode_metrics()?);
    }

    Ok(())
}
