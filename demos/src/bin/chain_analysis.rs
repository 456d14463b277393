//! Analyses a small option chain decoded from exchange order book payloads
//!
//! This demo shows how to:
//! 1. Decode `get_order_book` results and JSON-RPC responses
//! 2. Collect snapshots in an `OptionChain`
//! 3. Analyse the chain while a malformed instrument fails in isolation

use chrono::{TimeZone, Utc};
use impliedvol_rs::prelude::*;
use tracing::{info, warn};

const PAYLOADS: [&str; 3] = [
    r#"{
        "instrument_name": "BTC-26DEC25-100000-P",
        "underlying_price": 104000.0,
        "mark_price": 0.0098222963,
        "mark_iv": 45.0,
        "bid_iv": 43.0,
        "ask_iv": 47.0,
        "bids": [[0.0089419582, 2.5]],
        "asks": [[0.0107182572, 1.0]]
    }"#,
    r#"{
        "jsonrpc": "2.0",
        "id": 1,
        "result": {
            "instrument_name": "BTC-26DEC25-110000-C",
            "underlying_price": 104000.0,
            "mark_price": 0.0046335824,
            "mark_iv": 40.0,
            "bids": [[0.0039711946, 3.0]],
            "asks": []
        }
    }"#,
    r#"{
        "instrument_name": "BTC-26DEC25-ABC-C",
        "underlying_price": 104000.0,
        "mark_price": 0.005
    }"#,
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Starting chain analysis example");

    let mut chain = OptionChain::new(AnalysisConfig::default());
    for payload in PAYLOADS {
        let snapshot = OrderBookSnapshot::from_json(payload)
            .or_else(|_| OrderBookSnapshot::from_response_json(payload))?;
        info!(
            "{}: mid {:?}, spread {:?}",
            snapshot.instrument_name,
            snapshot.mid_price(),
            snapshot.spread()
        );
        chain.add_snapshot(snapshot);
    }

    let now = Utc
        .with_ymd_and_hms(2025, 12, 19, 8, 0, 0)
        .single()
        .ok_or("invalid analysis time")?;
    let report = chain.analyze(now);

    for (name, analysis) in &report.analyses {
        let side = |quote: &Option<Result<QuoteAnalysis, IVError>>| match quote {
            Some(Ok(q)) => format!("{:.2}%", q.solution.iv_percent()),
            Some(Err(_)) => "unsolved".to_string(),
            None => "-".to_string(),
        };
        info!(
            "{}: bid {} mark {:.2}% ask {} | call delta {:.4} put delta {:.4} gamma {:.3e}",
            name,
            side(&analysis.bid),
            analysis.mark.solution.iv_percent(),
            side(&analysis.ask),
            analysis.call_delta,
            analysis.put_delta,
            analysis.greeks.gamma
        );
    }
    for (name, error) in &report.failures {
        warn!("{}: {}", name, error.root());
    }

    let summary = serde_json::json!({
        "analysed": report.success_count(),
        "failed": report.failure_count(),
        "model": chain.config().model,
    });
    info!("Summary: {}", summary);

    Ok(())
}
