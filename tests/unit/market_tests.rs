use chrono::{DateTime, TimeZone, Utc};
use impliedvol_rs::prelude::*;

const BTC_PUT: &str = r#"{
    "instrument_name": "BTC-26DEC25-100000-P",
    "underlying_price": 104000.0,
    "underlying_index": "BTC-26DEC25",
    "mark_price": 0.0098222963,
    "mark_iv": 45.0,
    "bid_iv": 43.0,
    "ask_iv": 47.0,
    "interest_rate": 0.0,
    "bids": [[0.0089419582, 2.5], [0.0085, 10.0]],
    "asks": [[0.0107182572, 1.0], [0.0112, 4.0]],
    "timestamp": 1766131200000
}"#;

const BTC_CALL: &str = r#"{
    "jsonrpc": "2.0",
    "id": 42,
    "result": {
        "instrument_name": "BTC-26DEC25-110000-C",
        "underlying_price": 104000.0,
        "mark_price": 0.0046335824,
        "mark_iv": 40.0,
        "bid_iv": 38.0,
        "ask_iv": 0.0,
        "bids": [[0.0039711946, 3.0]],
        "asks": []
    }
}"#;

const MALFORMED: &str = r#"{
    "instrument_name": "BTC-26DEC25-ABC-C",
    "underlying_price": 104000.0,
    "mark_price": 0.005
}"#;

fn one_week_before_expiry() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 19, 8, 0, 0).unwrap()
}

#[test]
fn test_instrument_parsing() {
    let instrument: Instrument = "BTC-26DEC25-100000-P".parse().unwrap();
    assert_eq!(instrument.currency, "BTC");
    assert_eq!(instrument.strike, 100000.0);
    assert_eq!(instrument.option_type, OptionType::Put);
    assert_eq!(
        instrument.expiry,
        Utc.with_ymd_and_hms(2025, 12, 26, 8, 0, 0).unwrap()
    );

    let expected = (7.0 * 1440.0 + 1.0) / (365.0 * 1440.0);
    assert!((instrument.time_to_expiry(one_week_before_expiry()) - expected).abs() < 1e-15);

    assert!(matches!(
        "BTC-PERPETUAL".parse::<Instrument>(),
        Err(IVError::InvalidInstrument { .. })
    ));
}

#[test]
fn test_snapshot_analysis() {
    let snapshot = OrderBookSnapshot::from_json(BTC_PUT).unwrap();
    let analysis =
        analyze_snapshot(&snapshot, one_week_before_expiry(), &AnalysisConfig::default()).unwrap();

    assert!((analysis.mark_iv() - 0.45).abs() < 1e-4);
    assert!(analysis.mark.iv_diff.unwrap().abs() < 1e-4);

    let bid = analysis.bid.as_ref().unwrap().as_ref().unwrap();
    let ask = analysis.ask.as_ref().unwrap().as_ref().unwrap();
    assert!((bid.solution.implied_vol - 0.43).abs() < 1e-4);
    assert!((ask.solution.implied_vol - 0.47).abs() < 1e-4);
    assert!(bid.solution.implied_vol < analysis.mark_iv());
    assert!(ask.solution.implied_vol > analysis.mark_iv());

    // Out-of-the-money put
    assert!(analysis.put_delta < 0.0 && analysis.put_delta > -0.5);
    assert!((analysis.call_delta - analysis.put_delta - 1.0).abs() < 1e-12);
    assert_eq!(analysis.greeks.delta, analysis.put_delta);
}

#[test]
fn test_chain_analysis_isolates_malformed_instrument() {
    let mut chain = OptionChain::new(AnalysisConfig::default());
    chain.add_json(BTC_PUT).unwrap();
    chain.add_snapshot(OrderBookSnapshot::from_response_json(BTC_CALL).unwrap());
    chain.add_json(MALFORMED).unwrap();
    assert_eq!(chain.len(), 3);

    let report = chain.analyze(one_week_before_expiry());
    assert_eq!(report.success_count(), 2);
    assert_eq!(report.failure_count(), 1);

    let call = &report.analyses["BTC-26DEC25-110000-C"];
    assert!((call.mark_iv() - 0.40).abs() < 1e-4);
    assert!(call.ask.is_none());
    let bid = call.bid.as_ref().unwrap().as_ref().unwrap();
    assert!((bid.solution.implied_vol - 0.38).abs() < 1e-4);
    assert!(call.greeks.delta > 0.0 && call.greeks.delta < 0.5);

    match &report.failures["BTC-26DEC25-ABC-C"] {
        IVError::Instrument { instrument, source } => {
            assert_eq!(instrument, "BTC-26DEC25-ABC-C");
            assert!(matches!(**source, IVError::InvalidInstrument { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_chain_after_expiry() {
    let mut chain = OptionChain::default();
    chain.add_json(BTC_PUT).unwrap();

    let after = Utc.with_ymd_and_hms(2025, 12, 26, 9, 0, 0).unwrap();
    let report = chain.analyze(after);

    assert!(report.analyses.is_empty());
    assert!(matches!(
        report.failures["BTC-26DEC25-100000-P"].root(),
        IVError::DegenerateInput { .. }
    ));
}

#[test]
fn test_black_scholes_analysis_config() {
    let snapshot = OrderBookSnapshot::from_json(BTC_PUT).unwrap();
    let config: AnalysisConfig =
        serde_json::from_str(r#"{"model": "BlackScholes", "solver": {"tolerance": 1e-8}}"#)
            .unwrap();

    let analysis = analyze_snapshot(&snapshot, one_week_before_expiry(), &config).unwrap();
    // With a zero rate both conventions coincide
    assert!((analysis.mark_iv() - 0.45).abs() < 1e-4);
}
