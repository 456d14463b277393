use impliedvol_rs::prelude::*;

fn eth_weekly_call() -> OptionQuote {
    OptionQuote::call(4405.75, 4500.0, 1.0 / 365.0, 0.02388, 0.0035)
}

#[test]
fn test_short_dated_otm_call() {
    let quote = eth_weekly_call();
    let config = SolverConfig::default();

    let solution = solve_iv(&Model::BlackScholes, &quote, &config).unwrap();
    assert_eq!(solution.method, SolveMethod::Newton);
    assert!(solution.implied_vol > 0.1 && solution.implied_vol < 0.15);

    let repriced = BlackScholes.price(&quote, solution.implied_vol).unwrap();
    assert!((repriced - 0.0035).abs() < 1e-4);

    let greeks = greeks(&quote, solution.implied_vol).unwrap();
    assert!(greeks.delta > 0.0 && greeks.delta < 0.01);
    assert!(greeks.gamma > 0.0);
    assert!(greeks.vega > 0.0);
}

#[test]
fn test_short_dated_otm_call_brent_agrees() {
    let quote = eth_weekly_call();
    let config = SolverConfig::default();

    let newton = solve_iv(&Model::BlackScholes, &quote, &config).unwrap();
    let brent = solve_iv_brent(&Model::BlackScholes, &quote, &config).unwrap();

    assert_eq!(brent.method, SolveMethod::Brent);
    assert!((brent.implied_vol - newton.implied_vol).abs() < 1e-4);
    let repriced = BlackScholes.price(&quote, brent.implied_vol).unwrap();
    assert!((repriced - 0.0035).abs() < 1e-4);
}

#[test]
fn test_forward_scenario() {
    let strike = 4294.0 / 4450.0;
    let time = 3.0 / 365.0;

    // The call is worth at least F - K = 0.035 in any volatility
    let call = OptionQuote::call(1.0, strike, time, 0.0, 0.013);
    match solve_iv(&Black76, &call, &SolverConfig::default()) {
        Err(IVError::PriceBelowIntrinsic { price, intrinsic }) => {
            assert_eq!(price, 0.013);
            assert!((intrinsic - (1.0 - strike)).abs() < 1e-12);
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let put = OptionQuote::put(1.0, strike, time, 0.0, 0.013);
    let solution = solve_iv(&Black76, &put, &SolverConfig::default()).unwrap();
    assert_eq!(solution.method, SolveMethod::Newton);
    assert!((solution.implied_vol - 0.7596).abs() < 1e-3);

    let repriced = Black76.price(&put, solution.implied_vol).unwrap();
    assert!((repriced - 0.013).abs() < 1e-4);
}

#[test]
fn test_model_enum_matches_unit_structs() {
    let quote = eth_weekly_call();
    let config = SolverConfig::default();

    let by_enum = solve_iv(&Model::BlackScholes, &quote, &config).unwrap();
    let by_struct = solve_iv(&BlackScholes, &quote, &config).unwrap();
    assert_eq!(by_enum, by_struct);

    let dynamic: &dyn PricingModel = &Black76;
    let forward = OptionQuote::put(1.0, 4294.0 / 4450.0, 3.0 / 365.0, 0.0, 0.013);
    let solution = solve_iv(dynamic, &forward, &config).unwrap();
    assert_eq!(solution, solve_iv(&Model::Black76, &forward, &config).unwrap());
}

#[test]
fn test_explicit_methods() {
    let quote = OptionQuote::put(100.0, 100.0, 0.5, 0.03, 0.0);
    let price = BlackScholes.price(&quote, 0.35).unwrap();
    let quote = quote.with_market_price(price);
    let config = SolverConfig::default();

    let newton = solve_iv_newton(&BlackScholes, &quote, &config).unwrap();
    let bisection = solve_iv_bisection(&BlackScholes, &quote, &config).unwrap();

    assert_eq!(newton.method, SolveMethod::Newton);
    assert_eq!(bisection.method, SolveMethod::Bisection);
    assert!(bisection.is_degraded());
    assert!((newton.implied_vol - 0.35).abs() < 1e-4);
    assert!((bisection.implied_vol - 0.35).abs() < 1e-4);
}

#[test]
fn test_errors_surface_before_solving() {
    let config = SolverConfig::default();

    let negative_price = eth_weekly_call().with_market_price(-1.0);
    assert!(matches!(
        solve_iv(&BlackScholes, &negative_price, &config),
        Err(IVError::InvalidInput { .. })
    ));

    let expired = OptionQuote::call(4405.75, 4500.0, 0.0, 0.02388, 0.0035);
    assert!(matches!(
        solve_iv(&BlackScholes, &expired, &config),
        Err(IVError::DegenerateInput { .. })
    ));

    let bad_config = SolverConfig::default().with_tolerance(0.0);
    assert!(matches!(
        solve_iv(&BlackScholes, &eth_weekly_call(), &bad_config),
        Err(IVError::InvalidInput { .. })
    ));

    assert!(matches!(
        "straddle".parse::<OptionType>(),
        Err(IVError::InvalidOptionType { .. })
    ));
}
