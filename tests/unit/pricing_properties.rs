use impliedvol_rs::prelude::*;

const MODELS: [Model; 2] = [Model::BlackScholes, Model::Black76];

#[test]
fn test_round_trip_recovers_volatility() {
    let config = SolverConfig::default();

    for model in MODELS {
        for option_type in [OptionType::Call, OptionType::Put] {
            for strike in [90.0, 100.0, 110.0] {
                for time in [0.1, 0.5, 1.0, 2.0] {
                    for rate in [0.0, 0.05] {
                        for sigma in [0.1, 0.5, 1.0, 2.0, 3.0] {
                            let contract =
                                OptionQuote::new(100.0, strike, time, rate, 0.0, option_type);
                            let price = model.price(&contract, sigma).unwrap();
                            let quote = contract.with_market_price(price);

                            let solution = solve_iv(&model, &quote, &config).unwrap();
                            assert!(
                                (solution.implied_vol - sigma).abs() < 1e-4,
                                "{model:?} {option_type} K={strike} T={time} r={rate}: \
                                 expected {sigma}, got {solution:?}"
                            );
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_round_trip_low_volatility() {
    let contract = OptionQuote::call(100.0, 100.0, 0.5, 0.0, 0.0);
    let price = BlackScholes.price(&contract, 0.01).unwrap();

    let solution = solve_iv(
        &BlackScholes,
        &contract.with_market_price(price),
        &SolverConfig::default(),
    )
    .unwrap();
    assert!((solution.implied_vol - 0.01).abs() < 1e-4);
}

#[test]
fn test_price_strictly_increasing_in_volatility() {
    for model in MODELS {
        for option_type in [OptionType::Call, OptionType::Put] {
            for rate in [0.0, 0.05] {
                let quote = OptionQuote::new(100.0, 105.0, 0.5, rate, 0.0, option_type);
                let prices: Vec<f64> = (1..=100)
                    .map(|step| model.price(&quote, step as f64 * 0.05).unwrap())
                    .collect();

                assert!(
                    prices.windows(2).all(|pair| pair[1] > pair[0]),
                    "{model:?} {option_type} r={rate} is not increasing"
                );
            }
        }
    }
}

#[test]
fn test_put_call_delta_identity() {
    for (spot, strike, time, rate, sigma) in [
        (100.0, 100.0, 0.25, 0.05, 0.25),
        (4405.75, 4500.0, 1.0 / 365.0, 0.02388, 0.12),
        (110000.0, 90000.0, 2.0, 0.0, 0.9),
    ] {
        let call = OptionQuote::call(spot, strike, time, rate, 0.0);
        let put = OptionQuote::put(spot, strike, time, rate, 0.0);

        let diff = delta(&call, sigma).unwrap() - delta(&put, sigma).unwrap();
        assert!((diff - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_degenerate_expiry() {
    for model in MODELS {
        let itm = OptionQuote::call(4405.75, 4300.0, 0.0, 0.02388, 0.0);
        assert_eq!(model.price(&itm, 0.5).unwrap(), 4405.75 - 4300.0);

        let otm = OptionQuote::call(4405.75, 4500.0, 0.0, 0.02388, 0.0);
        assert_eq!(model.price(&otm, 0.5).unwrap(), 0.0);

        assert!(matches!(
            gamma(&itm, 0.5),
            Err(IVError::DegenerateInput { .. })
        ));
    }
}

#[test]
fn test_vega_hostile_quote_falls_back_to_bisection() {
    // Fifty percent out of the money with under nine hours left
    let quote = OptionQuote::call(100.0, 150.0, 0.001, 0.0, 0.01);

    let solution = solve_iv(&Model::BlackScholes, &quote, &SolverConfig::default()).unwrap();

    assert_eq!(solution.method, SolveMethod::Bisection);
    assert!(solution.implied_vol > 0.0);
    let repriced = BlackScholes.price(&quote, solution.implied_vol).unwrap();
    assert!((repriced - quote.market_price).abs() < 1e-6);
}

#[test]
fn test_solutions_never_below_floor() {
    // A price at the zero-volatility bound drives Newton to the floor
    let contract = OptionQuote::call(110.0, 100.0, 0.5, 0.0, 0.0);
    let bound = BlackScholes.lower_bound(&contract).unwrap();

    let solution = solve_iv(
        &BlackScholes,
        &contract.with_market_price(bound),
        &SolverConfig::default(),
    )
    .unwrap();
    assert!(solution.implied_vol >= impliedvol_rs::volatility::MIN_VOLATILITY);
}
