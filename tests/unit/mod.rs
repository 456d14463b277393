mod market_tests;
mod pricing_properties;
mod scenario_tests;
