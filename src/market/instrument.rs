//! Exchange option instrument names.
//!
//! Deribit names options `CURRENCY-DMMMYY-STRIKE-C|P`, for example
//! `ETH-28NOV25-4500-C` or `XRP_USDC-30JAN26-2d5-P` (a `d` marks the
//! decimal point). Options expire at 08:00 UTC on the expiry date.

use crate::volatility::{IVError, OptionType};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hour of the day (UTC) at which options settle.
pub const EXPIRY_HOUR_UTC: u32 = 8;

const MINUTES_PER_YEAR: f64 = 365.0 * 24.0 * 60.0;

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// A parsed option instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Full instrument name as listed by the exchange.
    pub name: String,
    /// Underlying currency (e.g. `ETH`, `BTC_USDC`).
    pub currency: String,
    /// Settlement time.
    pub expiry: DateTime<Utc>,
    /// Strike price in quote currency.
    pub strike: f64,
    /// Call or put.
    pub option_type: OptionType,
}

impl Instrument {
    /// Time to expiry in years as seen at `now`.
    ///
    /// Counts whole minutes remaining plus one, over a 365-day year.
    /// Returns 0 once the instrument has expired.
    #[must_use]
    pub fn time_to_expiry(&self, now: DateTime<Utc>) -> f64 {
        if now >= self.expiry {
            return 0.0;
        }

        let minutes = (self.expiry - now).num_minutes() + 1;
        minutes as f64 / MINUTES_PER_YEAR
    }

    /// Returns true once the settlement time has passed.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiry
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl FromStr for Instrument {
    type Err = IVError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| IVError::InvalidInstrument {
            name: s.to_string(),
            reason,
        };

        let parts: Vec<&str> = s.trim().split('-').collect();
        let [currency, expiry, strike, kind] = parts.as_slice() else {
            return Err(invalid(format!(
                "expected 4 dash-separated fields, got {}",
                parts.len()
            )));
        };

        if currency.is_empty() {
            return Err(invalid("empty currency".to_string()));
        }

        let expiry = parse_expiry(expiry).map_err(invalid)?;

        let strike: f64 = strike
            .replace('d', ".")
            .parse()
            .map_err(|_| invalid(format!("strike '{strike}' is not a number")))?;
        if !strike.is_finite() || strike <= 0.0 {
            return Err(invalid(format!("strike must be positive, got {strike}")));
        }

        let option_type = kind.parse::<OptionType>().map_err(|_| {
            invalid(format!("option type '{kind}' is neither C nor P"))
        })?;

        Ok(Self {
            name: s.trim().to_string(),
            currency: currency.to_string(),
            expiry,
            strike,
            option_type,
        })
    }
}

/// Parses `DMMMYY` (e.g. `9SEP25`, `28NOV25`) into the settlement time.
fn parse_expiry(text: &str) -> Result<DateTime<Utc>, String> {
    let digits = text.chars().take_while(char::is_ascii_digit).count();
    if !(1..=2).contains(&digits) || text.len() != digits + 5 || !text.is_ascii() {
        return Err(format!("expiry '{text}' does not match DMMMYY"));
    }

    let (day, rest) = text.split_at(digits);
    let (month, year) = rest.split_at(3);

    let day: u32 = day
        .parse()
        .map_err(|_| format!("invalid day in expiry '{text}'"))?;
    let month = MONTHS
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(month))
        .map(|index| index as u32 + 1)
        .ok_or_else(|| format!("invalid month '{month}' in expiry '{text}'"))?;
    let year: i32 = year
        .parse()
        .map_err(|_| format!("invalid year in expiry '{text}'"))?;

    let settlement = NaiveDate::from_ymd_opt(2000 + year, month, day)
        .and_then(|date| date.and_hms_opt(EXPIRY_HOUR_UTC, 0, 0))
        .ok_or_else(|| format!("expiry '{text}' is not a calendar date"))?;

    Ok(Utc.from_utc_datetime(&settlement))
}
