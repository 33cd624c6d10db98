//! Invoice total calculation
//!
//! Line items are priced in USD. The USD total is converted to THB and then to
//! MMK through two sequential exchange rates, and a flat percentage reduction
//! is applied to the converted amounts.
//!
//! Intermediate values are kept unrounded; every output is rounded to two
//! decimal places (midpoint away from zero) only at the end.

use crate::core::invoice::SubmittedTotals;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Number of decimal places kept in every total
const DECIMAL_PLACES: u32 = 2;

/// Reduction applied when nothing else is configured (8%)
pub const DEFAULT_REDUCTION_PERCENT: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Errors raised while building calculation inputs or computing totals
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TotalsError {
    #[error("reduction must be between 0 and 100 percent, got {0}")]
    ReductionOutOfRange(Decimal),

    #[error("{name} must be greater than zero, got {value}")]
    NonPositiveRate { name: &'static str, value: Decimal },

    #[error("{0} is too large to compute")]
    Overflow(&'static str),
}

/// Flat percentage reduction applied to the converted totals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reduction {
    percent: Decimal,
}

impl Reduction {
    /// Build a reduction from a percentage in `0..=100`
    pub fn from_percent(percent: Decimal) -> Result<Self, TotalsError> {
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(TotalsError::ReductionOutOfRange(percent));
        }
        Ok(Self { percent })
    }

    /// The configured percentage (e.g. `8` for 8%)
    pub fn percent(&self) -> Decimal {
        self.percent
    }

    /// Multiplier applied to a total, `1 - percent / 100`
    pub fn factor(&self) -> Decimal {
        Decimal::ONE - self.percent / Decimal::ONE_HUNDRED
    }
}

impl Default for Reduction {
    fn default() -> Self {
        Self {
            percent: DEFAULT_REDUCTION_PERCENT,
        }
    }
}

/// The two conversion rates of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeRates {
    pub usd_to_thb: Decimal,
    pub thb_to_mmk: Decimal,
}

impl ExchangeRates {
    /// Build a rate pair, rejecting zero or negative rates
    pub fn new(usd_to_thb: Decimal, thb_to_mmk: Decimal) -> Result<Self, TotalsError> {
        if usd_to_thb <= Decimal::ZERO {
            return Err(TotalsError::NonPositiveRate {
                name: "usdToThbRate",
                value: usd_to_thb,
            });
        }
        if thb_to_mmk <= Decimal::ZERO {
            return Err(TotalsError::NonPositiveRate {
                name: "thbToMmkRate",
                value: thb_to_mmk,
            });
        }
        Ok(Self {
            usd_to_thb,
            thb_to_mmk,
        })
    }
}

/// Computed totals, each rounded to two decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub usd: Decimal,
    pub thb: Decimal,
    pub mmk: Decimal,
    /// MMK total after the reduction
    pub final_mmk: Decimal,
    /// THB total after the reduction
    pub final_thb: Decimal,
}

impl Totals {
    /// Convert to the wire shape a client submits with an invoice
    pub fn to_submitted(&self) -> SubmittedTotals {
        SubmittedTotals {
            usd: with_two_places(self.usd),
            thb: with_two_places(self.thb),
            mmk: with_two_places(self.mmk),
            final_mmk: with_two_places(self.final_mmk),
            final_thb: Some(with_two_places(self.final_thb)),
        }
    }
}

/// Compute all totals for a list of USD amounts
///
/// Fails with [`TotalsError::Overflow`] when a sum or product leaves the
/// range of `Decimal`.
///
/// ```rust
/// use invoice::core::totals::{ExchangeRates, Reduction, compute_totals, format_amount};
/// use rust_decimal::Decimal;
///
/// let rates = ExchangeRates::new(Decimal::from(35), "0.09".parse().unwrap()).unwrap();
/// let totals = compute_totals([Decimal::from(100)], &rates, Reduction::default()).unwrap();
/// assert_eq!(totals.thb, Decimal::from(3500));
/// assert_eq!(format_amount(totals.final_mmk), "289.80");
/// ```
pub fn compute_totals<I>(
    amounts: I,
    rates: &ExchangeRates,
    reduction: Reduction,
) -> Result<Totals, TotalsError>
where
    I: IntoIterator<Item = Decimal>,
{
    let usd = amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |sum, amount| sum.checked_add(amount))
        .ok_or(TotalsError::Overflow("usd"))?;
    let thb = usd
        .checked_mul(rates.usd_to_thb)
        .ok_or(TotalsError::Overflow("thb"))?;
    let mmk = thb
        .checked_mul(rates.thb_to_mmk)
        .ok_or(TotalsError::Overflow("mmk"))?;
    let factor = reduction.factor();
    let final_mmk = mmk
        .checked_mul(factor)
        .ok_or(TotalsError::Overflow("final"))?;
    let final_thb = thb
        .checked_mul(factor)
        .ok_or(TotalsError::Overflow("finalThb"))?;

    Ok(Totals {
        usd: round_amount(usd),
        thb: round_amount(thb),
        mmk: round_amount(mmk),
        final_mmk: round_amount(final_mmk),
        final_thb: round_amount(final_thb),
    })
}

/// Round a monetary value to two decimal places
pub fn round_amount(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a monetary value as two-decimal text (`35` → `"35.00"`)
pub fn format_amount(value: Decimal) -> String {
    with_two_places(value).to_string()
}

fn with_two_places(value: Decimal) -> Decimal {
    let mut rounded = round_amount(value);
    rounded.rescale(DECIMAL_PLACES);
    rounded
}

/// Compare client-submitted totals against recomputed ones
///
/// Returns the wire names of the fields that differ after rounding both sides.
/// `finalThb` is only compared when the client sent it.
pub fn verify_submitted_totals(submitted: &SubmittedTotals, expected: &Totals) -> Vec<&'static str> {
    let mut mismatches = Vec::new();
    let pairs = [
        ("usd", submitted.usd, expected.usd),
        ("thb", submitted.thb, expected.thb),
        ("mmk", submitted.mmk, expected.mmk),
        ("final", submitted.final_mmk, expected.final_mmk),
    ];

    for (name, got, want) in pairs {
        if round_amount(got) != want {
            mismatches.push(name);
        }
    }

    if let Some(final_thb) = submitted.final_thb {
        if round_amount(final_thb) != expected.final_thb {
            mismatches.push("finalThb");
        }
    }

    mismatches
}
