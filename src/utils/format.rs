use rust_decimal::prelude::*;

/// Fixed point rendering with `decimals` fractional digits. Halves round away from zero,
/// judged on the exact value of the float.
pub fn to_fixed(value: f64, decimals: u32) -> String {
    let width = decimals as usize;
    // NaN, infinities and values beyond the decimal range keep the float formatting
    Decimal::from_f64_retain(value).map_or_else(
        || format!("{value:.width$}"),
        |exact| {
            let rounded = exact.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.width$}")
        },
    )
}
