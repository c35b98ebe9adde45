use crate::form::amount_or_zero;
use rust_decimal::Decimal;

/// Shown in place of the total, and as the amount error, when the sum overflows
pub const TOO_LARGE: &str = "Amount too large";

/// Aggregate amount of the record: the primary amount plus, when
/// `include_splits` is set, every split amount. Unparseable input counts as zero.
///
/// `None` when the sum leaves the range `Decimal` can represent.
pub fn recompute(primary: &str, split_amounts: &[&str], include_splits: bool) -> Option<Decimal> {
    let primary = amount_or_zero(primary);
    if !include_splits {
        return Some(primary);
    }
    split_amounts
        .iter()
        .try_fold(primary, |total, amount| total.checked_add(amount_or_zero(amount)))
}

/// Format an amount with two decimal places
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}

/// Text of the total line; `None` while there are no splits
pub fn label(total: Option<Decimal>, split_count: usize) -> Option<String> {
    (split_count > 0).then(|| match total {
        Some(total) => format!("Total amount: {}", format_amount(total)),
        None => format!("Total amount: {}", TOO_LARGE),
    })
}
