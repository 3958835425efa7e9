//! Layout primitives
//!
//! All line-budget arithmetic lives here so the receipt renderers never
//! compute fills themselves. Widths are printed characters (see
//! [`text_width`](crate::text_width)).

use rust_decimal::{Decimal, RoundingStrategy};

use crate::encoding::text_width;

/// Currency prefix used on every printed amount
pub const CURRENCY_SYMBOL: &str = "R$";

/// Format an amount with two decimals and a comma separator
///
/// Rounds half away from zero at the second decimal; no thousands separator.
///
/// ```
/// use comanda_printer::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(105, 1)), "10,50");
/// assert_eq!(format_currency(Decimal::new(10005, 3)), "10,01");
/// ```
pub fn format_currency(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string().replace('.', ",")
}

/// Format an amount with the currency prefix (`R$ 10,50`)
pub fn money(value: Decimal) -> String {
    format!("{} {}", CURRENCY_SYMBOL, format_currency(value))
}

/// Right-justify `value` against `label` within `width` characters
///
/// At least one space always separates the two, so an overlong pair simply
/// exceeds `width` instead of overlapping.
pub fn pad_line(label: &str, value: &str, width: usize) -> String {
    let used = text_width(label) + text_width(value);
    let fill = width.saturating_sub(used).max(1);
    format!("{}{}{}", label, " ".repeat(fill), value)
}

/// Line budget for double-width text on a `width`-column printer
///
/// Double-width glyphs take two columns each.
pub fn double_columns(width: usize) -> usize {
    width / 2
}

/// `ch` repeated `width` times
pub fn divider(width: usize, ch: char) -> String {
    std::iter::repeat_n(ch, width).collect()
}
