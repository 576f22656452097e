//! Order arithmetic. Amounts are rounded to cents at each step so the
//! stored `total` is exactly `subtotal + tax`.

/// Sales tax applied to every order subtotal.
pub const TAX_RATE: f64 = 0.08;

/// Rounds a monetary amount to two decimal places.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// `quantity × unit_price`, rounded to cents.
pub fn line_total(quantity: i64, unit_price: f64) -> f64 {
    round_cents(quantity as f64 * unit_price)
}

/// Computed amounts for a new order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl OrderTotals {
    /// Totals for the given line totals.
    pub fn from_line_totals<I>(line_totals: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let subtotal = round_cents(line_totals.into_iter().sum());
        let tax = round_cents(subtotal * TAX_RATE);
        let total = round_cents(subtotal + tax);

        Self {
            subtotal,
            tax,
            total,
        }
    }
}
