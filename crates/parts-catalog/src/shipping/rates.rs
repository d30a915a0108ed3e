//! Weight-band rate tables.

use crate::money::Money;

/// One weight band. Matches weights `w` with `from < w <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateBand {
    /// Exclusive lower bound in grams.
    pub from_grams: u32,
    /// Inclusive upper bound in grams.
    pub to_grams: u32,
    pub price: Money,
}

impl RateBand {
    const fn new(from_grams: u32, to_grams: u32, price_cents: i64) -> Self {
        Self {
            from_grams,
            to_grams,
            price: Money::usd(price_cents),
        }
    }

    /// Whether a weight in kilograms falls in this band.
    pub fn contains(&self, weight_kg: f64) -> bool {
        let grams = weight_kg * 1000.0;
        grams > f64::from(self.from_grams) && grams <= f64::from(self.to_grams)
    }
}

/// DHL air rates to the USA.
///
/// There is a gap between 69.99 kg and 70 kg; weights there match no band.
pub const USA_RATES: [RateBand; 23] = [
    RateBand::new(0, 500, 3356),
    RateBand::new(500, 1_000, 3700),
    RateBand::new(1_000, 2_000, 4215),
    RateBand::new(2_000, 3_000, 4713),
    RateBand::new(3_000, 4_000, 5195),
    RateBand::new(4_000, 5_000, 5677),
    RateBand::new(5_000, 6_000, 6137),
    RateBand::new(6_000, 7_000, 6597),
    RateBand::new(7_000, 8_000, 7057),
    RateBand::new(8_000, 9_000, 7518),
    RateBand::new(9_000, 10_000, 7978),
    RateBand::new(10_000, 12_500, 8725),
    RateBand::new(12_500, 15_000, 9607),
    RateBand::new(15_000, 20_000, 11371),
    RateBand::new(20_000, 25_000, 13151),
    RateBand::new(25_000, 30_000, 14930),
    RateBand::new(30_000, 40_000, 19361),
    RateBand::new(40_000, 50_000, 23921),
    RateBand::new(50_000, 60_000, 28233),
    RateBand::new(60_000, 69_990, 32753),
    RateBand::new(70_000, 80_000, 40104),
    RateBand::new(80_000, 90_000, 45232),
    RateBand::new(90_000, 100_000, 50359),
];

/// Find the band for a weight.
pub fn find_band(rates: &[RateBand], weight_kg: f64) -> Option<&RateBand> {
    rates.iter().find(|band| band.contains(weight_kg))
}
