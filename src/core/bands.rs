use thiserror::Error;

// Cumulative bases are published rounded to the dollar.
const BASE_CHAIN_TOLERANCE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("{table}: table is empty")]
    Empty { table: &'static str },
    #[error("{table}: first band starts at {start}, expected 0")]
    NonZeroStart { table: &'static str, start: f64 },
    #[error("{table}: band {index} ends at {end} but band {next} starts at {start}")]
    Discontiguous {
        table: &'static str,
        index: usize,
        next: usize,
        end: f64,
        start: f64,
    },
    #[error("{table}: band {index} has max {max} not above min {min}")]
    EmptyBand {
        table: &'static str,
        index: usize,
        min: f64,
        max: f64,
    },
    #[error("{table}: last band must be unbounded, found max {max}")]
    BoundedTail { table: &'static str, max: f64 },
    #[error("{table}: band {index} base {found} does not chain from previous bands (expected {expected})")]
    BrokenChain {
        table: &'static str,
        index: usize,
        expected: f64,
        found: f64,
    },
    #[error("{table}: band {index} has invalid rate {rate}")]
    InvalidRate {
        table: &'static str,
        index: usize,
        rate: f64,
    },
    #[error("{table}: ceilings are not strictly ascending at entry {index}")]
    Unordered { table: &'static str, index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampDutyBand {
    pub min: f64,
    pub max: f64,
    pub rate: f64,
    pub base: f64,
}

impl StampDutyBand {
    pub const fn new(min: f64, max: f64, rate: f64, base: f64) -> Self {
        Self {
            min,
            max,
            rate,
            base,
        }
    }

    fn duty_at(&self, price: f64) -> f64 {
        self.base + (price - self.min) * self.rate
    }
}

// Bases chain, so a price sitting on a band boundary prices the same from either side.
pub fn banded_duty(bands: &[StampDutyBand], price: f64) -> f64 {
    if price <= 0.0 {
        return 0.0;
    }
    let band = bands
        .iter()
        .find(|band| price <= band.max)
        .or_else(|| bands.last());
    match band {
        Some(band) => band.duty_at(price).max(0.0),
        None => 0.0,
    }
}

pub fn validate_duty_bands(table: &'static str, bands: &[StampDutyBand]) -> Result<(), TableError> {
    let Some(first) = bands.first() else {
        return Err(TableError::Empty { table });
    };
    if first.min != 0.0 {
        return Err(TableError::NonZeroStart {
            table,
            start: first.min,
        });
    }

    for (index, band) in bands.iter().enumerate() {
        if !band.rate.is_finite() || band.rate < 0.0 {
            return Err(TableError::InvalidRate {
                table,
                index,
                rate: band.rate,
            });
        }
        if band.max <= band.min {
            return Err(TableError::EmptyBand {
                table,
                index,
                min: band.min,
                max: band.max,
            });
        }
    }

    for (index, pair) in bands.windows(2).enumerate() {
        let (current, next) = (&pair[0], &pair[1]);
        if current.max != next.min {
            return Err(TableError::Discontiguous {
                table,
                index,
                next: index + 1,
                end: current.max,
                start: next.min,
            });
        }
        let expected = current.duty_at(current.max);
        if (expected - next.base).abs() > BASE_CHAIN_TOLERANCE {
            return Err(TableError::BrokenChain {
                table,
                index: index + 1,
                expected,
                found: next.base,
            });
        }
    }

    check_unbounded_tail(table, bands.last().map(|band| band.max))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemBracket {
    pub max_income: f64,
    pub single: f64,
    pub couple: f64,
}

impl HemBracket {
    pub const fn new(max_income: f64, single: f64, couple: f64) -> Self {
        Self {
            max_income,
            single,
            couple,
        }
    }
}

pub fn validate_hem_brackets(table: &'static str, brackets: &[HemBracket]) -> Result<(), TableError> {
    if brackets.is_empty() {
        return Err(TableError::Empty { table });
    }
    for (index, pair) in brackets.windows(2).enumerate() {
        if pair[1].max_income <= pair[0].max_income {
            return Err(TableError::Unordered {
                table,
                index: index + 1,
            });
        }
    }
    check_unbounded_tail(table, brackets.last().map(|bracket| bracket.max_income))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HecsThreshold {
    pub min: f64,
    pub max: f64,
    pub rate: f64,
}

impl HecsThreshold {
    pub const fn new(min: f64, max: f64, rate: f64) -> Self {
        Self { min, max, rate }
    }
}

pub fn validate_hecs_thresholds(
    table: &'static str,
    thresholds: &[HecsThreshold],
) -> Result<(), TableError> {
    let Some(first) = thresholds.first() else {
        return Err(TableError::Empty { table });
    };
    if first.min != 0.0 {
        return Err(TableError::NonZeroStart {
            table,
            start: first.min,
        });
    }
    for (index, threshold) in thresholds.iter().enumerate() {
        if !(0.0..=1.0).contains(&threshold.rate) {
            return Err(TableError::InvalidRate {
                table,
                index,
                rate: threshold.rate,
            });
        }
    }
    for (index, pair) in thresholds.windows(2).enumerate() {
        if pair[0].max != pair[1].min {
            return Err(TableError::Discontiguous {
                table,
                index,
                next: index + 1,
                end: pair[0].max,
                start: pair[1].min,
            });
        }
        if pair[1].rate < pair[0].rate {
            return Err(TableError::Unordered {
                table,
                index: index + 1,
            });
        }
    }
    check_unbounded_tail(table, thresholds.last().map(|threshold| threshold.max))
}

fn check_unbounded_tail(table: &'static str, last_max: Option<f64>) -> Result<(), TableError> {
    match last_max {
        Some(max) if max == f64::INFINITY => Ok(()),
        Some(max) => Err(TableError::BoundedTail { table, max }),
        None => Err(TableError::Empty { table }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [StampDutyBand; 3] = [
        StampDutyBand::new(0.0, 10_000.0, 0.01, 0.0),
        StampDutyBand::new(10_000.0, 50_000.0, 0.02, 100.0),
        StampDutyBand::new(50_000.0, f64::INFINITY, 0.05, 900.0),
    ];

    #[test]
    fn banded_duty_uses_matching_band() {
        assert_eq!(banded_duty(&SAMPLE, 5_000.0), 50.0);
        assert_eq!(banded_duty(&SAMPLE, 20_000.0), 300.0);
        assert_eq!(banded_duty(&SAMPLE, 60_000.0), 1_400.0);
    }

    #[test]
    fn banded_duty_is_zero_for_non_positive_price() {
        assert_eq!(banded_duty(&SAMPLE, 0.0), 0.0);
        assert_eq!(banded_duty(&SAMPLE, -10.0), 0.0);
    }

    #[test]
    fn boundary_price_agrees_from_both_sides() {
        let below = SAMPLE[0].duty_at(10_000.0);
        let above = SAMPLE[1].duty_at(10_000.0);
        assert_eq!(below, above);
        assert_eq!(banded_duty(&SAMPLE, 10_000.0), below);
    }

    #[test]
    fn valid_table_passes() {
        assert_eq!(validate_duty_bands("sample", &SAMPLE), Ok(()));
    }

    #[test]
    fn gap_between_bands_is_rejected() {
        let mut bands = SAMPLE;
        bands[1].min = 11_000.0;
        let err = validate_duty_bands("sample", &bands).expect_err("gap must fail");
        assert!(matches!(err, TableError::Discontiguous { index: 0, .. }));
    }

    #[test]
    fn bounded_last_band_is_rejected() {
        let mut bands = SAMPLE;
        bands[2].max = 1_000_000.0;
        let err = validate_duty_bands("sample", &bands).expect_err("bounded tail must fail");
        assert!(matches!(err, TableError::BoundedTail { .. }));
    }

    #[test]
    fn broken_base_chain_is_rejected() {
        let mut bands = SAMPLE;
        bands[2].base = 1_200.0;
        let err = validate_duty_bands("sample", &bands).expect_err("chain must fail");
        assert!(err.to_string().contains("does not chain"));
    }

    #[test]
    fn hem_brackets_must_ascend() {
        let brackets = [
            HemBracket::new(50_000.0, 1.0, 2.0),
            HemBracket::new(40_000.0, 1.0, 2.0),
            HemBracket::new(f64::INFINITY, 1.0, 2.0),
        ];
        let err = validate_hem_brackets("hem", &brackets).expect_err("must fail");
        assert_eq!(err, TableError::Unordered { table: "hem", index: 1 });
    }

    #[test]
    fn hecs_thresholds_reject_falling_rates() {
        let thresholds = [
            HecsThreshold::new(0.0, 100.0, 0.02),
            HecsThreshold::new(100.0, f64::INFINITY, 0.01),
        ];
        assert!(validate_hecs_thresholds("hecs", &thresholds).is_err());
    }
}
