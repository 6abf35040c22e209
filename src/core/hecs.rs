// 2024-25 income year.

use super::bands::{HecsThreshold, TableError, validate_hecs_thresholds};
use super::loan::round_cents;

pub(crate) const HECS_THRESHOLDS: [HecsThreshold; 19] = [
    HecsThreshold::new(0.0, 54_436.0, 0.0),
    HecsThreshold::new(54_436.0, 62_851.0, 0.01),
    HecsThreshold::new(62_851.0, 66_621.0, 0.02),
    HecsThreshold::new(66_621.0, 70_619.0, 0.025),
    HecsThreshold::new(70_619.0, 74_856.0, 0.03),
    HecsThreshold::new(74_856.0, 79_347.0, 0.035),
    HecsThreshold::new(79_347.0, 84_108.0, 0.04),
    HecsThreshold::new(84_108.0, 89_155.0, 0.045),
    HecsThreshold::new(89_155.0, 94_504.0, 0.05),
    HecsThreshold::new(94_504.0, 100_175.0, 0.055),
    HecsThreshold::new(100_175.0, 106_186.0, 0.06),
    HecsThreshold::new(106_186.0, 112_558.0, 0.065),
    HecsThreshold::new(112_558.0, 119_310.0, 0.07),
    HecsThreshold::new(119_310.0, 126_468.0, 0.075),
    HecsThreshold::new(126_468.0, 134_057.0, 0.08),
    HecsThreshold::new(134_057.0, 142_106.0, 0.085),
    HecsThreshold::new(142_106.0, 150_643.0, 0.09),
    HecsThreshold::new(150_643.0, 159_696.0, 0.095),
    HecsThreshold::new(159_696.0, f64::INFINITY, 0.10),
];

fn repayment_rate(annual_income: f64) -> f64 {
    HECS_THRESHOLDS
        .iter()
        .find(|threshold| annual_income >= threshold.min && annual_income < threshold.max)
        .unwrap_or(&HECS_THRESHOLDS[HECS_THRESHOLDS.len() - 1])
        .rate
}

pub fn yearly_repayment(annual_income: f64, debt: f64) -> f64 {
    if debt <= 0.0 || annual_income <= 0.0 {
        return 0.0;
    }
    let rate = repayment_rate(annual_income);
    if rate <= 0.0 {
        return 0.0;
    }
    (annual_income * rate).min(debt)
}

pub fn monthly_repayment(annual_income: f64, debt: f64) -> f64 {
    round_cents(yearly_repayment(annual_income, debt) / 12.0)
}

pub(crate) fn validate() -> Result<(), TableError> {
    validate_hecs_thresholds("hecs", &HECS_THRESHOLDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn reference_table_is_valid() {
        assert_eq!(validate(), Ok(()));
    }

    #[test]
    fn no_debt_or_no_income_repays_nothing() {
        assert_eq!(yearly_repayment(85_000.0, 0.0), 0.0);
        assert_eq!(yearly_repayment(0.0, 30_000.0), 0.0);
        assert_eq!(yearly_repayment(-5.0, 30_000.0), 0.0);
    }

    #[test]
    fn income_below_threshold_repays_nothing() {
        assert_eq!(yearly_repayment(50_000.0, 30_000.0), 0.0);
        assert_eq!(yearly_repayment(54_435.0, 30_000.0), 0.0);
    }

    #[test]
    fn first_repayment_band_starts_just_above_threshold() {
        assert_approx(yearly_repayment(54_436.0, 30_000.0), 544.36);
        assert_approx(yearly_repayment(60_000.0, 30_000.0), 600.0);
    }

    #[test]
    fn band_rates_match_published_schedule() {
        assert_approx(yearly_repayment(85_000.0, 30_000.0), 3_825.0);
        assert_approx(yearly_repayment(90_000.0, 30_000.0), 4_500.0);
        assert_approx(yearly_repayment(200_000.0, 50_000.0), 20_000.0);
    }

    #[test]
    fn repayment_is_capped_at_outstanding_debt() {
        assert_approx(yearly_repayment(200_000.0, 5_000.0), 5_000.0);
    }

    #[test]
    fn monthly_repayment_is_yearly_over_twelve_in_cents() {
        assert_approx(monthly_repayment(85_000.0, 30_000.0), 318.75);
        assert!((monthly_repayment(85_000.0, 30_000.0) - 3_825.0 / 12.0).abs() < 0.005);
        assert_approx(monthly_repayment(60_000.0, 30_000.0), 50.0);
    }

    proptest! {
        #[test]
        fn prop_repayment_never_exceeds_debt(
            income in 0.0f64..1_000_000.0,
            debt in 0.0f64..200_000.0,
        ) {
            let yearly = yearly_repayment(income, debt);
            prop_assert!(yearly >= 0.0);
            prop_assert!(yearly <= debt + EPS);
        }

        #[test]
        fn prop_no_repayment_at_or_below_threshold(
            income in 0.0f64..=54_435.0,
            debt in 0.0f64..200_000.0,
        ) {
            prop_assert!(yearly_repayment(income, debt) == 0.0);
        }
    }
}
