mod bands;
mod engine;
mod expenses;
mod hecs;
mod lmi;
mod loan;
mod schemes;
mod stamp_duty;
mod types;

pub use bands::TableError;
pub use engine::{MAX_LVR_PERCENT, PRICE_POINT_INTERVAL, PRICE_POINTS_COUNT, calculate};
pub use expenses::{effective_expenses, hem_benchmark};
pub use hecs::{
    monthly_repayment as hecs_monthly_repayment, yearly_repayment as hecs_yearly_repayment,
};
pub use lmi::estimate_lmi;
pub use loan::{dti, lvr, max_loan, monthly_repayment, total_repayment, upfront_cash};
pub use schemes::{calc_concession, calc_fhds, calc_fhog, calc_schemes, format_dollars};
pub use stamp_duty::{DutySchedule, calc_stamp_duty, schedule};
pub use types::{
    BuyerProfile, BuyerType, CalculatorResults, ConcessionEligibility, GrantEligibility,
    GuaranteeEligibility, Jurisdiction, LmiResult, PricePointResult, PropertyType, Region,
    SchemeEligibility, StampDutyResult,
};

pub fn validate_reference_tables() -> Result<(), TableError> {
    expenses::validate()?;
    hecs::validate()?;
    stamp_duty::validate()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_in_tables_are_valid() {
        assert_eq!(validate_reference_tables(), Ok(()));
    }

    #[test]
    fn hecs_repayments_are_reexported_alongside_loan_repayments() {
        assert_eq!(hecs_yearly_repayment(85_000.0, 30_000.0), 3_825.0);
        assert_eq!(hecs_monthly_repayment(85_000.0, 30_000.0), 318.75);
        assert!(monthly_repayment(400_000.0, 6.2, 30) > hecs_monthly_repayment(85_000.0, 30_000.0));
    }
}
