use tracing::debug;

use super::lmi::estimate_lmi;
use super::loan;
use super::schemes::calc_schemes;
use super::stamp_duty::calc_stamp_duty;
use super::types::{BuyerProfile, CalculatorResults, PricePointResult};

pub const PRICE_POINT_INTERVAL: f64 = 25_000.0;
pub const PRICE_POINTS_COUNT: u32 = 15;
pub const MAX_LVR_PERCENT: f64 = 95.0;

fn ceiling_price(max_borrowing_capacity: f64, deposit: f64) -> f64 {
    ((max_borrowing_capacity + deposit) / PRICE_POINT_INTERVAL).ceil() * PRICE_POINT_INTERVAL
}

fn price_point(profile: &BuyerProfile, purchase_price: f64, loan_amount: f64, lvr: f64) -> PricePointResult {
    let stamp_duty = calc_stamp_duty(
        purchase_price,
        profile.jurisdiction,
        profile.property_type,
        profile.first_home_buyer,
    );
    let schemes = calc_schemes(
        profile.jurisdiction,
        profile.property_type,
        profile.region,
        purchase_price,
        profile.first_home_buyer,
    );
    let lmi = estimate_lmi(purchase_price, lvr, schemes.fhds.eligible);
    let upfront_cash = loan::upfront_cash(
        profile.deposit,
        stamp_duty.effective_duty,
        lmi.premium,
        schemes.fhog.amount,
    );

    PricePointResult {
        purchase_price,
        loan_amount,
        lvr,
        dti: loan::dti(loan_amount, profile.annual_income),
        monthly_repayment: loan::monthly_repayment(
            loan_amount,
            profile.interest_rate,
            profile.loan_term_years,
        ),
        total_repayment: loan::total_repayment(
            loan_amount,
            profile.interest_rate,
            profile.loan_term_years,
        ),
        stamp_duty,
        lmi,
        upfront_cash,
        schemes,
    }
}

pub fn calculate(profile: &BuyerProfile) -> CalculatorResults {
    let max_borrowing_capacity = loan::max_loan(
        profile.annual_income,
        profile.monthly_expenses,
        profile.hecs_debt,
        profile.interest_rate,
        profile.loan_term_years,
        profile.buyer_type,
        profile.dependents,
    );

    if max_borrowing_capacity <= 0.0 {
        debug!(
            jurisdiction = profile.jurisdiction.code(),
            "no borrowing capacity; empty sweep"
        );
        return CalculatorResults {
            max_borrowing_capacity: 0.0,
            price_points: Vec::new(),
            inputs: profile.clone(),
        };
    }

    let deposit = profile.deposit.max(0.0);
    let top = ceiling_price(max_borrowing_capacity, deposit);
    let mut price_points = Vec::with_capacity(PRICE_POINTS_COUNT as usize);

    for step in 0..PRICE_POINTS_COUNT {
        let purchase_price = top - f64::from(step) * PRICE_POINT_INTERVAL;
        if purchase_price <= 0.0 {
            break;
        }
        let loan_amount = purchase_price - deposit;
        if loan_amount <= 0.0 {
            break;
        }
        let lvr = loan::lvr(loan_amount, purchase_price);
        if lvr > MAX_LVR_PERCENT {
            continue;
        }
        price_points.push(price_point(profile, purchase_price, loan_amount, lvr));
    }

    debug!(
        jurisdiction = profile.jurisdiction.code(),
        capacity = max_borrowing_capacity,
        top_price = top,
        rows = price_points.len(),
        "priced purchase sweep"
    );

    CalculatorResults {
        max_borrowing_capacity,
        price_points,
        inputs: profile.clone(),
    }
}
