use super::expenses::effective_expenses;
use super::hecs;
use super::types::BuyerType;

pub const SERVICEABILITY_BUFFER: f64 = 3.0;
pub const SERVICEABILITY_RATIO: f64 = 0.60;
pub const MAX_DTI: f64 = 6.0;
pub const DEPENDENT_MONTHLY_LOADING: f64 = 450.0;
pub const COUPLE_SERVICEABILITY_MULTIPLIER: f64 = 0.95;

pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn monthly_repayment(principal: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    if principal <= 0.0 || term_years == 0 {
        return 0.0;
    }
    let payments = f64::from(term_years) * 12.0;
    if annual_rate_percent <= 0.0 {
        return round_cents(principal / payments);
    }

    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let growth_m1 = compound_growth_m1(monthly_rate, payments);
    if growth_m1 <= 0.0 {
        return round_cents(principal / payments);
    }
    round_cents(principal * monthly_rate * (growth_m1 + 1.0) / growth_m1)
}

pub fn total_repayment(principal: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    let payments = f64::from(term_years) * 12.0;
    round_cents(monthly_repayment(principal, annual_rate_percent, term_years) * payments)
}

pub fn lvr(loan_amount: f64, purchase_price: f64) -> f64 {
    if purchase_price <= 0.0 {
        return 0.0;
    }
    (loan_amount / purchase_price * 100.0).max(0.0)
}

// Zero income gives f64::INFINITY so it flows through to the result row.
pub fn dti(loan_amount: f64, annual_income: f64) -> f64 {
    if annual_income <= 0.0 {
        return f64::INFINITY;
    }
    loan_amount / annual_income
}

// (1 + r)^n - 1 without cancellation when r is tiny.
fn compound_growth_m1(monthly_rate: f64, payments: f64) -> f64 {
    (payments * monthly_rate.ln_1p()).exp_m1()
}

fn annuity_principal(payment: f64, monthly_rate: f64, payments: f64) -> f64 {
    if monthly_rate <= 0.0 {
        return payment * payments;
    }
    let growth_m1 = compound_growth_m1(monthly_rate, payments);
    if growth_m1 <= 0.0 {
        return payment * payments;
    }
    payment * growth_m1 / (monthly_rate * (growth_m1 + 1.0))
}

pub fn max_loan(
    annual_income: f64,
    monthly_expenses: f64,
    hecs_debt: f64,
    annual_rate_percent: f64,
    term_years: u32,
    buyer_type: BuyerType,
    dependents: u32,
) -> f64 {
    if annual_income <= 0.0 || term_years == 0 {
        return 0.0;
    }

    let assessment_rate = annual_rate_percent + SERVICEABILITY_BUFFER;
    let expenses = effective_expenses(monthly_expenses, annual_income, buyer_type)
        + f64::from(dependents) * DEPENDENT_MONTHLY_LOADING;
    let hecs_monthly = hecs::monthly_repayment(annual_income, hecs_debt);

    let multiplier = match buyer_type {
        BuyerType::Single => 1.0,
        BuyerType::Couple => COUPLE_SERVICEABILITY_MULTIPLIER,
    };
    let serviceable = annual_income / 12.0 * SERVICEABILITY_RATIO * multiplier;
    let surplus = serviceable - expenses - hecs_monthly;
    if surplus <= 0.0 {
        return 0.0;
    }

    let monthly_rate = assessment_rate / 100.0 / 12.0;
    let principal = annuity_principal(surplus, monthly_rate, f64::from(term_years) * 12.0);
    principal
        .max(0.0)
        .round()
        .min((annual_income * MAX_DTI).floor())
}

// A negative LMI premium means "not available" and costs nothing here.
pub fn upfront_cash(deposit: f64, stamp_duty: f64, lmi_premium: f64, fhog_amount: f64) -> f64 {
    (deposit + stamp_duty + lmi_premium.max(0.0) - fhog_amount).max(0.0)
}
