use super::bands::{HemBracket, TableError, validate_hem_brackets};
use super::types::BuyerType;

pub(crate) const HEM_TABLE: [HemBracket; 8] = [
    HemBracket::new(40_000.0, 1_200.0, 1_800.0),
    HemBracket::new(60_000.0, 1_400.0, 2_100.0),
    HemBracket::new(80_000.0, 1_600.0, 2_400.0),
    HemBracket::new(100_000.0, 1_800.0, 2_700.0),
    HemBracket::new(120_000.0, 2_000.0, 3_000.0),
    HemBracket::new(150_000.0, 2_200.0, 3_300.0),
    HemBracket::new(200_000.0, 2_500.0, 3_750.0),
    HemBracket::new(f64::INFINITY, 2_800.0, 4_200.0),
];

pub fn hem_benchmark(annual_income: f64, buyer_type: BuyerType) -> f64 {
    let bracket = HEM_TABLE
        .iter()
        .find(|bracket| annual_income <= bracket.max_income)
        .unwrap_or(&HEM_TABLE[HEM_TABLE.len() - 1]);
    match buyer_type {
        BuyerType::Single => bracket.single,
        BuyerType::Couple => bracket.couple,
    }
}

pub fn effective_expenses(declared_monthly: f64, annual_income: f64, buyer_type: BuyerType) -> f64 {
    declared_monthly
        .max(0.0)
        .max(hem_benchmark(annual_income, buyer_type))
}

pub(crate) fn validate() -> Result<(), TableError> {
    validate_hem_brackets("hem", &HEM_TABLE)
}
