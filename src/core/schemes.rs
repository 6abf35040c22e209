use super::stamp_duty::calc_stamp_duty;
use super::types::{
    ConcessionEligibility, GrantEligibility, GuaranteeEligibility, Jurisdiction, PropertyType,
    Region, SchemeEligibility,
};

#[derive(Debug, Clone, Copy)]
struct GrantTier {
    max_price: f64,
    amount: f64,
}

const fn tier(max_price: f64, amount: f64) -> GrantTier {
    GrantTier { max_price, amount }
}

const NO_GRANT: &[GrantTier] = &[];
const NSW_HOME_GRANT: &[GrantTier] = &[tier(600_000.0, 10_000.0)];
const NSW_LAND_GRANT: &[GrantTier] = &[tier(750_000.0, 10_000.0)];
const VIC_GRANT: &[GrantTier] = &[tier(750_000.0, 10_000.0)];
const QLD_GRANT: &[GrantTier] = &[tier(750_000.0, 30_000.0)];
const WA_GRANT: &[GrantTier] = &[tier(750_000.0, 10_000.0)];
const SA_GRANT: &[GrantTier] = &[tier(f64::INFINITY, 15_000.0)];
const TAS_GRANT: &[GrantTier] = &[tier(f64::INFINITY, 30_000.0)];
const NT_GRANT: &[GrantTier] = &[tier(650_000.0, 50_000.0)];

fn grant_tiers(jurisdiction: Jurisdiction, property_type: PropertyType) -> &'static [GrantTier] {
    if property_type == PropertyType::Existing {
        return NO_GRANT;
    }
    match (jurisdiction, property_type) {
        (Jurisdiction::Nsw, PropertyType::Land) => NSW_LAND_GRANT,
        (Jurisdiction::Nsw, _) => NSW_HOME_GRANT,
        (Jurisdiction::Vic, _) => VIC_GRANT,
        (Jurisdiction::Qld, _) => QLD_GRANT,
        (Jurisdiction::Wa, _) => WA_GRANT,
        (Jurisdiction::Sa, _) => SA_GRANT,
        (Jurisdiction::Tas, _) => TAS_GRANT,
        (Jurisdiction::Act, _) => NO_GRANT,
        (Jurisdiction::Nt, _) => NT_GRANT,
    }
}

fn guarantee_cap(jurisdiction: Jurisdiction, region: Region) -> f64 {
    match (jurisdiction, region) {
        (Jurisdiction::Nsw, Region::Capital) => 900_000.0,
        (Jurisdiction::Nsw, Region::Regional) => 750_000.0,
        (Jurisdiction::Vic, Region::Capital) => 800_000.0,
        (Jurisdiction::Vic, Region::Regional) => 650_000.0,
        (Jurisdiction::Qld, Region::Capital) => 700_000.0,
        (Jurisdiction::Qld, Region::Regional) => 550_000.0,
        (Jurisdiction::Wa | Jurisdiction::Sa | Jurisdiction::Tas, Region::Capital) => 600_000.0,
        (Jurisdiction::Wa | Jurisdiction::Sa | Jurisdiction::Tas, Region::Regional) => 450_000.0,
        (Jurisdiction::Act, _) => 750_000.0,
        (Jurisdiction::Nt, _) => 600_000.0,
    }
}

pub fn format_dollars(amount: f64) -> String {
    let whole = amount.abs().round() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

const NOT_FIRST_HOME_BUYER: &str = "Only available to first home buyers";

pub fn calc_fhog(
    jurisdiction: Jurisdiction,
    property_type: PropertyType,
    price: f64,
    first_home_buyer: bool,
) -> GrantEligibility {
    let ineligible = |reason: String| GrantEligibility {
        eligible: false,
        amount: 0.0,
        reason: Some(reason),
    };

    if !first_home_buyer {
        return ineligible(NOT_FIRST_HOME_BUYER.to_string());
    }
    if property_type == PropertyType::Existing {
        return ineligible("Grant is only paid on new homes or land to build on".to_string());
    }
    let tiers = grant_tiers(jurisdiction, property_type);
    if tiers.is_empty() {
        return ineligible(format!("{} does not offer a first home grant", jurisdiction.code()));
    }
    if price <= 0.0 {
        return ineligible("No purchase price".to_string());
    }

    match tiers.iter().find(|tier| price <= tier.max_price) {
        Some(tier) => GrantEligibility {
            eligible: true,
            amount: tier.amount,
            reason: Some(format!(
                "{} first home owner grant of {}",
                jurisdiction.code(),
                format_dollars(tier.amount)
            )),
        },
        None => {
            let cap = tiers.iter().map(|tier| tier.max_price).fold(0.0, f64::max);
            ineligible(format!("Price exceeds the {} grant cap", format_dollars(cap)))
        }
    }
}

pub fn calc_fhds(
    jurisdiction: Jurisdiction,
    region: Region,
    price: f64,
    first_home_buyer: bool,
) -> GuaranteeEligibility {
    if !first_home_buyer {
        return GuaranteeEligibility {
            eligible: false,
            reason: Some(NOT_FIRST_HOME_BUYER.to_string()),
        };
    }

    let cap = guarantee_cap(jurisdiction, region);
    if price > 0.0 && price <= cap {
        GuaranteeEligibility {
            eligible: true,
            reason: Some(format!(
                "Under the {} First Home Guarantee cap; LMI waived with a 5% deposit",
                format_dollars(cap)
            )),
        }
    } else {
        GuaranteeEligibility {
            eligible: false,
            reason: Some(format!(
                "Price exceeds the {} First Home Guarantee cap",
                format_dollars(cap)
            )),
        }
    }
}

pub fn calc_concession(
    jurisdiction: Jurisdiction,
    property_type: PropertyType,
    price: f64,
    first_home_buyer: bool,
) -> ConcessionEligibility {
    if !first_home_buyer {
        return ConcessionEligibility {
            eligible: false,
            savings: 0.0,
            reason: Some(NOT_FIRST_HOME_BUYER.to_string()),
        };
    }

    let duty = calc_stamp_duty(price, jurisdiction, property_type, true);
    if duty.concession <= 0.0 {
        return ConcessionEligibility {
            eligible: false,
            savings: 0.0,
            reason: Some(format!(
                "No first home duty relief in {} for this purchase",
                jurisdiction.code()
            )),
        };
    }

    let reason = if duty.effective_duty <= 0.0 {
        format!("Full stamp duty exemption saves {}", format_dollars(duty.concession))
    } else {
        format!("Partial stamp duty concession saves {}", format_dollars(duty.concession))
    };
    ConcessionEligibility {
        eligible: true,
        savings: duty.concession,
        reason: Some(reason),
    }
}

pub fn calc_schemes(
    jurisdiction: Jurisdiction,
    property_type: PropertyType,
    region: Region,
    price: f64,
    first_home_buyer: bool,
) -> SchemeEligibility {
    SchemeEligibility {
        fhog: calc_fhog(jurisdiction, property_type, price, first_home_buyer),
        fhds: calc_fhds(jurisdiction, region, price, first_home_buyer),
        concession: calc_concession(jurisdiction, property_type, price, first_home_buyer),
    }
}
