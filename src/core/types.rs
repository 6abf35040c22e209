use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Jurisdiction {
    Nsw,
    Vic,
    Qld,
    Wa,
    Sa,
    Tas,
    Act,
    Nt,
}

impl Jurisdiction {
    pub const ALL: [Jurisdiction; 8] = [
        Jurisdiction::Nsw,
        Jurisdiction::Vic,
        Jurisdiction::Qld,
        Jurisdiction::Wa,
        Jurisdiction::Sa,
        Jurisdiction::Tas,
        Jurisdiction::Act,
        Jurisdiction::Nt,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Jurisdiction::Nsw => "NSW",
            Jurisdiction::Vic => "VIC",
            Jurisdiction::Qld => "QLD",
            Jurisdiction::Wa => "WA",
            Jurisdiction::Sa => "SA",
            Jurisdiction::Tas => "TAS",
            Jurisdiction::Act => "ACT",
            Jurisdiction::Nt => "NT",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Jurisdiction::Nsw => "New South Wales",
            Jurisdiction::Vic => "Victoria",
            Jurisdiction::Qld => "Queensland",
            Jurisdiction::Wa => "Western Australia",
            Jurisdiction::Sa => "South Australia",
            Jurisdiction::Tas => "Tasmania",
            Jurisdiction::Act => "Australian Capital Territory",
            Jurisdiction::Nt => "Northern Territory",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Existing,
    New,
    Land,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuyerType {
    Single,
    Couple,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Capital,
    Regional,
}

// interest_rate is an annual percentage (6.2 means 6.2%).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerProfile {
    pub jurisdiction: Jurisdiction,
    pub property_type: PropertyType,
    pub buyer_type: BuyerType,
    pub region: Region,
    pub dependents: u32,
    pub annual_income: f64,
    pub deposit: f64,
    pub monthly_expenses: f64,
    pub hecs_debt: f64,
    pub interest_rate: f64,
    pub loan_term_years: u32,
    pub first_home_buyer: bool,
}

impl Default for BuyerProfile {
    fn default() -> Self {
        BuyerProfile {
            jurisdiction: Jurisdiction::Nsw,
            property_type: PropertyType::Existing,
            buyer_type: BuyerType::Single,
            region: Region::Capital,
            dependents: 0,
            annual_income: 85_000.0,
            deposit: 50_000.0,
            monthly_expenses: 2_000.0,
            hecs_debt: 0.0,
            interest_rate: 6.2,
            loan_term_years: 30,
            first_home_buyer: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StampDutyResult {
    pub duty: f64,
    pub concession: f64,
    pub effective_duty: f64,
}

impl StampDutyResult {
    pub const ZERO: StampDutyResult = StampDutyResult {
        duty: 0.0,
        concession: 0.0,
        effective_duty: 0.0,
    };
}

// premium: 0 when not required, -1 when outside the rate table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LmiResult {
    pub premium: f64,
    pub eligible: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantEligibility {
    pub eligible: bool,
    pub amount: f64,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuaranteeEligibility {
    pub eligible: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcessionEligibility {
    pub eligible: bool,
    pub savings: f64,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeEligibility {
    pub fhog: GrantEligibility,
    pub fhds: GuaranteeEligibility,
    pub concession: ConcessionEligibility,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePointResult {
    pub purchase_price: f64,
    pub loan_amount: f64,
    pub lvr: f64,
    pub dti: f64,
    pub monthly_repayment: f64,
    pub total_repayment: f64,
    pub stamp_duty: StampDutyResult,
    pub lmi: LmiResult,
    pub upfront_cash: f64,
    pub schemes: SchemeEligibility,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorResults {
    pub max_borrowing_capacity: f64,
    pub price_points: Vec<PricePointResult>,
    pub inputs: BuyerProfile,
}
