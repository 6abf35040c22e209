use super::bands::{StampDutyBand, TableError, banded_duty, validate_duty_bands};
use super::loan::round_cents;
use super::types::{Jurisdiction, PropertyType, StampDutyResult};

pub trait DutySchedule: Sync {
    fn base_duty(&self, price: f64) -> f64;

    fn concession(&self, price: f64, property_type: PropertyType, duty: f64) -> f64;
}

pub(crate) const NSW_BANDS: [StampDutyBand; 7] = [
    StampDutyBand::new(0.0, 16_000.0, 0.0125, 0.0),
    StampDutyBand::new(16_000.0, 35_000.0, 0.015, 200.0),
    StampDutyBand::new(35_000.0, 93_000.0, 0.0175, 485.0),
    StampDutyBand::new(93_000.0, 351_000.0, 0.035, 1_500.0),
    StampDutyBand::new(351_000.0, 1_168_000.0, 0.045, 10_530.0),
    StampDutyBand::new(1_168_000.0, 3_505_000.0, 0.055, 47_295.0),
    StampDutyBand::new(3_505_000.0, f64::INFINITY, 0.07, 175_830.0),
];

// Principal place of residence rates, available up to VIC_PPOR_LIMIT.
pub(crate) const VIC_PPOR_BANDS: [StampDutyBand; 4] = [
    StampDutyBand::new(0.0, 25_000.0, 0.014, 0.0),
    StampDutyBand::new(25_000.0, 130_000.0, 0.024, 350.0),
    StampDutyBand::new(130_000.0, 440_000.0, 0.05, 2_870.0),
    StampDutyBand::new(440_000.0, f64::INFINITY, 0.06, 18_370.0),
];

pub(crate) const VIC_GENERAL_BANDS: [StampDutyBand; 3] = [
    StampDutyBand::new(0.0, 25_000.0, 0.014, 0.0),
    StampDutyBand::new(25_000.0, 130_000.0, 0.024, 350.0),
    StampDutyBand::new(130_000.0, f64::INFINITY, 0.06, 2_870.0),
];

const VIC_PPOR_LIMIT: f64 = 550_000.0;
const VIC_FLAT_RATE_FROM: f64 = 960_000.0;
const VIC_FLAT_RATE: f64 = 0.055;
const VIC_PREMIUM_FROM: f64 = 2_000_000.0;
const VIC_PREMIUM_BASE: f64 = 110_000.0;
const VIC_PREMIUM_RATE: f64 = 0.065;

// Home concession rates for owner-occupiers.
pub(crate) const QLD_BANDS: [StampDutyBand; 4] = [
    StampDutyBand::new(0.0, 350_000.0, 0.01, 0.0),
    StampDutyBand::new(350_000.0, 540_000.0, 0.035, 3_500.0),
    StampDutyBand::new(540_000.0, 1_000_000.0, 0.045, 10_150.0),
    StampDutyBand::new(1_000_000.0, f64::INFINITY, 0.0575, 30_850.0),
];

const QLD_FIRST_HOME_MAX_CONCESSION: f64 = 8_750.0;
const QLD_FIRST_HOME_TAPER_FROM: f64 = 505_000.0;
const QLD_FIRST_HOME_TAPER_TO: f64 = 550_000.0;
const QLD_FIRST_HOME_STEP: f64 = 5_000.0;
const QLD_FIRST_HOME_STEP_REDUCTION: f64 = 875.0;

pub(crate) const WA_BANDS: [StampDutyBand; 5] = [
    StampDutyBand::new(0.0, 120_000.0, 0.019, 0.0),
    StampDutyBand::new(120_000.0, 150_000.0, 0.0285, 2_280.0),
    StampDutyBand::new(150_000.0, 360_000.0, 0.038, 3_135.0),
    StampDutyBand::new(360_000.0, 725_000.0, 0.0475, 11_115.0),
    StampDutyBand::new(725_000.0, f64::INFINITY, 0.0515, 28_452.5),
];

pub(crate) const SA_BANDS: [StampDutyBand; 9] = [
    StampDutyBand::new(0.0, 12_000.0, 0.01, 0.0),
    StampDutyBand::new(12_000.0, 30_000.0, 0.02, 120.0),
    StampDutyBand::new(30_000.0, 50_000.0, 0.03, 480.0),
    StampDutyBand::new(50_000.0, 100_000.0, 0.035, 1_080.0),
    StampDutyBand::new(100_000.0, 200_000.0, 0.04, 2_830.0),
    StampDutyBand::new(200_000.0, 250_000.0, 0.0425, 6_830.0),
    StampDutyBand::new(250_000.0, 300_000.0, 0.0475, 8_955.0),
    StampDutyBand::new(300_000.0, 500_000.0, 0.05, 11_330.0),
    StampDutyBand::new(500_000.0, f64::INFINITY, 0.055, 21_330.0),
];

// The first $3,000 attracts a flat $50.
pub(crate) const TAS_BANDS: [StampDutyBand; 7] = [
    StampDutyBand::new(0.0, 3_000.0, 0.0, 50.0),
    StampDutyBand::new(3_000.0, 25_000.0, 0.0175, 50.0),
    StampDutyBand::new(25_000.0, 75_000.0, 0.0225, 435.0),
    StampDutyBand::new(75_000.0, 200_000.0, 0.035, 1_560.0),
    StampDutyBand::new(200_000.0, 375_000.0, 0.04, 5_935.0),
    StampDutyBand::new(375_000.0, 725_000.0, 0.0425, 12_935.0),
    StampDutyBand::new(725_000.0, f64::INFINITY, 0.045, 27_810.0),
];

// Owner-occupier rates.
pub(crate) const ACT_BANDS: [StampDutyBand; 6] = [
    StampDutyBand::new(0.0, 260_000.0, 0.006, 0.0),
    StampDutyBand::new(260_000.0, 300_000.0, 0.022, 1_560.0),
    StampDutyBand::new(300_000.0, 500_000.0, 0.034, 2_440.0),
    StampDutyBand::new(500_000.0, 750_000.0, 0.0432, 9_240.0),
    StampDutyBand::new(750_000.0, 1_000_000.0, 0.059, 20_040.0),
    StampDutyBand::new(1_000_000.0, f64::INFINITY, 0.064, 34_790.0),
];

const ACT_FLAT_RATE_FROM: f64 = 1_455_000.0;
const ACT_FLAT_RATE: f64 = 0.0454;

const NT_FORMULA_LIMIT: f64 = 525_000.0;
const NT_FORMULA_COEFFICIENT: f64 = 0.065_714_41;
const NT_FLAT_RATE: f64 = 0.0545;

fn tapered_relief(price: f64, duty: f64, full_to: f64, taper_to: f64) -> f64 {
    if price <= full_to {
        duty
    } else if price < taper_to {
        duty * (taper_to - price) / (taper_to - full_to)
    } else {
        0.0
    }
}

fn capped_relief(price: f64, duty: f64, cap: f64) -> f64 {
    if price <= cap { duty } else { 0.0 }
}

struct NswDuty;

impl DutySchedule for NswDuty {
    fn base_duty(&self, price: f64) -> f64 {
        banded_duty(&NSW_BANDS, price)
    }

    fn concession(&self, price: f64, property_type: PropertyType, duty: f64) -> f64 {
        match property_type {
            PropertyType::Existing | PropertyType::New => {
                tapered_relief(price, duty, 800_000.0, 1_000_000.0)
            }
            PropertyType::Land => tapered_relief(price, duty, 350_000.0, 450_000.0),
        }
    }
}

struct VicDuty;

impl DutySchedule for VicDuty {
    fn base_duty(&self, price: f64) -> f64 {
        if price <= VIC_PPOR_LIMIT {
            banded_duty(&VIC_PPOR_BANDS, price)
        } else if price <= VIC_FLAT_RATE_FROM {
            banded_duty(&VIC_GENERAL_BANDS, price)
        } else if price <= VIC_PREMIUM_FROM {
            price * VIC_FLAT_RATE
        } else {
            VIC_PREMIUM_BASE + (price - VIC_PREMIUM_FROM) * VIC_PREMIUM_RATE
        }
    }

    fn concession(&self, price: f64, _property_type: PropertyType, duty: f64) -> f64 {
        tapered_relief(price, duty, 600_000.0, 750_000.0)
    }
}

struct QldDuty;

impl DutySchedule for QldDuty {
    fn base_duty(&self, price: f64) -> f64 {
        banded_duty(&QLD_BANDS, price)
    }

    fn concession(&self, price: f64, property_type: PropertyType, duty: f64) -> f64 {
        match property_type {
            PropertyType::New | PropertyType::Land => duty,
            PropertyType::Existing => {
                if price < QLD_FIRST_HOME_TAPER_FROM {
                    QLD_FIRST_HOME_MAX_CONCESSION.min(duty)
                } else if price < QLD_FIRST_HOME_TAPER_TO {
                    let steps =
                        ((price - QLD_FIRST_HOME_TAPER_FROM) / QLD_FIRST_HOME_STEP).floor() + 1.0;
                    let reduction = steps * QLD_FIRST_HOME_STEP_REDUCTION;
                    (QLD_FIRST_HOME_MAX_CONCESSION - reduction).max(0.0)
                } else {
                    0.0
                }
            }
        }
    }
}

struct WaDuty;

impl DutySchedule for WaDuty {
    fn base_duty(&self, price: f64) -> f64 {
        banded_duty(&WA_BANDS, price)
    }

    fn concession(&self, price: f64, property_type: PropertyType, duty: f64) -> f64 {
        match property_type {
            PropertyType::Existing | PropertyType::New => {
                tapered_relief(price, duty, 430_000.0, 530_000.0)
            }
            PropertyType::Land => tapered_relief(price, duty, 300_000.0, 400_000.0),
        }
    }
}

struct SaDuty;

impl DutySchedule for SaDuty {
    fn base_duty(&self, price: f64) -> f64 {
        banded_duty(&SA_BANDS, price)
    }

    fn concession(&self, _price: f64, property_type: PropertyType, duty: f64) -> f64 {
        match property_type {
            PropertyType::New | PropertyType::Land => duty,
            PropertyType::Existing => 0.0,
        }
    }
}

struct TasDuty;

impl DutySchedule for TasDuty {
    fn base_duty(&self, price: f64) -> f64 {
        banded_duty(&TAS_BANDS, price)
    }

    fn concession(&self, price: f64, property_type: PropertyType, duty: f64) -> f64 {
        match property_type {
            PropertyType::Existing => capped_relief(price, duty, 750_000.0),
            PropertyType::New | PropertyType::Land => 0.0,
        }
    }
}

struct ActDuty;

impl DutySchedule for ActDuty {
    fn base_duty(&self, price: f64) -> f64 {
        if price > ACT_FLAT_RATE_FROM {
            price * ACT_FLAT_RATE
        } else {
            banded_duty(&ACT_BANDS, price)
        }
    }

    fn concession(&self, price: f64, _property_type: PropertyType, duty: f64) -> f64 {
        capped_relief(price, duty, 1_020_000.0)
    }
}

// Quadratic in thousands of dollars up to the formula limit, flat above.
struct NtDuty;

impl DutySchedule for NtDuty {
    fn base_duty(&self, price: f64) -> f64 {
        if price <= 0.0 {
            return 0.0;
        }
        if price <= NT_FORMULA_LIMIT {
            let thousands = price / 1_000.0;
            NT_FORMULA_COEFFICIENT * thousands * thousands
        } else {
            price * NT_FLAT_RATE
        }
    }

    fn concession(&self, _price: f64, _property_type: PropertyType, _duty: f64) -> f64 {
        0.0
    }
}

static NSW: NswDuty = NswDuty;
static VIC: VicDuty = VicDuty;
static QLD: QldDuty = QldDuty;
static WA: WaDuty = WaDuty;
static SA: SaDuty = SaDuty;
static TAS: TasDuty = TasDuty;
static ACT: ActDuty = ActDuty;
static NT: NtDuty = NtDuty;

pub fn schedule(jurisdiction: Jurisdiction) -> &'static dyn DutySchedule {
    match jurisdiction {
        Jurisdiction::Nsw => &NSW,
        Jurisdiction::Vic => &VIC,
        Jurisdiction::Qld => &QLD,
        Jurisdiction::Wa => &WA,
        Jurisdiction::Sa => &SA,
        Jurisdiction::Tas => &TAS,
        Jurisdiction::Act => &ACT,
        Jurisdiction::Nt => &NT,
    }
}

fn round_dollars(value: f64) -> f64 {
    round_cents(value).round()
}

pub fn calc_stamp_duty(
    price: f64,
    jurisdiction: Jurisdiction,
    property_type: PropertyType,
    first_home_buyer: bool,
) -> StampDutyResult {
    if price.is_nan() || price <= 0.0 {
        return StampDutyResult::ZERO;
    }

    let schedule = schedule(jurisdiction);
    let duty = round_dollars(schedule.base_duty(price)).max(0.0);
    let concession = if first_home_buyer {
        round_dollars(schedule.concession(price, property_type, duty)).clamp(0.0, duty)
    } else {
        0.0
    };

    StampDutyResult {
        duty,
        concession,
        effective_duty: (duty - concession).max(0.0),
    }
}

pub(crate) fn validate() -> Result<(), TableError> {
    validate_duty_bands("nsw", &NSW_BANDS)?;
    validate_duty_bands("vic-ppor", &VIC_PPOR_BANDS)?;
    validate_duty_bands("vic-general", &VIC_GENERAL_BANDS)?;
    validate_duty_bands("qld", &QLD_BANDS)?;
    validate_duty_bands("wa", &WA_BANDS)?;
    validate_duty_bands("sa", &SA_BANDS)?;
    validate_duty_bands("tas", &TAS_BANDS)?;
    validate_duty_bands("act", &ACT_BANDS)
}
