//! The three business decision tables. Recommendation text is shown verbatim by both
//! front-ends.

use rp_core::clv::ClvSegment;
use rp_core::delivery::DeliveryRisk;
use rp_core::footfall::FootfallTier;

use crate::rules::{DecisionTable, ThresholdRule};

pub const FOOTFALL_HIGH: &str = "High traffic day: increase staff and run in-store promotions.";
pub const FOOTFALL_MEDIUM: &str = "Medium traffic day: normal staff, consider peak-hour offers.";
pub const FOOTFALL_LOW: &str = "Low traffic day: optimise staffing and push digital campaigns.";

pub const DELIVERY_HIGH: &str = "High delay risk: inform customer early and avoid tight SLAs.";
pub const DELIVERY_MODERATE: &str =
    "Moderate delay risk: assign experienced rider and check route.";
pub const DELIVERY_LOW: &str = "Low delay risk: use this slot for express delivery promises.";

pub const CLV_HIGH: &str = "Pamper with VIP perks, loyalty rewards, and early access.";
pub const CLV_MEDIUM: &str = "Use targeted offers and personalised nudges to grow value.";
pub const CLV_LOW: &str = "Use low-cost campaigns to increase frequency and engagement.";

/// Visitors per day.
pub static FOOTFALL: DecisionTable<FootfallTier> = DecisionTable::new(
    &[
        ThresholdRule { above: 500.0, tier: FootfallTier::High, recommendation: FOOTFALL_HIGH },
        ThresholdRule { above: 300.0, tier: FootfallTier::Medium, recommendation: FOOTFALL_MEDIUM },
    ],
    FootfallTier::Low,
    FOOTFALL_LOW,
);

/// Minutes to deliver.
pub static DELIVERY: DecisionTable<DeliveryRisk> = DecisionTable::new(
    &[
        ThresholdRule {
            above: 45.0,
            tier: DeliveryRisk::HighDelayRisk,
            recommendation: DELIVERY_HIGH,
        },
        ThresholdRule {
            above: 30.0,
            tier: DeliveryRisk::ModerateDelayRisk,
            recommendation: DELIVERY_MODERATE,
        },
    ],
    DeliveryRisk::LowDelayRisk,
    DELIVERY_LOW,
);

/// Revenue over the next 12 months.
pub static CLV: DecisionTable<ClvSegment> = DecisionTable::new(
    &[
        ThresholdRule { above: 50_000.0, tier: ClvSegment::HighValue, recommendation: CLV_HIGH },
        ThresholdRule {
            above: 20_000.0,
            tier: ClvSegment::MediumValue,
            recommendation: CLV_MEDIUM,
        },
    ],
    ClvSegment::LowValue,
    CLV_LOW,
);
