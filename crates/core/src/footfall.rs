use serde::{Deserialize, Serialize};

use crate::fields::{self, ensure_int_within, FieldSource};
use crate::{FeatureBuilder, FeatureVector, FieldType, InputField, PredictorKind, Result, Tier};

pub const FEATURE_NAMES: [&str; 5] =
    ["day_of_week", "is_weekend", "is_holiday", "promo_active", "month"];

pub const INPUT_FIELDS: [InputField; 4] = [
    InputField {
        name: "day_of_week",
        label: "Day of week (0=Mon ... 6=Sun)",
        field_type: FieldType::Integer,
    },
    InputField {
        name: "is_holiday",
        label: "Is it a holiday? (0=No, 1=Yes)",
        field_type: FieldType::Flag,
    },
    InputField {
        name: "promo_active",
        label: "Is promotion active? (0=No, 1=Yes)",
        field_type: FieldType::Flag,
    },
    InputField { name: "month", label: "Month (1-12)", field_type: FieldType::Integer },
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FootfallInputs {
    /// 0 = Monday ... 6 = Sunday.
    pub day_of_week: i64,
    pub is_holiday: bool,
    pub promo_active: bool,
    pub month: i64,
}

impl FootfallInputs {
    pub fn is_weekend(&self) -> bool {
        self.day_of_week >= 5
    }
}

impl FeatureBuilder for FootfallInputs {
    const KIND: PredictorKind = PredictorKind::Footfall;

    fn from_fields<S: FieldSource + ?Sized>(source: &S) -> Result<Self> {
        Ok(Self {
            day_of_week: fields::parse_int(source, "day_of_week")?,
            is_holiday: fields::parse_flag(source, "is_holiday")?,
            promo_active: fields::parse_flag(source, "promo_active")?,
            month: fields::parse_int(source, "month")?,
        })
    }

    fn build(&self) -> Result<FeatureVector> {
        ensure_int_within("day_of_week", self.day_of_week, 0, 6)?;
        ensure_int_within("month", self.month, 1, 12)?;

        Ok(FeatureVector::new(
            Self::KIND,
            vec![
                self.day_of_week as f64,
                flag(self.is_weekend()),
                flag(self.is_holiday),
                flag(self.promo_active),
                self.month as f64,
            ],
        ))
    }
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FootfallTier {
    High,
    Medium,
    Low,
}

impl Tier for FootfallTier {
    fn code(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::High => "High traffic",
            Self::Medium => "Medium traffic",
            Self::Low => "Low traffic",
        }
    }
}
