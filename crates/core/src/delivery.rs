use serde::{Deserialize, Serialize};

use crate::fields::{
    self, ensure_int_within, ensure_non_negative, ensure_non_negative_int, ensure_positive,
    FieldSource,
};
use crate::{FeatureBuilder, FeatureVector, FieldType, InputField, PredictorKind, Result, Tier};

pub const FEATURE_NAMES: [&str; 6] = [
    "distance_km",
    "num_items",
    "order_value",
    "time_of_day_bucket",
    "traffic_level",
    "rider_experience_months",
];

pub const INPUT_FIELDS: [InputField; 6] = [
    InputField { name: "distance_km", label: "Distance (km)", field_type: FieldType::Decimal },
    InputField { name: "num_items", label: "Number of items", field_type: FieldType::Integer },
    InputField { name: "order_value", label: "Order value (₹)", field_type: FieldType::Decimal },
    InputField {
        name: "time_of_day_bucket",
        label: "Time of day (0=Morning, 1=Afternoon, 2=Night)",
        field_type: FieldType::Integer,
    },
    InputField {
        name: "traffic_level",
        label: "Traffic level (1=Low, 2=Medium, 3=High)",
        field_type: FieldType::Integer,
    },
    InputField {
        name: "rider_experience_months",
        label: "Rider experience (months)",
        field_type: FieldType::Integer,
    },
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DeliveryInputs {
    pub distance_km: f64,
    pub num_items: i64,
    pub order_value: f64,
    /// 0 = morning, 1 = afternoon, 2 = night.
    pub time_of_day_bucket: i64,
    /// 1 = low, 2 = medium, 3 = high.
    pub traffic_level: i64,
    pub rider_experience_months: i64,
}

impl FeatureBuilder for DeliveryInputs {
    const KIND: PredictorKind = PredictorKind::Delivery;

    fn from_fields<S: FieldSource + ?Sized>(source: &S) -> Result<Self> {
        Ok(Self {
            distance_km: fields::parse_float(source, "distance_km")?,
            num_items: fields::parse_int(source, "num_items")?,
            order_value: fields::parse_float(source, "order_value")?,
            time_of_day_bucket: fields::parse_int(source, "time_of_day_bucket")?,
            traffic_level: fields::parse_int(source, "traffic_level")?,
            rider_experience_months: fields::parse_int(source, "rider_experience_months")?,
        })
    }

    fn build(&self) -> Result<FeatureVector> {
        ensure_positive("distance_km", self.distance_km)?;
        ensure_non_negative_int("num_items", self.num_items)?;
        ensure_non_negative("order_value", self.order_value)?;
        ensure_int_within("time_of_day_bucket", self.time_of_day_bucket, 0, 2)?;
        ensure_int_within("traffic_level", self.traffic_level, 1, 3)?;
        ensure_non_negative_int("rider_experience_months", self.rider_experience_months)?;

        Ok(FeatureVector::new(
            Self::KIND,
            vec![
                self.distance_km,
                self.num_items as f64,
                self.order_value,
                self.time_of_day_bucket as f64,
                self.traffic_level as f64,
                self.rider_experience_months as f64,
            ],
        ))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryRisk {
    HighDelayRisk,
    ModerateDelayRisk,
    LowDelayRisk,
}

impl Tier for DeliveryRisk {
    fn code(&self) -> &'static str {
        match self {
            Self::HighDelayRisk => "HIGH_DELAY_RISK",
            Self::ModerateDelayRisk => "MODERATE_DELAY_RISK",
            Self::LowDelayRisk => "LOW_DELAY_RISK",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::HighDelayRisk => "High delay risk",
            Self::ModerateDelayRisk => "Moderate delay risk",
            Self::LowDelayRisk => "Low delay risk",
        }
    }
}
