use serde::{Deserialize, Serialize};

use crate::fields::{self, ensure_non_negative_int, ensure_positive, ensure_rate, FieldSource};
use crate::{
    CoreError, FeatureBuilder, FeatureVector, FieldType, InputField, PredictorKind, Result, Tier,
};

pub const FEATURE_NAMES: [&str; 8] = [
    "tenure_months",
    "orders_per_month",
    "avg_order_value",
    "recency_days",
    "discount_usage_rate",
    "return_rate",
    "loyalty_index",
    "monetary_value",
];

pub const INPUT_FIELDS: [InputField; 6] = [
    InputField {
        name: "tenure_months",
        label: "Customer tenure (months)",
        field_type: FieldType::Integer,
    },
    InputField {
        name: "orders_per_month",
        label: "Orders per month",
        field_type: FieldType::Decimal,
    },
    InputField {
        name: "avg_order_value",
        label: "Average order value (₹)",
        field_type: FieldType::Decimal,
    },
    InputField {
        name: "recency_days",
        label: "Days since last order",
        field_type: FieldType::Integer,
    },
    InputField {
        name: "discount_usage_rate",
        label: "Discount usage rate (0-1)",
        field_type: FieldType::Decimal,
    },
    InputField { name: "return_rate", label: "Return rate (0-1)", field_type: FieldType::Decimal },
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClvInputs {
    pub tenure_months: i64,
    pub orders_per_month: f64,
    pub avg_order_value: f64,
    pub recency_days: i64,
    pub discount_usage_rate: f64,
    pub return_rate: f64,
}

impl ClvInputs {
    pub fn loyalty_index(&self) -> f64 {
        (1.0 - self.discount_usage_rate) * (1.0 - self.return_rate)
    }

    pub fn monetary_value(&self) -> f64 {
        self.orders_per_month * self.avg_order_value
    }
}

impl FeatureBuilder for ClvInputs {
    const KIND: PredictorKind = PredictorKind::Clv;

    fn from_fields<S: FieldSource + ?Sized>(source: &S) -> Result<Self> {
        Ok(Self {
            tenure_months: fields::parse_int(source, "tenure_months")?,
            orders_per_month: fields::parse_float(source, "orders_per_month")?,
            avg_order_value: fields::parse_float(source, "avg_order_value")?,
            recency_days: fields::parse_int(source, "recency_days")?,
            discount_usage_rate: fields::parse_float(source, "discount_usage_rate")?,
            return_rate: fields::parse_float(source, "return_rate")?,
        })
    }

    fn build(&self) -> Result<FeatureVector> {
        ensure_non_negative_int("tenure_months", self.tenure_months)?;
        ensure_positive("orders_per_month", self.orders_per_month)?;
        ensure_positive("avg_order_value", self.avg_order_value)?;
        ensure_non_negative_int("recency_days", self.recency_days)?;
        ensure_rate("discount_usage_rate", self.discount_usage_rate)?;
        ensure_rate("return_rate", self.return_rate)?;
        let monetary_value = self.monetary_value();
        if !monetary_value.is_finite() {
            return Err(CoreError::invalid(
                "avg_order_value",
                "orders_per_month * avg_order_value overflows",
            ));
        }

        Ok(FeatureVector::new(
            Self::KIND,
            vec![
                self.tenure_months as f64,
                self.orders_per_month,
                self.avg_order_value,
                self.recency_days as f64,
                self.discount_usage_rate,
                self.return_rate,
                self.loyalty_index(),
                monetary_value,
            ],
        ))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClvSegment {
    HighValue,
    MediumValue,
    LowValue,
}

impl Tier for ClvSegment {
    fn code(&self) -> &'static str {
        match self {
            Self::HighValue => "HIGH_VALUE",
            Self::MediumValue => "MEDIUM_VALUE",
            Self::LowValue => "LOW_VALUE",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::HighValue => "High Value",
            Self::MediumValue => "Medium Value",
            Self::LowValue => "Low Value",
        }
    }
}
