//! Raw field access and parsing.
//!
//! Both front-ends hand the engine loose string fields (console answers, form values).
//! Parsing is strict: a value that does not parse to the declared type is rejected with the
//! field name, never rounded or defaulted.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::{CoreError, Result};

/// Anything that can look up a raw value by field name.
pub trait FieldSource {
    fn field(&self, name: &str) -> Option<&str>;
}

impl<S: BuildHasher> FieldSource for HashMap<String, String, S> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl FieldSource for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl FieldSource for [(&str, &str)] {
    fn field(&self, name: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }
}

impl<const N: usize> FieldSource for [(&str, &str); N] {
    fn field(&self, name: &str) -> Option<&str> {
        self.as_slice().field(name)
    }
}

pub fn require<'a, S: FieldSource + ?Sized>(source: &'a S, name: &'static str) -> Result<&'a str> {
    match source.field(name).map(str::trim) {
        Some(raw) if !raw.is_empty() => Ok(raw),
        _ => Err(CoreError::invalid(name, "missing value")),
    }
}

pub fn parse_int<S: FieldSource + ?Sized>(source: &S, name: &'static str) -> Result<i64> {
    let raw = require(source, name)?;
    raw.parse::<i64>()
        .map_err(|_| CoreError::invalid(name, format!("expected a whole number, got {raw:?}")))
}

pub fn parse_float<S: FieldSource + ?Sized>(source: &S, name: &'static str) -> Result<f64> {
    let raw = require(source, name)?;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CoreError::invalid(name, format!("expected a finite number, got {raw:?}"))),
    }
}

/// Accepts `0`/`1`, `true`/`false` and `yes`/`no`, case-insensitive.
pub fn parse_flag<S: FieldSource + ?Sized>(source: &S, name: &'static str) -> Result<bool> {
    let raw = require(source, name)?;
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(CoreError::invalid(name, format!("expected 0 or 1, got {raw:?}"))),
    }
}

pub(crate) fn ensure_int_within(name: &'static str, value: i64, min: i64, max: i64) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::invalid(name, format!("must be between {min} and {max}, got {value}")))
    }
}

pub(crate) fn ensure_non_negative_int(name: &'static str, value: i64) -> Result<()> {
    if value >= 0 {
        Ok(())
    } else {
        Err(CoreError::invalid(name, format!("must be zero or more, got {value}")))
    }
}

pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CoreError::invalid(name, format!("must be greater than zero, got {value}")))
    }
}

pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::invalid(name, format!("must be zero or more, got {value}")))
    }
}

pub(crate) fn ensure_rate(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::invalid(name, format!("must be between 0 and 1, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_blank_are_rejected() {
        let src = [("a", "  ")];
        assert_eq!(require(&src, "a").unwrap_err().field(), Some("a"));
        assert_eq!(require(&src, "b").unwrap_err().field(), Some("b"));
    }

    #[test]
    fn integers_are_not_coerced_from_decimals() {
        let src = [("n", "3.5"), ("m", " 4 ")];
        assert!(parse_int(&src, "n").is_err());
        assert_eq!(parse_int(&src, "m").unwrap(), 4);
    }

    #[test]
    fn non_finite_floats_are_rejected() {
        let src = [("x", "NaN"), ("y", "inf"), ("z", "2.5")];
        assert!(parse_float(&src, "x").is_err());
        assert!(parse_float(&src, "y").is_err());
        assert_eq!(parse_float(&src, "z").unwrap(), 2.5);
    }

    #[test]
    fn flags() {
        let src = [("a", "1"), ("b", "No"), ("c", "2")];
        assert!(parse_flag(&src, "a").unwrap());
        assert!(!parse_flag(&src, "b").unwrap());
        assert!(parse_flag(&src, "c").is_err());
    }

    #[test]
    fn maps_are_sources() {
        let mut map = HashMap::new();
        map.insert("month".to_string(), "6".to_string());
        assert_eq!(parse_int(&map, "month").unwrap(), 6);

        let mut tree = BTreeMap::new();
        tree.insert("month".to_string(), "x".to_string());
        assert!(parse_int(&tree, "month").is_err());
    }
}
