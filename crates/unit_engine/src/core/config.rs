//! # Component Configuration Records
//!
//! Components are initialized from external data (scene files, scripting
//! layers). This module provides the read-only, named-field view of such a
//! record that `awake` receives, decoupling the component layer from any
//! specific scripting engine or file format.
//!
//! ## Design Goals
//!
//! - **Read-only**: components never mutate their configuration record
//! - **Typed access**: accessors validate field types and report
//!   configuration errors instead of panicking
//! - **Documented defaults**: every optional field has a default supplied at
//!   the call site; absent fields are not an error
//!
//! Records deserialize from RON text via serde, and can also be assembled
//! programmatically with the builder-style [`ConfigView::with`].

use crate::error::EngineError;
use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single configuration value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Boolean flag
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f64),
    /// String value
    Str(String),
    /// Numeric list (used for vectors and colors)
    List(Vec<f64>),
}

impl From<bool> for ConfigValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for ConfigValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for ConfigValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for ConfigValue {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec3> for ConfigValue {
    fn from(v: Vec3) -> Self {
        Self::List(vec![f64::from(v.x), f64::from(v.y), f64::from(v.z)])
    }
}

/// Read-only configuration record with named-field access
///
/// Passed to [`Component::awake`](crate::gameobject::Component::awake).
/// Accessors come in two flavors: `required_*` (absence is a
/// [`EngineError::MissingField`]) and `*_or` (absence yields the supplied
/// default). A field that is present but has the wrong type is always an
/// [`EngineError::InvalidField`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigView {
    fields: HashMap<String, ConfigValue>,
}

impl ConfigView {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a record from RON text
    pub fn from_ron_str(text: &str) -> Result<Self, EngineError> {
        let fields: HashMap<String, ConfigValue> =
            ron::from_str(text).map_err(|e| EngineError::ConfigParse(e.to_string()))?;
        Ok(Self { fields })
    }

    /// Builder-style field insertion
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Raw access to a field
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.fields.get(key)
    }

    /// Whether the record contains a field
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Required string field
    pub fn required_str(&self, key: &str) -> Result<&str, EngineError> {
        match self.fields.get(key) {
            Some(ConfigValue::Str(s)) => Ok(s),
            Some(_) => Err(EngineError::InvalidField {
                field: key.to_string(),
                expected: "string",
            }),
            None => Err(EngineError::MissingField {
                field: key.to_string(),
            }),
        }
    }

    /// Optional string field with a default
    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> Result<&'a str, EngineError> {
        match self.fields.get(key) {
            Some(ConfigValue::Str(s)) => Ok(s),
            Some(_) => Err(EngineError::InvalidField {
                field: key.to_string(),
                expected: "string",
            }),
            None => Ok(default),
        }
    }

    /// Required floating-point field (integers coerce)
    pub fn required_f32(&self, key: &str) -> Result<f32, EngineError> {
        match self.fields.get(key) {
            Some(v) => Self::as_f32(key, v),
            None => Err(EngineError::MissingField {
                field: key.to_string(),
            }),
        }
    }

    /// Optional floating-point field with a default (integers coerce)
    pub fn f32_or(&self, key: &str, default: f32) -> Result<f32, EngineError> {
        match self.fields.get(key) {
            Some(v) => Self::as_f32(key, v),
            None => Ok(default),
        }
    }

    /// Optional boolean field with a default
    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool, EngineError> {
        match self.fields.get(key) {
            Some(ConfigValue::Bool(b)) => Ok(*b),
            Some(_) => Err(EngineError::InvalidField {
                field: key.to_string(),
                expected: "bool",
            }),
            None => Ok(default),
        }
    }

    /// Optional non-negative integer field with a default
    pub fn u32_or(&self, key: &str, default: u32) -> Result<u32, EngineError> {
        match self.fields.get(key) {
            Some(ConfigValue::Int(i)) => u32::try_from(*i).map_err(|_| EngineError::InvalidField {
                field: key.to_string(),
                expected: "non-negative integer",
            }),
            Some(_) => Err(EngineError::InvalidField {
                field: key.to_string(),
                expected: "non-negative integer",
            }),
            None => Ok(default),
        }
    }

    /// Optional signed integer field with a default
    pub fn i32_or(&self, key: &str, default: i32) -> Result<i32, EngineError> {
        match self.fields.get(key) {
            Some(ConfigValue::Int(i)) => i32::try_from(*i).map_err(|_| EngineError::InvalidField {
                field: key.to_string(),
                expected: "32-bit integer",
            }),
            Some(_) => Err(EngineError::InvalidField {
                field: key.to_string(),
                expected: "32-bit integer",
            }),
            None => Ok(default),
        }
    }

    /// Optional three-component vector field with a default
    ///
    /// Encoded as a numeric list of exactly three elements.
    pub fn vec3_or(&self, key: &str, default: Vec3) -> Result<Vec3, EngineError> {
        match self.fields.get(key) {
            Some(ConfigValue::List(items)) if items.len() == 3 => Ok(Vec3::new(
                items[0] as f32,
                items[1] as f32,
                items[2] as f32,
            )),
            Some(_) => Err(EngineError::InvalidField {
                field: key.to_string(),
                expected: "list of three numbers",
            }),
            None => Ok(default),
        }
    }

    fn as_f32(key: &str, value: &ConfigValue) -> Result<f32, EngineError> {
        match value {
            ConfigValue::Float(f) => Ok(*f as f32),
            ConfigValue::Int(i) => Ok(*i as f32),
            _ => Err(EngineError::InvalidField {
                field: key.to_string(),
                expected: "number",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fields_are_readable() {
        let config = ConfigView::new()
            .with("mass", 50.0)
            .with("static", true)
            .with("shape", "sphere");

        assert_eq!(config.f32_or("mass", 1000.0).unwrap(), 50.0);
        assert!(config.bool_or("static", false).unwrap());
        assert_eq!(config.required_str("shape").unwrap(), "sphere");
    }

    #[test]
    fn absent_optional_fields_use_defaults() {
        let config = ConfigView::new();
        assert_eq!(config.f32_or("mass", 1000.0).unwrap(), 1000.0);
        assert!(!config.bool_or("static", false).unwrap());
        assert_eq!(config.u32_or("listener_index", 0).unwrap(), 0);
    }

    #[test]
    fn absent_required_field_is_reported() {
        let config = ConfigView::new();
        let err = config.required_str("mesh").unwrap_err();
        assert!(matches!(err, EngineError::MissingField { field } if field == "mesh"));
    }

    #[test]
    fn wrong_type_is_invalid_even_with_default() {
        let config = ConfigView::new().with("mass", "heavy");
        assert!(matches!(
            config.f32_or("mass", 1.0),
            Err(EngineError::InvalidField { .. })
        ));
    }

    #[test]
    fn integers_coerce_to_float() {
        let config = ConfigView::new().with("mass", 10i64);
        assert_eq!(config.required_f32("mass").unwrap(), 10.0);
    }

    #[test]
    fn vec3_round_trips() {
        let config = ConfigView::new().with("position", Vec3::new(1.0, 2.0, 3.0));
        let v = config.vec3_or("position", Vec3::zeros()).unwrap();
        assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn parses_ron_text() {
        let config = ConfigView::from_ron_str(
            r#"{"mesh": "ball.mesh", "mass": 12.5, "static": false, "position": [0.0, 4.0, 0.0]}"#,
        )
        .unwrap();
        assert_eq!(config.required_str("mesh").unwrap(), "ball.mesh");
        assert_eq!(config.required_f32("mass").unwrap(), 12.5);
        assert_eq!(
            config.vec3_or("position", Vec3::zeros()).unwrap(),
            Vec3::new(0.0, 4.0, 0.0)
        );
    }

    #[test]
    fn malformed_ron_is_a_parse_error() {
        assert!(matches!(
            ConfigView::from_ron_str("{{{"),
            Err(EngineError::ConfigParse(_))
        ));
    }
}
