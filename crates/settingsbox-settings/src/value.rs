//! Setting values
//!
//! [`SettingValue`] is the runtime form held by a [`Settings`] store.
//! [`StoredValue`] is the form written to disk, where nested stores are plain
//! maps. Converting a `StoredValue` into a `SettingValue` upconverts every
//! map, at any depth, into a nested store; converting back flattens them.

use crate::error::{SettingsError, SettingsResult};
use crate::store::Settings;
use serde::{Deserialize, Serialize};
use settingsbox_core::types::{shared, Shared};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Serialized entries of a store, sorted by key
pub type StoredMap = BTreeMap<String, StoredValue>;

/// A plain (non-store) mapping of settings, as returned by `get_subset`
pub type SettingsMap = BTreeMap<String, SettingValue>;

/// Runtime value of a setting
///
/// Cloning a `Nested` value clones the handle: both clones refer to the same
/// nested store.
#[derive(Debug, Clone)]
pub enum SettingValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    /// Three-component numeric vector
    Vector([f64; 3]),
    /// Nested settings store
    Nested(Shared<Settings>),
}

impl SettingValue {
    /// Wrap a store as a nested value
    pub fn nested(settings: Settings) -> Self {
        Self::Nested(shared(settings))
    }

    /// Short name of the variant, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bool(_) => "bool",
            Self::Vector(_) => "vector",
            Self::Nested(_) => "nested",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Floats, with integers promoted
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<[f64; 3]> {
        match self {
            Self::Vector(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_nested(&self) -> Option<&Shared<Settings>> {
        match self {
            Self::Nested(v) => Some(v),
            _ => None,
        }
    }

    /// Flatten into the on-disk form
    pub fn to_stored(&self) -> StoredValue {
        match self {
            Self::Int(v) => StoredValue::Int(*v),
            Self::Float(v) => StoredValue::Float(*v),
            Self::Text(v) => StoredValue::Text(v.clone()),
            Self::Bool(v) => StoredValue::Bool(*v),
            Self::Vector(v) => StoredValue::Vector(*v),
            Self::Nested(store) => StoredValue::Map(store.borrow().to_stored()),
        }
    }

    /// Guess a value from free text: booleans, then integers, then floats,
    /// falling back to text
    pub fn infer(text: &str) -> Self {
        [ValueKind::Bool, ValueKind::Int, ValueKind::Float]
            .iter()
            .find_map(|kind| kind.parse(text))
            .unwrap_or_else(|| Self::Text(text.to_string()))
    }
}

impl From<StoredValue> for SettingValue {
    fn from(value: StoredValue) -> Self {
        match value {
            StoredValue::Int(v) => Self::Int(v),
            StoredValue::Float(v) => Self::Float(v),
            StoredValue::Text(v) => Self::Text(v),
            StoredValue::Bool(v) => Self::Bool(v),
            StoredValue::Vector(v) => Self::Vector(v),
            StoredValue::Map(map) => Self::nested(Settings::from_stored(map)),
        }
    }
}

impl PartialEq for SettingValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Vector(a), Self::Vector(b)) => a == b,
            (Self::Nested(a), Self::Nested(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            _ => false,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{:?}", v),
            Self::Text(v) => f.write_str(v),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Vector([x, y, z]) => write!(f, "[{:?}, {:?}, {:?}]", x, y, z),
            Self::Nested(store) => match store.try_borrow() {
                Ok(store) => {
                    let mut keys: Vec<&str> = store.keys().collect();
                    keys.sort_unstable();
                    f.write_str("{")?;
                    for (i, key) in keys.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{}: {}", key, store[*key])?;
                    }
                    f.write_str("}")
                }
                Err(_) => f.write_str("{...}"),
            },
        }
    }
}

impl From<i64> for SettingValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for SettingValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for SettingValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for SettingValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<[f64; 3]> for SettingValue {
    fn from(v: [f64; 3]) -> Self {
        Self::Vector(v)
    }
}

impl From<Settings> for SettingValue {
    fn from(v: Settings) -> Self {
        Self::nested(v)
    }
}

impl From<Shared<Settings>> for SettingValue {
    fn from(v: Shared<Settings>) -> Self {
        Self::Nested(v)
    }
}

/// On-disk value of a setting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoredValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Vector([f64; 3]),
    Map(StoredMap),
}

impl StoredValue {
    /// Human-readable form used by `export`; `key` is the dotted path used in errors
    ///
    /// Non-finite floats have no JSON or TOML representation and are rejected.
    pub fn to_json(&self, key: &str) -> SettingsResult<serde_json::Value> {
        use serde_json::Value;
        let finite = |v: f64| {
            if v.is_finite() {
                Ok(Value::from(v))
            } else {
                Err(SettingsError::InvalidValue {
                    key: key.to_string(),
                    reason: format!("{} cannot be exported", v),
                })
            }
        };
        Ok(match self {
            Self::Int(v) => Value::from(*v),
            Self::Float(v) => finite(*v)?,
            Self::Text(v) => Value::from(v.as_str()),
            Self::Bool(v) => Value::from(*v),
            Self::Vector(v) => Value::Array(
                v.iter()
                    .map(|c| finite(*c))
                    .collect::<SettingsResult<_>>()?,
            ),
            Self::Map(map) => Value::Object(
                map.iter()
                    .map(|(name, value)| {
                        let path = if key.is_empty() {
                            name.clone()
                        } else {
                            format!("{}.{}", key, name)
                        };
                        Ok((name.clone(), value.to_json(&path)?))
                    })
                    .collect::<SettingsResult<_>>()?,
            ),
        })
    }

    /// Parse an imported value; `key` is the dotted path used in errors
    pub fn from_json(key: &str, value: serde_json::Value) -> SettingsResult<Self> {
        use serde_json::Value;
        let invalid = |reason: &str| SettingsError::InvalidValue {
            key: key.to_string(),
            reason: reason.to_string(),
        };
        match value {
            Value::Bool(v) => Ok(Self::Bool(v)),
            Value::String(v) => Ok(Self::Text(v)),
            Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    Ok(Self::Int(v))
                } else if n.is_u64() {
                    Err(invalid("integer out of range"))
                } else {
                    n.as_f64().map(Self::Float).ok_or_else(|| invalid("not a number"))
                }
            }
            Value::Array(items) => {
                let numbers: Vec<f64> = items.iter().filter_map(Value::as_f64).collect();
                match <[f64; 3]>::try_from(numbers) {
                    Ok(vector) if items.len() == 3 => Ok(Self::Vector(vector)),
                    _ => Err(invalid("arrays must hold exactly three numbers")),
                }
            }
            Value::Object(object) => object
                .into_iter()
                .map(|(name, value)| {
                    let path = if key.is_empty() {
                        name.clone()
                    } else {
                        format!("{}.{}", key, name)
                    };
                    Ok((name, Self::from_json(&path, value)?))
                })
                .collect::<SettingsResult<StoredMap>>()
                .map(Self::Map),
            Value::Null => Err(invalid("null has no settings representation")),
        }
    }
}

/// How text entered by the user is turned into a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Float,
    Text,
    Bool,
}

impl ValueKind {
    /// Kind matching an existing value, if it is a scalar
    pub fn of(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Int(_) => Some(Self::Int),
            SettingValue::Float(_) => Some(Self::Float),
            SettingValue::Text(_) => Some(Self::Text),
            SettingValue::Bool(_) => Some(Self::Bool),
            SettingValue::Vector(_) | SettingValue::Nested(_) => None,
        }
    }

    /// Parse `text`; `None` when it is malformed for this kind
    pub fn parse(&self, text: &str) -> Option<SettingValue> {
        match self {
            Self::Int => text.trim().parse().ok().map(SettingValue::Int),
            Self::Float => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(SettingValue::Float),
            Self::Text => Some(SettingValue::Text(text.to_string())),
            Self::Bool => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(SettingValue::Bool(true)),
                "false" | "0" | "no" | "off" => Some(SettingValue::Bool(false)),
                _ => None,
            },
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Text => write!(f, "text"),
            Self::Bool => write!(f, "bool"),
        }
    }
}

impl FromStr for ValueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "int" | "integer" => Ok(Self::Int),
            "float" | "double" => Ok(Self::Float),
            "text" | "str" | "string" => Ok(Self::Text),
            "bool" | "boolean" => Ok(Self::Bool),
            other => Err(format!("unknown value kind '{}'", other)),
        }
    }
}
