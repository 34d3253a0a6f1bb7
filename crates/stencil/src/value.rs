/*
 * value.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Substitution values and the value-source lookup contract.
//!
//! A template is formatted against a [`ValueSource`]: anything that can look
//! up a [`Value`] by name. Plain maps work out of the box; custom sources
//! implement the single `get` method.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};

/// A value substituted into a placeholder.
///
/// Values are strings or numbers; the placeholder always receives the
/// string form (via [`Display`](fmt::Display)) before any plugin runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

/// Read-only lookup of substitution values by name.
///
/// This is the formatter's entire view of caller data: one method, returning
/// the value or `None` for absent names. Absent names fall back to the
/// configured default (see
/// [`FormatOptions`](crate::format::FormatOptions)).
pub trait ValueSource {
    /// Look up a variable by name.
    fn get(&self, name: &str) -> Option<Value>;
}

impl<T: ValueSource + ?Sized> ValueSource for &T {
    fn get(&self, name: &str) -> Option<Value> {
        (**self).get(name)
    }
}

impl<K, V, S> ValueSource for HashMap<K, V, S>
where
    K: Borrow<str> + Eq + Hash,
    V: Clone + Into<Value>,
    S: BuildHasher,
{
    fn get(&self, name: &str) -> Option<Value> {
        HashMap::get(self, name).cloned().map(Into::into)
    }
}

impl<K, V> ValueSource for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: Clone + Into<Value>,
{
    fn get(&self, name: &str) -> Option<Value> {
        BTreeMap::get(self, name).cloned().map(Into::into)
    }
}

/// JSON objects are value sources: strings and numbers map to values,
/// anything else (bool, null, arrays, nested objects) reads as absent.
impl ValueSource for serde_json::Map<String, serde_json::Value> {
    fn get(&self, name: &str) -> Option<Value> {
        serde_json::Map::get(self, name).and_then(json_to_value)
    }
}

fn json_to_value(v: &serde_json::Value) -> Option<Value> {
    match v {
        serde_json::Value::String(s) => Some(Value::String(s.clone())),
        serde_json::Value::Number(n) => n
            .as_i64()
            .map(Value::Int)
            .or_else(|| n.as_f64().map(Value::Float)),
        _ => None,
    }
}
