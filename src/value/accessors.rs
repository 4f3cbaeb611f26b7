//! Type-narrowing accessors on [`Value`].
//!
//! Numeric accessors coerce between any numeric variants with `as`-cast
//! semantics: floats truncate toward zero and saturate, negative signed
//! values wrap when read as unsigned. Every other accessor is a strict
//! assertion on the variant.
//!
//! Each accessor has a `must_*` counterpart that returns the supplied
//! default, or the kind's zero value, instead of an error.

use std::collections::HashMap;

use super::Value;
use crate::error::{CacheError, Result};

impl Value {
    // == Numeric Coercion ==
    /// Coerces any numeric variant into an `f64`.
    pub fn as_f64(&self) -> Result<f64> {
        match *self {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            Value::Uint(u) => Ok(u as f64),
            _ => Err(CacheError::mismatch("f64")),
        }
    }

    /// Coerces any numeric variant into an `i64`.
    pub fn as_i64(&self) -> Result<i64> {
        match *self {
            Value::Float(f) => Ok(f as i64),
            Value::Int(i) => Ok(i),
            Value::Uint(u) => Ok(u as i64),
            _ => Err(CacheError::mismatch("i64")),
        }
    }

    /// Coerces any numeric variant into a `u64`.
    pub fn as_u64(&self) -> Result<u64> {
        match *self {
            Value::Float(f) => Ok(f as u64),
            Value::Int(i) => Ok(i as u64),
            Value::Uint(u) => Ok(u),
            _ => Err(CacheError::mismatch("u64")),
        }
    }

    // == Strict Assertions ==
    /// Asserts a `bool`.
    pub fn as_bool(&self) -> Result<bool> {
        match *self {
            Value::Bool(b) => Ok(b),
            _ => Err(CacheError::mismatch("bool")),
        }
    }

    /// Asserts a string.
    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(CacheError::mismatch("string")),
        }
    }

    /// Asserts a byte sequence.
    pub fn as_bytes(&self) -> Result<&[u8]> {
        match self {
            Value::Bytes(b) => Ok(b),
            _ => Err(CacheError::mismatch("bytes")),
        }
    }

    /// Asserts a key/value map.
    pub fn as_map(&self) -> Result<&HashMap<String, Value>> {
        match self {
            Value::Map(m) => Ok(m),
            _ => Err(CacheError::mismatch("map")),
        }
    }

    /// Asserts an array of values.
    pub fn as_array(&self) -> Result<&[Value]> {
        match self {
            Value::Array(a) => Ok(a),
            _ => Err(CacheError::mismatch("array")),
        }
    }

    /// Asserts an array of strings. `Null` elements read as empty strings.
    pub fn as_string_array(&self) -> Result<Vec<String>> {
        self.as_array()?
            .iter()
            .map(|item| match item {
                Value::Null => Ok(String::new()),
                Value::String(s) => Ok(s.clone()),
                _ => Err(CacheError::mismatch("string array")),
            })
            .collect()
    }

    // == Must Variants ==
    /// Like [`as_f64`](Self::as_f64), falling back to `default` or `0.0`.
    pub fn must_f64(&self, default: Option<f64>) -> f64 {
        self.as_f64().unwrap_or_else(|_| default.unwrap_or_default())
    }

    /// Like [`as_i64`](Self::as_i64), falling back to `default` or `0`.
    pub fn must_i64(&self, default: Option<i64>) -> i64 {
        self.as_i64().unwrap_or_else(|_| default.unwrap_or_default())
    }

    /// Like [`as_u64`](Self::as_u64), falling back to `default` or `0`.
    pub fn must_u64(&self, default: Option<u64>) -> u64 {
        self.as_u64().unwrap_or_else(|_| default.unwrap_or_default())
    }

    /// Like [`as_bool`](Self::as_bool), falling back to `default` or `false`.
    pub fn must_bool(&self, default: Option<bool>) -> bool {
        self.as_bool().unwrap_or_else(|_| default.unwrap_or_default())
    }

    /// Like [`as_str`](Self::as_str) but owned, falling back to `default` or `""`.
    pub fn must_string(&self, default: Option<&str>) -> String {
        match self.as_str() {
            Ok(s) => s.to_owned(),
            Err(_) => default.unwrap_or_default().to_owned(),
        }
    }

    /// Like [`as_bytes`](Self::as_bytes) but owned, falling back to `default` or empty.
    pub fn must_bytes(&self, default: Option<Vec<u8>>) -> Vec<u8> {
        match self.as_bytes() {
            Ok(b) => b.to_vec(),
            Err(_) => default.unwrap_or_default(),
        }
    }

    /// Like [`as_map`](Self::as_map) but cloned, falling back to `default` or empty.
    pub fn must_map(&self, default: Option<HashMap<String, Value>>) -> HashMap<String, Value> {
        match self.as_map() {
            Ok(m) => m.clone(),
            Err(_) => default.unwrap_or_default(),
        }
    }

    /// Like [`as_array`](Self::as_array) but cloned, falling back to `default` or empty.
    pub fn must_array(&self, default: Option<Vec<Value>>) -> Vec<Value> {
        match self.as_array() {
            Ok(a) => a.to_vec(),
            Err(_) => default.unwrap_or_default(),
        }
    }

    /// Like [`as_string_array`](Self::as_string_array), falling back to `default` or empty.
    pub fn must_string_array(&self, default: Option<Vec<String>>) -> Vec<String> {
        self.as_string_array()
            .unwrap_or_else(|_| default.unwrap_or_default())
    }
}
