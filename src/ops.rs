//! Subscript, append and remove operations on [`Value`] trees.
//!
//! Each operator has a fallible method counterpart. The operators treat
//! misuse as a bug and panic with the same [`Error`] the method returns.
//!
//! | Operator | Method | Receiver |
//! |---|---|---|
//! | `v["k"]` | [`Value::get_key`] | object, key must exist |
//! | `v["k"] = x` | [`Value::entry_or_default`] | object, absent key is created |
//! | `v[i]` | [`Value::at`] / [`Value::at_mut`] | array, `i < len` |
//! | `v += x` | [`Value::push`] | array |
//! | `v -= i` | [`Value::remove_at`] | array, `i < len` |
//! | `v -= "k"` | [`Value::remove_key`] | object, absent key is a no-op |
//!
//! ## Examples
//!
//! ```rust
//! use jsonode::Value;
//!
//! let mut doc = Value::new();
//! doc["list"] = Value::Array(vec![]);
//! doc["list"] += 1;
//! doc["list"] += "two";
//! doc["list"] -= 0;
//! doc["gone"] = true.into();
//! doc -= "gone";
//!
//! assert_eq!(doc.to_string(), r#"{ "list": [ "two" ] }"#);
//! ```

use crate::{Error, Result, Value};
use std::ops::{AddAssign, Index, IndexMut, SubAssign};

impl Value {
    /// Looks up `key` without inserting.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] if this is not an object, [`Error::KeyNotFound`]
    /// if the key is absent.
    pub fn get_key(&self, key: &str) -> Result<&Value> {
        match self {
            Value::Object(obj) => obj
                .get(key)
                .ok_or_else(|| Error::KeyNotFound(key.to_string())),
            other => Err(Error::wrong_type("object", other.type_name())),
        }
    }

    /// Mutable lookup of `key` without inserting.
    ///
    /// # Errors
    ///
    /// Same as [`Value::get_key`].
    pub fn get_key_mut(&mut self, key: &str) -> Result<&mut Value> {
        match self {
            Value::Object(obj) => obj
                .get_mut(key)
                .ok_or_else(|| Error::KeyNotFound(key.to_string())),
            other => Err(Error::wrong_type("object", other.type_name())),
        }
    }

    /// Mutable lookup of `key`, inserting an empty object first if it is absent.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] if this is not an object.
    pub fn entry_or_default(&mut self, key: &str) -> Result<&mut Value> {
        match self {
            Value::Object(obj) => Ok(obj.entry_or_default(key)),
            other => Err(Error::wrong_type("object", other.type_name())),
        }
    }

    /// Returns the array element at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] if this is not an array,
    /// [`Error::IndexOutOfBounds`] if `index >= len`.
    pub fn at(&self, index: usize) -> Result<&Value> {
        match self {
            Value::Array(arr) => arr.get(index).ok_or(Error::IndexOutOfBounds {
                index,
                len: arr.len(),
            }),
            other => Err(Error::wrong_type("array", other.type_name())),
        }
    }

    /// Mutable form of [`Value::at`].
    ///
    /// # Errors
    ///
    /// Same as [`Value::at`].
    pub fn at_mut(&mut self, index: usize) -> Result<&mut Value> {
        match self {
            Value::Array(arr) => {
                let len = arr.len();
                arr.get_mut(index)
                    .ok_or(Error::IndexOutOfBounds { index, len })
            }
            other => Err(Error::wrong_type("array", other.type_name())),
        }
    }

    /// Appends a new element built from `value`.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] if this is not an array.
    pub fn push<T: Into<Value>>(&mut self, value: T) -> Result<()> {
        match self {
            Value::Array(arr) => {
                arr.push(value.into());
                Ok(())
            }
            other => Err(Error::wrong_type("array", other.type_name())),
        }
    }

    /// Removes and returns the element at `index`, shifting later elements down.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] if this is not an array,
    /// [`Error::IndexOutOfBounds`] if `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Result<Value> {
        match self {
            Value::Array(arr) if index < arr.len() => Ok(arr.remove(index)),
            Value::Array(arr) => Err(Error::IndexOutOfBounds {
                index,
                len: arr.len(),
            }),
            other => Err(Error::wrong_type("array", other.type_name())),
        }
    }

    /// Removes `key`, returning its value if it was present.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] if this is not an object.
    pub fn remove_key(&mut self, key: &str) -> Result<Option<Value>> {
        match self {
            Value::Object(obj) => Ok(obj.remove(key)),
            other => Err(Error::wrong_type("object", other.type_name())),
        }
    }
}

#[track_caller]
fn fatal<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{}", err),
    }
}

impl Index<&str> for Value {
    type Output = Value;

    /// # Panics
    ///
    /// If this is not an object or the key is absent.
    #[track_caller]
    fn index(&self, key: &str) -> &Value {
        fatal(self.get_key(key))
    }
}

impl IndexMut<&str> for Value {
    /// Inserts an empty object under `key` if it is absent.
    ///
    /// # Panics
    ///
    /// If this is not an object.
    #[track_caller]
    fn index_mut(&mut self, key: &str) -> &mut Value {
        fatal(self.entry_or_default(key))
    }
}

impl Index<usize> for Value {
    type Output = Value;

    /// # Panics
    ///
    /// If this is not an array or `index >= len`.
    #[track_caller]
    fn index(&self, index: usize) -> &Value {
        fatal(self.at(index))
    }
}

impl IndexMut<usize> for Value {
    /// # Panics
    ///
    /// If this is not an array or `index >= len`.
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut Value {
        fatal(self.at_mut(index))
    }
}

impl<T: Into<Value>> AddAssign<T> for Value {
    /// # Panics
    ///
    /// If this is not an array.
    #[track_caller]
    fn add_assign(&mut self, value: T) {
        fatal(self.push(value));
    }
}

impl SubAssign<usize> for Value {
    /// # Panics
    ///
    /// If this is not an array or `index >= len`.
    #[track_caller]
    fn sub_assign(&mut self, index: usize) {
        fatal(self.remove_at(index));
    }
}

impl SubAssign<&str> for Value {
    /// # Panics
    ///
    /// If this is not an object.
    #[track_caller]
    fn sub_assign(&mut self, key: &str) {
        fatal(self.remove_key(key));
    }
}

impl SubAssign<String> for Value {
    #[track_caller]
    fn sub_assign(&mut self, key: String) {
        *self -= key.as_str();
    }
}
