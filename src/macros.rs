//! The [`jsonode!`](crate::jsonode) macro for building trees inline.

/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Object keys must be string literals. Any other token tree is converted
/// with [`to_value`](crate::to_value), falling back to `null` when that fails.
///
/// ```rust
/// use jsonode::{jsonode, stringify};
///
/// let name = "Bob";
/// let doc = jsonode!({
///     "name": name,
///     "ids": [1, 2],
///     "admin": false,
///     "manager": null
/// });
///
/// assert_eq!(
///     stringify(&doc),
///     r#"{"name":"Bob","ids":[1.000000,2.000000],"admin":false,"manager":null}"#
/// );
/// ```
#[macro_export]
macro_rules! jsonode {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elems:tt)+ ]) => {{
        let mut array = Vec::new();
        $crate::jsonode!(@array array $($elems)+);
        $crate::Value::Array(array)
    }};

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    // Members keep the order they are written in
    ({ $($members:tt)+ }) => {{
        let mut object = $crate::Map::new();
        $crate::jsonode!(@object object $($members)+);
        $crate::Value::Object(object)
    }};

    (@array $array:ident) => {};

    // A leading minus is its own token tree
    (@array $array:ident - $elem:tt $(, $($rest:tt)*)?) => {
        $array.push($crate::jsonode!(- $elem));
        $crate::jsonode!(@array $array $($($rest)*)?);
    };

    (@array $array:ident $elem:tt $(, $($rest:tt)*)?) => {
        $array.push($crate::jsonode!($elem));
        $crate::jsonode!(@array $array $($($rest)*)?);
    };

    (@object $object:ident) => {};

    (@object $object:ident $key:literal : - $value:tt $(, $($rest:tt)*)?) => {
        $object.insert($key.to_string(), $crate::jsonode!(- $value));
        $crate::jsonode!(@object $object $($($rest)*)?);
    };

    (@object $object:ident $key:literal : $value:tt $(, $($rest:tt)*)?) => {
        $object.insert($key.to_string(), $crate::jsonode!($value));
        $crate::jsonode!(@object $object $($($rest)*)?);
    };

    ($s:expr) => {
        $crate::to_value(&$s).unwrap_or($crate::Value::Null)
    };
}
