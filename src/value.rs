use std::collections::HashMap;

/// A runtime value produced by evaluating a binding expression.
///
/// The literal grammar covers exactly these four shapes: the reserved word
/// `null`, the booleans, decimal/scientific numbers, and quoted strings.
/// Arrays and objects are not expressible in the expression language and so
/// have no variant here; they stay on the [`serde_json::Value`] side of the
/// interop boundary.
///
/// # Examples
///
/// ```
/// use tether_lang::Value;
///
/// let null = Value::Null;
/// let flag = Value::Boolean(true);
/// let number = Value::Number(3.14);
/// let string = Value::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(string.is_string());
/// assert_eq!(number.as_number(), Some(3.14));
/// assert_eq!(flag.as_bool(), Some(true));
/// assert_eq!(string.as_str(), Some("hello"));
/// assert_eq!(number.as_str(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The `null` constant
    Null,

    /// `true` or `false`
    Boolean(bool),

    /// Numeric literal (always floating point; the expression language
    /// has JavaScript-style number semantics)
    Number(f64),

    /// UTF-8 string
    String(String),
}

/// The runtime key-value object a compiled expression is evaluated against.
///
/// The current literal-only grammar never reads it, but every compiled
/// expression takes one so the calling convention is stable once identifier
/// resolution lands.
pub type Scope = HashMap<String, Value>;

impl Value {
    /// Check if the value is the `null` constant
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if the value is a string
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Get as boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as float
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as borrowed string content
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convert to a [`serde_json::Value`].
    ///
    /// Non-finite numbers have no JSON representation and become `null`,
    /// matching what `JSON.stringify` does for `NaN` and the infinities.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
        }
    }

    /// Convert from a scalar [`serde_json::Value`].
    ///
    /// Returns `None` for arrays and objects, which the expression language
    /// cannot represent.
    pub fn from_json(json: &serde_json::Value) -> Option<Value> {
        match json {
            serde_json::Value::Null => Some(Value::Null),
            serde_json::Value::Bool(b) => Some(Value::Boolean(*b)),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number),
            serde_json::Value::String(s) => Some(Value::String(s.clone())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }
}

/// Build a [`Scope`] from a JSON object whose values are all scalars.
///
/// Returns `None` if `json` is not an object or any of its values has no
/// [`Value`] representation.
pub fn scope_from_json(json: &serde_json::Value) -> Option<Scope> {
    let object = json.as_object()?;
    let mut scope = Scope::new();
    for (key, value) in object {
        scope.insert(key.clone(), Value::from_json(value)?);
    }
    Some(scope)
}

#[test]
fn test_json_round_trip() {
    let values = vec![
        Value::Null,
        Value::Boolean(false),
        Value::Number(42.0),
        Value::String("it's".to_string()),
    ];

    for value in values {
        assert_eq!(Value::from_json(&value.to_json()), Some(value));
    }
}

#[test]
fn test_from_json_rejects_collections() {
    assert_eq!(Value::from_json(&serde_json::json!([1, 2])), None);
    assert_eq!(Value::from_json(&serde_json::json!({"a": 1})), None);
}
