use serde_json::Value;

/// A named value array, aligned 1:1 with a [`crate::TimeAxis`].
///
/// Values that are absent or not numeric are kept as `None` so they line up with their
/// timestamp; they are never dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSeries {
    name: String,
    values: Vec<Option<f64>>,
}

impl VariableSeries {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values: values
                .into_iter()
                .map(|v| v.filter(|x| x.is_finite()))
                .collect(),
        }
    }

    /// Builds a series from plain floats, NaN marking a missing reading.
    pub fn from_f64(name: impl Into<String>, values: &[f64]) -> Self {
        Self::new(name, values.iter().copied().map(Some).collect())
    }

    /// Builds a series from raw JSON values, coercing each to a number.
    ///
    /// Numbers and numeric strings are kept; `null`, booleans, unparsable strings and
    /// nested values become missing.
    pub fn from_json(name: impl Into<String>, values: &[Value]) -> Self {
        Self::new(name, values.iter().map(coerce_numeric).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn into_parts(self) -> (String, Vec<Option<f64>>) {
        (self.name, self.values)
    }
}

fn coerce_numeric(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}
