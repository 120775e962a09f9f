use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

/// A recipe record as served by the search API.
///
/// Only `id` is required. Display fields with an unexpected JSON type are
/// coerced where a reading is obvious and dropped otherwise, never failing
/// the record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_title")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cuisine: Option<String>,
    /// 0 to 5, fractional
    #[serde(default, deserialize_with = "lenient_number")]
    pub rating: Option<f64>,
    /// Minutes
    #[serde(default, deserialize_with = "lenient_whole")]
    pub prep_time: Option<i64>,
    /// Minutes
    #[serde(default, deserialize_with = "lenient_whole")]
    pub cook_time: Option<i64>,
    /// Minutes
    #[serde(default, deserialize_with = "lenient_whole")]
    pub total_time: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub serves: Option<String>,
    /// Calories precomputed by the server from the nutrients payload
    #[serde(default, deserialize_with = "lenient_whole")]
    pub calories_int: Option<i64>,
    #[serde(default)]
    pub nutrients: NutrientsPayload,
}

/// Number as a person would write it: `200.0` shows as `200`
pub(crate) fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(number_text(&n)),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_title<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite()))
}

fn lenient_whole<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(lenient_number(deserializer)?.map(|f| f.round() as i64))
}

/// The nutrients field arrives either as a JSON-encoded string, an object, or not at all
#[derive(Debug, Clone, Default, PartialEq)]
pub enum NutrientsPayload {
    Unparsed(String),
    Structured(Map<String, Value>),
    #[default]
    Absent,
}

impl NutrientsPayload {
    /// Resolve to a nutrient map. A string that is not a JSON object counts as absent.
    pub fn resolve(&self) -> Option<Map<String, Value>> {
        match self {
            NutrientsPayload::Unparsed(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(Value::Object(map)) => Some(map),
                _ => None,
            },
            NutrientsPayload::Structured(map) => Some(map.clone()),
            NutrientsPayload::Absent => None,
        }
    }
}

impl From<Value> for NutrientsPayload {
    fn from(value: Value) -> Self {
        match value {
            Value::String(raw) => NutrientsPayload::Unparsed(raw),
            Value::Object(map) => NutrientsPayload::Structured(map),
            _ => NutrientsPayload::Absent,
        }
    }
}

impl<'de> Deserialize<'de> for NutrientsPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.map(NutrientsPayload::from).unwrap_or_default())
    }
}

impl Serialize for NutrientsPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NutrientsPayload::Unparsed(raw) => serializer.serialize_str(raw),
            NutrientsPayload::Structured(map) => map.serialize(serializer),
            NutrientsPayload::Absent => serializer.serialize_none(),
        }
    }
}

/// One page of search results
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope {
    pub content: Vec<Recipe>,
    pub total_elements: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
    /// Zero-based page number as reported by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
}

impl PageEnvelope {
    /// Envelope used when a successful response carries no body
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an envelope from any JSON value without rejecting odd shapes.
    ///
    /// Only records that are not objects or lack an integer `id` are
    /// skipped. A missing or negative total becomes 0.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::empty();
        };

        let content = match fields.remove("content") {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| serde_json::from_value::<Recipe>(item).ok())
                .collect(),
            _ => Vec::new(),
        };

        let total_elements = fields
            .get("totalElements")
            .and_then(Value::as_u64)
            .unwrap_or(0);

        PageEnvelope {
            content,
            total_elements,
            total_pages: fields.get("totalPages").and_then(Value::as_u64),
            number: fields.get("number").and_then(Value::as_u64),
        }
    }
}
