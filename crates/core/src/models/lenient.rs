//! Lenient deserializers for backend fields whose JSON type drifts between endpoints

use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum IdValue {
    String(String),
    Number(i64),
}

/// Deserialize an optional ID that can be either string or number; empty strings become `None`
pub(crate) fn id_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<IdValue>::deserialize(deserializer)?.and_then(|v| match v {
        IdValue::String(s) if s.is_empty() => None,
        IdValue::String(s) => Some(s),
        IdValue::Number(n) => Some(n.to_string()),
    }))
}

struct U32Lenient;

impl<'de> de::Visitor<'de> for U32Lenient {
    type Value = Option<u32>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a non-negative number, numeric string, or null")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        u32::try_from(v).map(Some).map_err(de::Error::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u32::try_from(v).map(Some).map_err(de::Error::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if v.is_finite() && v >= 0.0 && v <= f64::from(u32::MAX) {
            Ok(Some(v.round() as u32))
        } else {
            Err(de::Error::custom(format!("{v} is out of range")))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let v = v.trim();
        if v.is_empty() {
            return Ok(None);
        }
        v.parse::<u32>().map(Some).map_err(de::Error::custom)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }
}

/// Deserialize a u32 that may arrive as a number, string, or null (null becomes 0)
pub(crate) fn u32_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserializer.deserialize_any(U32Lenient)?.unwrap_or(0))
}

/// Deserialize an optional u32 that may arrive as a number, string, or null
pub(crate) fn u32_option<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(U32Lenient)
}

/// Deserialize an f64 that may arrive as a number, string, or null
pub(crate) fn f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct F64Lenient;

    impl<'de> de::Visitor<'de> for F64Lenient {
        type Value = f64;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a number, string, or null")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            v.trim().parse::<f64>().map_err(de::Error::custom)
        }

        fn visit_none<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }

        fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }
    }

    deserializer.deserialize_any(F64Lenient)
}

/// Deserialize a list that the backend may send as `null`
pub(crate) fn vec_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Record id sent as `id`, Mongo-style `_id`, or both. Flattened into wire structs.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RecordId {
    #[serde(default, deserialize_with = "id_option")]
    id: Option<String>,
    #[serde(rename = "_id", default, deserialize_with = "id_option")]
    mongo_id: Option<String>,
}

impl RecordId {
    /// `id` wins when both are present; a missing id becomes empty
    pub(crate) fn resolve(self) -> String {
        self.id.or(self.mongo_id).unwrap_or_default()
    }
}

/// Pick the current spelling of a required field, falling back to its legacy spelling
pub(crate) fn required<T>(
    field: &'static str,
    current: Option<T>,
    legacy: Option<T>,
) -> Result<T, String> {
    current
        .or(legacy)
        .ok_or_else(|| format!("missing field `{field}`"))
}
