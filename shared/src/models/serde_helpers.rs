//! Common serde helpers for the backend's loosely typed JSON
//!
//! The backend mixes numeric and string identifiers, sends `null` for empty
//! child lists and uses `{}` for "no selection".

use serde::de::{self, DeserializeOwned, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Deserialize any defaultable value, treating null as the default
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

struct FlexibleIdVisitor;

impl<'de> Visitor<'de> for FlexibleIdVisitor {
    type Value = String;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or integer id")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }
}

/// Id that may arrive as a JSON string or number, always kept as a string
pub mod flexible_id {
    use super::*;

    pub fn serialize<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        deserializer.deserialize_any(FlexibleIdVisitor)
    }
}

/// Optional variant of [`flexible_id`]; null maps to `None`
pub mod option_flexible_id {
    use super::*;

    struct OptionVisitor;

    impl<'de> Visitor<'de> for OptionVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("null, a string or integer id")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(FlexibleIdVisitor).map(Some)
        }
    }

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_some(v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        deserializer.deserialize_option(OptionVisitor)
    }
}

/// Free-form numeric text (gsm, width, price); numbers become text, null becomes ""
pub mod flexible_text {
    use super::*;

    pub fn serialize<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        option_flexible_id::deserialize(deserializer).map(Option::unwrap_or_default)
    }
}

/// `Option<T>` whose `None` is written as `{}`; `{}` and null read back as `None`
pub mod empty_object {
    use super::*;

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(v) => v.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        match Option::<serde_json::Value>::deserialize(deserializer)? {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::Object(map)) if map.is_empty() => Ok(None),
            Some(v) => serde_json::from_value(v).map(Some).map_err(de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    struct Probe {
        #[serde(with = "flexible_id")]
        id: String,
        #[serde(default, with = "option_flexible_id")]
        parent: Option<String>,
        #[serde(default, deserialize_with = "null_as_default")]
        tags: Vec<String>,
        #[serde(default, with = "flexible_text")]
        width: String,
    }

    #[test]
    fn test_numeric_and_string_ids() {
        let p: Probe = serde_json::from_str(r#"{"id":42,"parent":"7","tags":null}"#).unwrap();
        assert_eq!(p.id, "42");
        assert_eq!(p.parent.as_deref(), Some("7"));
        assert!(p.tags.is_empty());

        let p: Probe = serde_json::from_str(r#"{"id":"abc","parent":null}"#).unwrap();
        assert_eq!(p.id, "abc");
        assert_eq!(p.parent, None);

        let p: Probe = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        assert_eq!(p.parent, None);
        assert_eq!(p.width, "");
    }

    #[test]
    fn test_flexible_text() {
        let p: Probe = serde_json::from_str(r#"{"id":1,"width":58.5}"#).unwrap();
        assert_eq!(p.width, "58.5");
        let p: Probe = serde_json::from_str(r#"{"id":1,"width":null}"#).unwrap();
        assert_eq!(p.width, "");
        let p: Probe = serde_json::from_str(r#"{"id":1,"width":"60"}"#).unwrap();
        assert_eq!(p.width, "60");
    }
}
