//! Serde deserializer over the items of one section
//!
//! Values in INI are untyped text, so scalar targets are converted on demand
//! with the same rules as the typed getters. Sequences are read from values
//! separated by newlines or commas.

use crate::coerce::{parse_bool, parse_float, parse_integer};
use crate::error::IniError;
use crate::store::SectionItems;
use serde::de::{self, DeserializeSeed, IntoDeserializer, Visitor};

/// Deserializes a section as a map from option name to value
pub struct SectionDeserializer {
    items: SectionItems,
}

impl SectionDeserializer {
    /// Creates a deserializer over already resolved items
    pub fn new(items: SectionItems) -> Self {
        Self { items }
    }
}

impl<'de> de::Deserializer<'de> for SectionDeserializer {
    type Error = IniError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_map(SectionMapAccess::new(self.items))
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

/// Map access over section entries
struct SectionMapAccess {
    entries: indexmap::map::IntoIter<String, Option<String>>,
    current_value: Option<Option<String>>,
}

impl SectionMapAccess {
    fn new(items: SectionItems) -> Self {
        Self {
            entries: items.into_iter(),
            current_value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for SectionMapAccess {
    type Error = IniError;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Self::Error>
    where
        K: DeserializeSeed<'de>,
    {
        match self.entries.next() {
            Some((key, value)) => {
                self.current_value = Some(value);
                seed.deserialize(ValueDeserializer::new(Some(key))).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, Self::Error>
    where
        V: DeserializeSeed<'de>,
    {
        match self.current_value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(IniError::Custom(
                "No value available for map entry".to_string(),
            )),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

/// Sequence access over list items split out of one value
struct ValueSeqAccess {
    values: std::vec::IntoIter<String>,
}

impl<'de> de::SeqAccess<'de> for ValueSeqAccess {
    type Error = IniError;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>, Self::Error>
    where
        T: DeserializeSeed<'de>,
    {
        match self.values.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(Some(value))).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.values.len())
    }
}

/// Deserializer for a single option value; `None` is a key without value
struct ValueDeserializer {
    value: Option<String>,
}

impl ValueDeserializer {
    fn new(value: Option<String>) -> Self {
        Self { value }
    }

    fn text(self) -> String {
        self.value.unwrap_or_default()
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = IniError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Some(s) => visitor.visit_string(s),
            None => visitor.visit_unit(),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_bool(parse_bool(&self.text())?)
    }

    fn deserialize_i8<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i16<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i32<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i64<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_i64(parse_integer(&self.text())?)
    }

    fn deserialize_u8<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_u64(visitor)
    }

    fn deserialize_u16<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_u64(visitor)
    }

    fn deserialize_u32<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_u64(visitor)
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_u64(parse_integer(&self.text())?)
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_f64(visitor)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_f64(parse_float(&self.text())?)
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_string(self.text())
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_string(self.text())
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Some(_) => visitor.visit_some(self),
            None => visitor.visit_none(),
        }
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        let values: Vec<String> = self
            .text()
            .split(['\n', ','])
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();
        visitor.visit_seq(ValueSeqAccess {
            values: values.into_iter(),
        })
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        let variant: de::value::StringDeserializer<IniError> =
            self.text().trim().to_string().into_deserializer();
        visitor.visit_enum(variant)
    }

    serde::forward_to_deserialize_any! {
        i128 u128 char bytes byte_buf unit unit_struct tuple
        tuple_struct map struct identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde::Deserialize;
    use std::collections::HashMap;

    fn items(entries: &[(&str, Option<&str>)]) -> SectionItems {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
            .collect()
    }

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "lowercase")]
    enum Level {
        Debug,
        Info,
    }

    #[derive(Debug, Deserialize)]
    struct Server {
        host: String,
        port: u16,
        ratio: f32,
        enabled: bool,
        level: Level,
        tags: Vec<String>,
        backup: Option<String>,
        flag: Option<String>,
    }

    #[test]
    fn test_deserialize_struct() {
        let section = items(&[
            ("host", Some("localhost")),
            ("port", Some("8080")),
            ("ratio", Some("0.5")),
            ("enabled", Some("yes")),
            ("level", Some("info")),
            ("tags", Some("a, b\nc")),
            ("flag", None),
        ]);

        let server = Server::deserialize(SectionDeserializer::new(section)).unwrap();
        assert_eq!(server.host, "localhost");
        assert_eq!(server.port, 8080);
        assert_eq!(server.ratio, 0.5);
        assert!(server.enabled);
        assert_eq!(server.level, Level::Info);
        assert_eq!(server.tags, vec!["a", "b", "c"]);
        assert_eq!(server.backup, None);
        assert_eq!(server.flag, None);
    }

    #[test]
    fn test_deserialize_into_map() {
        let section = items(&[("a", Some("1")), ("b", None)]);
        let map: HashMap<String, Option<String>> =
            HashMap::deserialize(SectionDeserializer::new(section)).unwrap();
        assert_eq!(map["a"].as_deref(), Some("1"));
        assert_eq!(map["b"], None);
    }

    #[test]
    fn test_conversion_error_surfaces() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Port {
            port: u16,
        }

        let section = items(&[("port", Some("eighty"))]);
        let err = Port::deserialize(SectionDeserializer::new(section)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueConversionError);
    }

    #[test]
    fn test_out_of_range_integer() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Small {
            level: u8,
        }

        let section = items(&[("level", Some("300"))]);
        assert!(Small::deserialize(SectionDeserializer::new(section)).is_err());
    }

    #[test]
    fn test_missing_field() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Needs {
            name: String,
        }

        let err = Needs::deserialize(SectionDeserializer::new(SectionItems::new())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Custom);
        assert!(err.to_string().contains("name"));
    }
}
