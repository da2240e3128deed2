//! Header-keyed rows.
//!
//! This module provides [`Row`], a wrapper around [`IndexMap`] mapping column
//! names to [`Field`]s. Insertion order is kept so that a row decoded from text
//! iterates in column order, and so that writing rows back out discovers column
//! names in the order they were first seen.
//!
//! ## Examples
//!
//! ```rust
//! use csv_transcode::{Field, Row};
//!
//! let mut row = Row::new();
//! row.insert("name".to_string(), Field::from("Joe"));
//! row.insert("age".to_string(), Field::from("10"));
//!
//! let keys: Vec<_> = row.keys().cloned().collect();
//! assert_eq!(keys, vec!["name", "age"]);
//! ```

use crate::Field;
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// An ordered map of column names to field values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row(IndexMap<String, Field>);

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Row(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Row(IndexMap::with_capacity(capacity))
    }

    /// Inserts a column value.
    ///
    /// If the row already held this column, the value is replaced in place
    /// (the column keeps its original position) and the old value is returned.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<Field>
    where
        K: Into<String>,
        V: Into<Field>,
    {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Field> {
        self.0.get_mut(key)
    }

    /// Removes a column, shifting later columns down to keep their relative order.
    pub fn remove(&mut self, key: &str) -> Option<Field> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the column names, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Field> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Field> {
        self.0.values()
    }

    /// Returns an iterator over the name/value pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Field> {
        self.0.iter()
    }
}

impl From<HashMap<String, Field>> for Row {
    fn from(map: HashMap<String, Field>) -> Self {
        Row(map.into_iter().collect())
    }
}

impl From<Row> for HashMap<String, Field> {
    fn from(row: Row) -> Self {
        row.0.into_iter().collect()
    }
}

impl IntoIterator for Row {
    type Item = (String, Field);
    type IntoIter = indexmap::map::IntoIter<String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = (&'a String, &'a Field);
    type IntoIter = indexmap::map::Iter<'a, String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Field)> for Row {
    fn from_iter<T: IntoIterator<Item = (String, Field)>>(iter: T) -> Self {
        Row(IndexMap::from_iter(iter))
    }
}

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{MapAccess, Visitor};

        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of column names to fields")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut row = Row::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Field>()? {
                    row.insert(key, value);
                }
                Ok(row)
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}
