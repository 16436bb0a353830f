//! `deserialize_with` adapters for string-keyed maps
//!
//! Every keyed section of a site or study document rejects repeated keys
//! instead of letting the last entry win. Sections where declaration order
//! matters (`SystemSettings`, `ExportInfo`) land in an [`IndexMap`] and also
//! accept a list of single-entry mappings:
//!
//! ```yaml
//! ExportInfo:
//!   - T1:  {Pattern: 'T1', Count: 1}
//!   - DTI: {Pattern: 'DTI', Count: 2}
//! ```

use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

/// Deserialize an insertion-ordered map from a mapping or a list of
/// single-entry mappings. A null value yields an empty map.
pub fn ordered<'de, D, V>(deserializer: D) -> Result<IndexMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    deserializer.deserialize_any(KeyedVisitor::new(true))
}

/// Deserialize a sorted map from a mapping with unique keys.
pub fn unique<'de, D, V>(deserializer: D) -> Result<BTreeMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    deserializer.deserialize_any(KeyedVisitor::new(false))
}

/// [`unique`] for an optional section; null or absent is `None`.
pub fn unique_optional<'de, D, V>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, V>>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct Unique<V>(BTreeMap<String, V>);

    impl<'de, V: Deserialize<'de>> Deserialize<'de> for Unique<V> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            unique(deserializer).map(Unique)
        }
    }

    Ok(Option::<Unique<V>>::deserialize(deserializer)?.map(|map| map.0))
}

trait KeyedMap<V>: Default {
    fn has(&self, key: &str) -> bool;
    fn put(&mut self, key: String, value: V);
}

impl<V> KeyedMap<V> for IndexMap<String, V> {
    fn has(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn put(&mut self, key: String, value: V) {
        self.insert(key, value);
    }
}

impl<V> KeyedMap<V> for BTreeMap<String, V> {
    fn has(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn put(&mut self, key: String, value: V) {
        self.insert(key, value);
    }
}

struct KeyedVisitor<M, V> {
    list_form: bool,
    marker: PhantomData<(M, V)>,
}

impl<M, V> KeyedVisitor<M, V> {
    fn new(list_form: bool) -> Self {
        Self {
            list_form,
            marker: PhantomData,
        }
    }

    fn push<E: de::Error>(map: &mut M, key: String, value: V) -> Result<(), E>
    where
        M: KeyedMap<V>,
    {
        if map.has(&key) {
            return Err(E::custom(format!("duplicate key '{key}'")));
        }
        map.put(key, value);
        Ok(())
    }
}

impl<'de, M, V> Visitor<'de> for KeyedVisitor<M, V>
where
    M: KeyedMap<V>,
    V: Deserialize<'de>,
{
    type Value = M;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        if self.list_form {
            formatter.write_str("a mapping or a list of single-entry mappings")
        } else {
            formatter.write_str("a mapping")
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(M::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(M::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = M::default();
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            Self::push(&mut map, key, value)?;
        }
        Ok(map)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        if !self.list_form {
            return Err(de::Error::invalid_type(de::Unexpected::Seq, &self));
        }
        let mut map = M::default();
        while let Some(item) = access.next_element::<SingleEntry<V>>()? {
            Self::push(&mut map, item.key, item.value)?;
        }
        Ok(map)
    }
}

/// One `- key: value` list item.
struct SingleEntry<V> {
    key: String,
    value: V,
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for SingleEntry<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntryVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntryVisitor<V> {
            type Value = SingleEntry<V>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a mapping with exactly one entry")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let (key, value) = access
                    .next_entry::<String, V>()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                if access.next_key::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(2, &self));
                }
                Ok(SingleEntry { key, value })
            }
        }

        deserializer.deserialize_map(EntryVisitor(PhantomData))
    }
}
