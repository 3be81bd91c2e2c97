use std::fmt::Formatter;
use std::marker::PhantomData;

use ::serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use ::serde::ser::{Serialize, SerializeMap, Serializer};

use crate::BstMap;

impl<K, V> Serialize for BstMap<K, V>
where
    K: Ord + Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// Rebuilds a map by putting each entry in the order it was serialized.
struct MapVisitor<K, V> {
    marker: PhantomData<fn() -> BstMap<K, V>>,
}

impl<'de, K, V> Visitor<'de> for MapVisitor<K, V>
where
    K: Ord + Deserialize<'de>,
    V: Deserialize<'de>,
{
    type Value = BstMap<K, V>;

    fn expecting(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str("bst_map::BstMap")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = BstMap::new();
        while let Some((k, v)) = access.next_entry()? {
            map.put(k, v);
        }
        Ok(map)
    }
}

impl<'de, K, V> Deserialize<'de> for BstMap<K, V>
where
    K: Ord + Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MapVisitor {
            marker: PhantomData,
        })
    }
}
