use std::{borrow::Borrow, collections::BTreeMap, fmt::Debug};

use crate::{LookupError, Result};

/// Capability set of a keyed, ordered container: size, key iteration,
/// membership and retrieval.
///
/// Mutation is optional. The provided `try_set` and `try_delete` fail with
/// [`LookupError::UnsupportedOperation`], mutable containers override them.
///
/// `contains` and `get` require `Ord` query keys. A lookup over partially
/// ordered keys, e.g. one built by `SortedLookup::try_build` from `f64`, still
/// implements this trait but must be queried through its inherent methods.
///
/// # Example
/// ```rust
/// use std::collections::BTreeMap;
/// use sorted_lookup::{Lookup, SortedLookup};
///
/// fn describe<L: Lookup<K = &'static str, V = i32>>(l: &L) -> Vec<String> {
///     l.iter().map(|(k, v)| format!("{k}={v}")).collect()
/// }
///
/// let map = BTreeMap::from([("b", 2), ("a", 1)]);
/// let lookup = SortedLookup::from(map.clone());
///
/// assert_eq!(describe(&map), describe(&lookup));
/// ```
pub trait Lookup {
    type K;
    type V;

    /// Returns item count
    fn len(&self) -> usize;

    /// Returns true if there is no item
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns all pairs in ascending key order
    fn iter(&self) -> impl Iterator<Item = (&Self::K, &Self::V)>;

    /// Returns all keys in ascending order
    fn keys(&self) -> impl Iterator<Item = &Self::K> {
        self.iter().map(|(k, _)| k)
    }

    fn contains<Q>(&self, key: &Q) -> bool
    where
        Self::K: Borrow<Q>,
        Q: ?Sized + Ord + Debug;

    /// Returns the value for `key`, or [`LookupError::KeyNotFound`]
    fn get<Q>(&self, key: &Q) -> Result<&Self::V>
    where
        Self::K: Borrow<Q>,
        Q: ?Sized + Ord + Debug;

    /// Insert or replace the value for `key`
    fn try_set(&mut self, _key: Self::K, _value: Self::V) -> Result<Option<Self::V>> {
        Err(LookupError::unsupported("item assignment"))
    }

    /// Remove `key` and return its value if it was present
    fn try_delete<Q>(&mut self, _key: &Q) -> Result<Option<Self::V>>
    where
        Self::K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Err(LookupError::unsupported("item deletion"))
    }
}

impl<K: Ord, V> Lookup for BTreeMap<K, V> {
    type K = K;
    type V = V;

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        BTreeMap::iter(self)
    }

    fn keys(&self) -> impl Iterator<Item = &K> {
        BTreeMap::keys(self)
    }

    fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord + Debug,
    {
        self.contains_key(key)
    }

    fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord + Debug,
    {
        BTreeMap::get(self, key).ok_or_else(|| LookupError::key_not_found(key))
    }

    fn try_set(&mut self, key: K, value: V) -> Result<Option<V>> {
        Ok(self.insert(key, value))
    }

    fn try_delete<Q>(&mut self, key: &Q) -> Result<Option<V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Ok(self.remove(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_btree_map_is_mutable_lookup() {
        let mut map = BTreeMap::new();
        assert!(Lookup::is_empty(&map));

        assert_eq!(map.try_set("a", 1), Ok(None));
        assert_eq!(map.try_set("a", 2), Ok(Some(1)));
        assert_eq!(Lookup::get(&map, "a"), Ok(&2));
        assert!(Lookup::contains(&map, "a"));

        assert_eq!(map.try_delete("a"), Ok(Some(2)));
        assert_eq!(
            Lookup::get(&map, "a"),
            Err(LookupError::KeyNotFound {
                key: "\"a\"".to_string()
            })
        );
    }

    #[test]
    fn test_lookup_keys_default() {
        let map = BTreeMap::from([(3, 'c'), (1, 'a'), (2, 'b')]);
        let keys = Lookup::keys(&map).copied().collect::<Vec<_>>();
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn test_partially_ordered_lookup() {
        let lookup = crate::SortedLookup::try_build([(0.5, "half"), (0.25, "quarter")]).unwrap();

        // the trait methods without an `Ord` bound still work
        assert_eq!(Lookup::len(&lookup), 2);
        assert_eq!(
            Lookup::keys(&lookup).copied().collect::<Vec<_>>(),
            vec![0.25, 0.5]
        );

        // partially ordered keys are queried through the inherent methods
        assert!(lookup.contains(&0.5));
        assert_eq!(lookup.get(&0.25), Ok(&"quarter"));
    }
}
