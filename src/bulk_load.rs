use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

use crate::{
    key_search::{BinarySearch, KeySearcher},
    Lookup, LookupError, Result, SortedLookup,
};

impl<K: Ord, V> SortedLookup<K, V> {
    /// Build a lookup from unordered `(key, value)` pairs.
    ///
    /// Pairs are sorted by key with a stable sort, so duplicated keys keep
    /// their relative order and the first one is the one queries find.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_lookup::SortedLookup;
    ///
    /// let lookup = SortedLookup::build(vec![(3, "c"), (1, "a"), (2, "b")]);
    ///
    /// assert_eq!(lookup.len(), 3);
    /// assert_eq!(lookup.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// ```
    pub fn build(source: impl IntoIterator<Item = (K, V)>) -> Self {
        Self::build_with_searcher(source, BinarySearch)
    }

    /// Build a lookup with the content of another map.
    pub fn from_lookup<L>(source: &L) -> Self
    where
        L: Lookup<K = K, V = V>,
        K: Clone,
        V: Clone,
    {
        Self::build(source.iter().map(|(k, v)| (k.clone(), v.clone())))
    }
}

impl<K: PartialOrd, V> SortedLookup<K, V> {
    /// Build a lookup from pairs whose keys are only partially ordered, e.g. `f64`.
    ///
    /// Fails with [`LookupError::Construction`] if any two keys can not be
    /// compared, which includes a key not comparable with itself like `NaN`.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_lookup::SortedLookup;
    ///
    /// let lookup = SortedLookup::try_build([(2.5, "b"), (0.5, "a")]).unwrap();
    /// assert_eq!(lookup.get(&0.5), Ok(&"a"));
    ///
    /// assert!(SortedLookup::try_build([(f64::NAN, "nan"), (1.0, "one")]).is_err());
    /// ```
    pub fn try_build(source: impl IntoIterator<Item = (K, V)>) -> Result<Self> {
        Self::try_build_with_searcher(source, BinarySearch)
    }
}

impl<K: Ord, V, S: KeySearcher> SortedLookup<K, V, S> {
    /// Same as [`SortedLookup::build`], keys are located with `searcher`.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_lookup::{key_search::LinearSearch, SortedLookup};
    ///
    /// let lookup = SortedLookup::build_with_searcher([(2, 'b'), (1, 'a')], LinearSearch);
    ///
    /// assert_eq!(lookup.get(&2), Ok(&'b'));
    /// ```
    pub fn build_with_searcher(source: impl IntoIterator<Item = (K, V)>, searcher: S) -> Self {
        let mut pairs = source.into_iter().collect::<Vec<_>>();
        // stable, duplicates keep their order
        pairs.sort_by(|a, b| a.0.cmp(&b.0));

        Self::from_sorted_pairs(pairs, searcher)
    }
}

impl<K: PartialOrd, V, S: KeySearcher> SortedLookup<K, V, S> {
    /// Same as [`SortedLookup::try_build`], keys are located with `searcher`.
    pub fn try_build_with_searcher(
        source: impl IntoIterator<Item = (K, V)>,
        searcher: S,
    ) -> Result<Self> {
        let pairs = source.into_iter().collect::<Vec<_>>();

        if let Some(idx) = pairs.iter().position(|(k, _)| k.partial_cmp(k).is_none()) {
            log::debug!("rejecting lookup source, key at {idx} is not comparable with itself");
            return Err(LookupError::Construction {
                reason: format!("key at position {idx} is not comparable with itself"),
            });
        }

        let Some(pairs) = merge_sort(pairs) else {
            log::debug!("rejecting lookup source, keys are not mutually comparable");
            return Err(LookupError::Construction {
                reason: "keys are not mutually comparable".to_string(),
            });
        };

        // merge sort only compares some of the pairs, neighbours must all be ordered
        if let Some(idx) = pairs.windows(2).position(|w| {
            !matches!(
                w[0].0.partial_cmp(&w[1].0),
                Some(Ordering::Less | Ordering::Equal)
            )
        }) {
            log::debug!(
                "rejecting lookup source, keys at {idx} and {} are out of order",
                idx + 1
            );
            return Err(LookupError::Construction {
                reason: "keys do not form a total order".to_string(),
            });
        }

        Ok(Self::from_sorted_pairs(pairs, searcher))
    }
}

impl<K: PartialOrd, V, S: KeySearcher> SortedLookup<K, V, S> {
    /// Split sorted pairs into the parallel key and value vecs.
    fn from_sorted_pairs(pairs: Vec<(K, V)>, searcher: S) -> Self {
        let (keys, values): (Vec<K>, Vec<V>) = pairs.into_iter().unzip();

        log::debug!(
            "built lookup with {} entries, searcher {}",
            keys.len(),
            S::NAME
        );
        if log::log_enabled!(log::Level::Trace) {
            let duplicates = keys.windows(2).filter(|w| w[0] == w[1]).count();
            if duplicates > 0 {
                log::trace!(
                    "lookup keeps {duplicates} duplicated keys, only the first of each is reachable"
                );
            }
        }

        Self::from_sorted_parts(keys, values, searcher)
    }
}

/// Stable merge sort which gives up on the first incomparable pair.
fn merge_sort<K: PartialOrd, V>(mut pairs: Vec<(K, V)>) -> Option<Vec<(K, V)>> {
    if pairs.len() <= 1 {
        return Some(pairs);
    }

    let right = pairs.split_off(pairs.len() / 2);
    let left = merge_sort(pairs)?;
    let right = merge_sort(right)?;

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        // ties go left to keep the sort stable
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => r.0.partial_cmp(&l.0)? == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };

        merged.extend(if take_right { right.next() } else { left.next() });
    }

    Some(merged)
}

impl<K: Ord, V> From<BTreeMap<K, V>> for SortedLookup<K, V> {
    /// `BTreeMap` is already sorted, so no sort is needed
    fn from(map: BTreeMap<K, V>) -> Self {
        let (keys, values): (Vec<K>, Vec<V>) = map.into_iter().unzip();
        log::debug!("built lookup with {} entries from a BTreeMap", keys.len());
        Self::from_sorted_parts(keys, values, BinarySearch)
    }
}

impl<K: Ord, V, H: BuildHasher> From<HashMap<K, V, H>> for SortedLookup<K, V> {
    fn from(map: HashMap<K, V, H>) -> Self {
        Self::build(map)
    }
}

impl<K: Ord, V> From<Vec<(K, V)>> for SortedLookup<K, V> {
    fn from(pairs: Vec<(K, V)>) -> Self {
        Self::build(pairs)
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for SortedLookup<K, V> {
    /// # Examples
    /// ```rust
    /// use sorted_lookup::SortedLookup;
    ///
    /// let lookup = SortedLookup::from([("b", 2), ("a", 1)]);
    /// assert_eq!(lookup["a"], 1);
    /// ```
    fn from(pairs: [(K, V); N]) -> Self {
        Self::build(pairs)
    }
}

impl<K: Ord, V, S: KeySearcher + Default> FromIterator<(K, V)> for SortedLookup<K, V, S> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::build_with_searcher(iter, S::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::seq::SliceRandom;

    use super::*;
    use crate::key_search::LinearSearch;

    #[test]
    fn test_bulk_load() {
        let data = (0..400).map(|i| (i, i * 2)).collect::<Vec<_>>();
        let mut shuffled = data.clone();
        shuffled.shuffle(&mut rand::thread_rng());

        let loaded = SortedLookup::build(shuffled);
        let from_map = SortedLookup::from(data.iter().copied().collect::<BTreeMap<_, _>>());
        assert_eq!(loaded.len(), from_map.len());

        for (k, v) in &data {
            assert_eq!(loaded.get(k).unwrap(), v);
        }

        let loaded_kvs = loaded.into_iter().collect::<Vec<_>>();
        let map_kvs = from_map.into_iter().collect::<Vec<_>>();
        assert_eq!(loaded_kvs, map_kvs);
        assert_eq!(loaded_kvs, data);
    }

    #[test]
    fn test_bulk_load_string() {
        let data = (0..400)
            .map(|i| (format!("{i:010}"), i * 2))
            .collect::<Vec<_>>();
        let mut shuffled = data.clone();
        shuffled.shuffle(&mut rand::thread_rng());

        let loaded = SortedLookup::from(shuffled);
        for (k, v) in &data {
            assert_eq!(loaded.get(k.as_str()).unwrap(), v);
        }

        let loaded_kvs = loaded.into_iter().collect::<Vec<_>>();
        assert_eq!(loaded_kvs, data);
    }

    #[test]
    fn test_build_is_stable() {
        let lookup =
            SortedLookup::build([(1, "first"), (0, "zero"), (1, "second"), (1, "third")]);
        assert_eq!(
            lookup.values().copied().collect::<Vec<_>>(),
            vec!["zero", "first", "second", "third"]
        );
    }

    #[test]
    fn test_collect() {
        let lookup: SortedLookup<_, _> = (0..10).rev().map(|i| (i, i + 1)).collect();
        assert_eq!(lookup.first(), Some((&0, &1)));

        let linear = (0..10)
            .map(|i| (i, i + 1))
            .collect::<SortedLookup<_, _, LinearSearch>>();
        assert!(lookup == linear);
    }

    #[test]
    fn test_try_build_floats() {
        let mut pairs = (0..200).map(|i| (i as f64 / 4.0, i)).collect::<Vec<_>>();
        pairs.shuffle(&mut rand::thread_rng());

        let lookup = SortedLookup::try_build(pairs).unwrap();
        assert_eq!(lookup.len(), 200);
        assert_eq!(lookup.get(&0.25), Ok(&1));
        assert_eq!(lookup.get(&49.75), Ok(&199));
        assert!(!lookup.contains(&0.3));
        assert!(!lookup.contains(&f64::NAN));
        assert!(lookup.keys().zip(lookup.keys().skip(1)).all(|(a, b)| a < b));
    }

    #[test]
    fn test_try_build_rejects_nan() {
        let err = SortedLookup::try_build([(1.0, 'a'), (f64::NAN, 'b')]).unwrap_err();
        assert_eq!(
            err,
            LookupError::Construction {
                reason: "key at position 1 is not comparable with itself".to_string()
            }
        );

        // alone, still rejected
        assert!(SortedLookup::try_build([(f64::NAN, 'b')]).is_err());
    }

    /// Ordered by inclusion, `{1}` and `{2}` are not comparable
    #[derive(Debug, PartialEq)]
    struct Subset(u8);

    impl PartialOrd for Subset {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            if self.0 == other.0 {
                Some(Ordering::Equal)
            } else if self.0 & other.0 == self.0 {
                Some(Ordering::Less)
            } else if self.0 & other.0 == other.0 {
                Some(Ordering::Greater)
            } else {
                None
            }
        }
    }

    #[test]
    fn test_try_build_rejects_incomparable_keys() {
        let chain = SortedLookup::try_build([
            (Subset(0b111), 'c'),
            (Subset(0b001), 'a'),
            (Subset(0b011), 'b'),
        ])
        .unwrap();
        assert_eq!(chain.get(&Subset(0b011)), Ok(&'b'));

        let result = SortedLookup::try_build([(Subset(0b001), 'a'), (Subset(0b010), 'b')]);
        assert!(matches!(result, Err(LookupError::Construction { .. })));
    }

    #[test]
    fn test_try_build_empty() {
        let lookup = SortedLookup::<f64, ()>::try_build([]).unwrap();
        assert!(lookup.is_empty());
        assert!(lookup.get(&1.0).is_err());
    }

    #[test]
    fn test_try_build_is_stable() {
        let lookup = SortedLookup::try_build([(1.0, 'a'), (0.0, 'z'), (1.0, 'b')]).unwrap();

        assert_eq!(lookup.values().copied().collect::<Vec<_>>(), vec!['z', 'a', 'b']);
        assert_eq!(lookup.get(&1.0), Ok(&'a'));
        assert_eq!(lookup.rank(&1.0), Ok(1));
    }
}
