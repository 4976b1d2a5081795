use std::{borrow::Borrow, fmt, ops::Index};

use crate::{
    key_search::{BinarySearch, KeySearcher},
    Lookup, LookupError, Result,
};

/// Read only map backed by two parallel sorted `Vec`s, one for keys and one
/// for values. Queries binary search the key slice, so they are
/// `O(log n)` and cache friendly.
///
/// The lookup is built once, from pairs or from another map, and never
/// changes after that. To change content, build a new one.
///
/// Duplicate keys are kept in insertion order, queries always resolve to the
/// first of them.
///
/// # Example
/// ```rust
/// use sorted_lookup::SortedLookup;
///
/// let lookup = SortedLookup::build([
///     ("z", "Zillah"),
///     ("a", "Amy"),
///     ("c", "Clara"),
///     ("b", "Basil"),
/// ]);
///
/// assert_eq!(lookup.keys().copied().collect::<Vec<_>>(), ["a", "b", "c", "z"]);
/// assert_eq!(lookup.get("c"), Ok(&"Clara"));
/// assert!(lookup.get("m").unwrap_err().is_key_not_found());
/// assert!(!lookup.contains("m"));
/// ```
#[derive(Clone)]
pub struct SortedLookup<K, V, S = BinarySearch> {
    keys: Vec<K>,
    values: Vec<V>,
    searcher: S,
}

impl<K, V> SortedLookup<K, V> {
    /// Create an empty lookup
    ///
    /// # Examples
    /// ```rust
    /// use sorted_lookup::SortedLookup;
    ///
    /// let lookup = SortedLookup::<i32, i32>::new();
    ///
    /// assert!(lookup.is_empty());
    /// assert!(!lookup.contains(&1));
    /// ```
    pub fn new() -> Self {
        Self::with_searcher(BinarySearch)
    }
}

impl<K, V> Default for SortedLookup<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S: KeySearcher> SortedLookup<K, V, S> {
    /// Create an empty lookup which locates keys with `searcher`
    pub fn with_searcher(searcher: S) -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
            searcher,
        }
    }

    /// Assemble from already sorted parts.
    pub(crate) fn from_sorted_parts(keys: Vec<K>, values: Vec<V>, searcher: S) -> Self {
        debug_assert_eq!(keys.len(), values.len());
        Self {
            keys,
            values,
            searcher,
        }
    }

    /// Returns item count in the lookup
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if the lookup contains no item
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the searcher used by this lookup
    pub fn searcher(&self) -> &S {
        &self.searcher
    }

    /// Returns the position of `key`. `Ok(idx)` if it exists, otherwise
    /// `Err(idx)` where `idx` is the position it would be inserted at.
    ///
    /// # Example
    ///
    /// ``` rust
    /// use sorted_lookup::SortedLookup;
    ///
    /// let lookup = SortedLookup::build([(1, 2), (2, 3), (3, 4)]);
    ///
    /// // 0 does not exists
    /// assert_eq!(lookup.rank(&0), Err(0));
    ///
    /// // 1's rank is 0
    /// assert_eq!(lookup.rank(&1), Ok(0));
    /// assert_eq!(lookup.rank(&2), Ok(1));
    /// assert_eq!(lookup.rank(&3), Ok(2));
    ///
    /// // 4 does not exists
    /// assert_eq!(lookup.rank(&4), Err(3));
    /// ```
    #[inline]
    pub fn rank<Q>(&self, key: &Q) -> Result<usize, usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + PartialOrd,
    {
        S::search(&self.keys, key)
    }

    /// Returns true if the lookup contains `key`
    ///
    /// # Examples
    /// ```rust
    /// use sorted_lookup::SortedLookup;
    ///
    /// let lookup = SortedLookup::build([(1, 'a'), (3, 'c')]);
    ///
    /// assert!(lookup.contains(&1));
    /// assert!(!lookup.contains(&2));
    /// // past the last key
    /// assert!(!lookup.contains(&4));
    /// ```
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + PartialOrd,
    {
        self.rank(key).is_ok()
    }

    /// Returns a reference to the value corresponding to the key, or `None`
    #[inline]
    pub fn find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + PartialOrd,
    {
        self.rank(key).ok().map(|idx| &self.values[idx])
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// Fails with [`LookupError::KeyNotFound`] if no key equals `key`.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_lookup::{LookupError, SortedLookup};
    ///
    /// let lookup = SortedLookup::build([("one".to_string(), 1)]);
    ///
    /// assert_eq!(lookup.get("one"), Ok(&1));
    /// assert_eq!(
    ///     lookup.get("two"),
    ///     Err(LookupError::KeyNotFound { key: "\"two\"".to_string() })
    /// );
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + PartialOrd + fmt::Debug,
    {
        self.find(key)
            .ok_or_else(|| LookupError::key_not_found(key))
    }

    /// Returns the stored key and value for `key`
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + PartialOrd,
    {
        self.rank(key).ok().and_then(|idx| self.get_index(idx))
    }

    /// Returns the pair at `idx` in key order
    ///
    /// # Example
    /// ```rust
    /// use sorted_lookup::SortedLookup;
    ///
    /// let lookup = SortedLookup::build([(3, 4), (1, 2), (2, 3)]);
    ///
    /// assert_eq!(lookup.get_index(0), Some((&1, &2)));
    /// assert_eq!(lookup.get_index(2), Some((&3, &4)));
    /// assert_eq!(lookup.get_index(3), None);
    /// ```
    #[inline]
    pub fn get_index(&self, idx: usize) -> Option<(&K, &V)> {
        Some((self.keys.get(idx)?, self.values.get(idx)?))
    }

    /// Returns the pair with the smallest key
    pub fn first(&self) -> Option<(&K, &V)> {
        self.get_index(0)
    }

    /// Returns the pair with the largest key
    pub fn last(&self) -> Option<(&K, &V)> {
        self.get_index(self.len().checked_sub(1)?)
    }

    /// Returns an iterator over keys, in ascending order.
    /// The iterator is `Clone`, so it can be restarted from any point.
    #[inline]
    pub fn keys(&self) -> iter::Keys<'_, K> {
        iter::Keys {
            inner: self.keys.iter(),
        }
    }

    /// Returns an iterator over values, in key order
    #[inline]
    pub fn values(&self) -> iter::Values<'_, V> {
        iter::Values {
            inner: self.values.iter(),
        }
    }

    /// Returns an iterator over the lookup.
    ///
    /// # Examples
    /// ```rust
    /// use sorted_lookup::SortedLookup;
    ///
    /// let lookup = SortedLookup::build(vec![(2, 3), (1, 2)]);
    ///
    /// let kvs = lookup.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>();
    /// assert_eq!(kvs, vec![(1, 2), (2, 3)]);
    /// ```
    #[inline]
    pub fn iter(&self) -> iter::Iter<'_, K, V> {
        iter::Iter {
            inner: self.keys.iter().zip(self.values.iter()),
        }
    }

    /// Consume the lookup, returns the sorted keys and values
    pub fn into_parts(self) -> (Vec<K>, Vec<V>) {
        (self.keys, self.values)
    }
}

impl<K, V, S: KeySearcher> Lookup for SortedLookup<K, V, S> {
    type K = K;
    type V = V;

    fn len(&self) -> usize {
        SortedLookup::len(self)
    }

    fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        SortedLookup::iter(self)
    }

    fn keys(&self) -> impl Iterator<Item = &K> {
        SortedLookup::keys(self)
    }

    fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord + fmt::Debug,
    {
        SortedLookup::contains(self, key)
    }

    fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord + fmt::Debug,
    {
        SortedLookup::get(self, key)
    }
}

impl<K, V, S, S2> PartialEq<SortedLookup<K, V, S2>> for SortedLookup<K, V, S>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &SortedLookup<K, V, S2>) -> bool {
        self.keys == other.keys && self.values == other.values
    }
}

impl<K: Eq, V: Eq, S> Eq for SortedLookup<K, V, S> {}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for SortedLookup<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.keys.iter().zip(self.values.iter()))
            .finish()
    }
}

impl<K, Q, V, S> Index<&Q> for SortedLookup<K, V, S>
where
    K: Borrow<Q>,
    Q: ?Sized + PartialOrd,
    S: KeySearcher,
{
    type Output = V;

    /// Returns the value for `key`
    ///
    /// # Panics
    ///
    /// Panics if the key is not present.
    #[inline]
    fn index(&self, key: &Q) -> &V {
        self.find(key).expect("no entry found for key")
    }
}

impl<'a, K, V, S: KeySearcher> IntoIterator for &'a SortedLookup<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = iter::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> IntoIterator for SortedLookup<K, V, S> {
    type Item = (K, V);
    type IntoIter = iter::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        iter::IntoIter {
            inner: self.keys.into_iter().zip(self.values),
        }
    }
}

/// Lookups only share immutable state, so they are as `Send`/`Sync` as
/// their content.
fn _ensure_send_sync<K: Send + Sync, V: Send + Sync>() {
    fn _assert_send_sync<T: Send + Sync>() {}
    _assert_send_sync::<SortedLookup<K, V>>();
}

pub mod iter {
    use std::{iter::FusedIterator, slice, vec};

    /// Iterator over keys of a lookup, in ascending order
    #[derive(Clone, Debug)]
    pub struct Keys<'a, K> {
        pub(super) inner: slice::Iter<'a, K>,
    }

    impl<'a, K> Iterator for Keys<'a, K> {
        type Item = &'a K;

        #[inline]
        fn size_hint(&self) -> (usize, Option<usize>) {
            self.inner.size_hint()
        }

        #[inline]
        fn next(&mut self) -> Option<Self::Item> {
            self.inner.next()
        }
    }

    impl<'a, K> DoubleEndedIterator for Keys<'a, K> {
        fn next_back(&mut self) -> Option<Self::Item> {
            self.inner.next_back()
        }
    }

    impl<'a, K> ExactSizeIterator for Keys<'a, K> {}
    impl<'a, K> FusedIterator for Keys<'a, K> {}

    /// Iterator over values of a lookup, in key order
    #[derive(Clone, Debug)]
    pub struct Values<'a, V> {
        pub(super) inner: slice::Iter<'a, V>,
    }

    impl<'a, V> Iterator for Values<'a, V> {
        type Item = &'a V;

        #[inline]
        fn size_hint(&self) -> (usize, Option<usize>) {
            self.inner.size_hint()
        }

        #[inline]
        fn next(&mut self) -> Option<Self::Item> {
            self.inner.next()
        }
    }

    impl<'a, V> DoubleEndedIterator for Values<'a, V> {
        fn next_back(&mut self) -> Option<Self::Item> {
            self.inner.next_back()
        }
    }

    impl<'a, V> ExactSizeIterator for Values<'a, V> {}
    impl<'a, V> FusedIterator for Values<'a, V> {}

    /// Borrowed pair iterator
    #[derive(Clone, Debug)]
    pub struct Iter<'a, K, V> {
        pub(super) inner: std::iter::Zip<slice::Iter<'a, K>, slice::Iter<'a, V>>,
    }

    impl<'a, K, V> Iterator for Iter<'a, K, V> {
        type Item = (&'a K, &'a V);

        #[inline]
        fn size_hint(&self) -> (usize, Option<usize>) {
            self.inner.size_hint()
        }

        #[inline]
        fn next(&mut self) -> Option<Self::Item> {
            self.inner.next()
        }
    }

    impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
        fn next_back(&mut self) -> Option<Self::Item> {
            self.inner.next_back()
        }
    }

    impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}
    impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

    /// Owning pair iterator
    #[derive(Debug)]
    pub struct IntoIter<K, V> {
        pub(super) inner: std::iter::Zip<vec::IntoIter<K>, vec::IntoIter<V>>,
    }

    impl<K, V> Iterator for IntoIter<K, V> {
        type Item = (K, V);

        #[inline]
        fn size_hint(&self) -> (usize, Option<usize>) {
            self.inner.size_hint()
        }

        #[inline]
        fn next(&mut self) -> Option<Self::Item> {
            self.inner.next()
        }
    }

    impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
        fn next_back(&mut self) -> Option<Self::Item> {
            self.inner.next_back()
        }
    }

    impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
    impl<K, V> FusedIterator for IntoIter<K, V> {}
}
