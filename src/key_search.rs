use std::borrow::Borrow;

/// Strategy used by the lookup to locate keys in its sorted key slice.
///
/// Implementations only need to provide [`KeySearcher::lower_bound`], the
/// leftmost insertion point of `k`. `search` is derived from it and returns
/// the same shape as `slice::binary_search`, except that for duplicate keys
/// `Ok` always points at the first occurrence.
pub trait KeySearcher {
    /// Name used in log output
    const NAME: &'static str;

    /// Returns the smallest index at which `k` could be inserted while keeping
    /// `keys` sorted. The result is in `0..=keys.len()`.
    fn lower_bound<K, Q>(keys: &[K], k: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + PartialOrd;

    /// Returns `Ok(idx)` if `keys[idx] == k`, `Err(idx)` with the insertion
    /// point otherwise.
    #[inline]
    fn search<K, Q>(keys: &[K], k: &Q) -> Result<usize, usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + PartialOrd,
    {
        let idx = Self::lower_bound(keys, k);
        // idx == keys.len() when k is greater than every key
        match keys.get(idx) {
            Some(key) if key.borrow() == k => Ok(idx),
            _ => Err(idx),
        }
    }
}

/// Plain binary search, the default.
#[derive(Clone, Copy, Debug, Default)]
pub struct BinarySearch;

impl KeySearcher for BinarySearch {
    const NAME: &'static str = "binary_search";

    #[inline]
    fn lower_bound<K, Q>(keys: &[K], k: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + PartialOrd,
    {
        keys.partition_point(|key| key.borrow() < k)
    }
}

/// Binary search with a fixed iteration count, the loop body only moves `base`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BranchlessBinarySearch;

impl KeySearcher for BranchlessBinarySearch {
    const NAME: &'static str = "branchless_binary_search";

    fn lower_bound<K, Q>(keys: &[K], k: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + PartialOrd,
    {
        if keys.is_empty() {
            return 0;
        }

        // the answer always stays in base..=base + size
        let mut base = 0;
        let mut size = keys.len();
        while size > 1 {
            let half = size / 2;
            let mid = base + half;
            if keys[mid].borrow() < k {
                base = mid;
            }
            size -= half;
        }

        base + (keys[base].borrow() < k) as usize
    }
}

/// Linear scan, faster than binary search for a handful of keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearSearch;

impl KeySearcher for LinearSearch {
    const NAME: &'static str = "linear_search";

    fn lower_bound<K, Q>(keys: &[K], k: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + PartialOrd,
    {
        keys.iter()
            .position(|key| !(key.borrow() < k))
            .unwrap_or(keys.len())
    }
}
