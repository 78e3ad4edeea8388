//! Wrap-around index arithmetic over a bounded collection.

/// Wraps `index` into `[0, len)`.
///
/// `len` must be non-zero; callers guard empty collections with [`step`] or
/// [`jump`], which return `None` instead.
pub fn wrap(index: i64, len: usize) -> usize {
    debug_assert!(len > 0, "wrap over an empty collection");
    index.rem_euclid(len as i64) as usize
}

/// Moves `delta` positions from `current`, wrapping at both ends.
pub fn step(current: usize, delta: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(wrap(current as i64 + delta, len))
}

/// Absolute jump to `target`, wrapped into range.
pub fn jump(target: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(wrap(target, len))
}
