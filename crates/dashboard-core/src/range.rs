//! Array slicing helpers shared by the table and pagination widgets.

/// Inclusive integer sequence `start..=end`.
///
/// Returns an empty sequence when `end < start`, which covers the
/// `end == start - 1` case used to express "no items".
pub fn range(start: i64, end: i64) -> Vec<i64> {
    (start..=end).collect()
}

/// Slice of `data` shown on page `index` when pages hold `page_size` items.
///
/// Out-of-range pages yield an empty slice; the last page may be shorter
/// than `page_size`.
pub fn subset<T>(data: &[T], index: usize, page_size: usize) -> &[T] {
    let start = index.saturating_mul(page_size).min(data.len());
    let end = start.saturating_add(page_size).min(data.len());

    &data[start..end]
}
