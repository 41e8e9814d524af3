//! Page arithmetic for filtered lists. Pages are 1-based.

/// Number of pages needed for `filtered_count` items; never less than 1.
///
/// A `page_size` of 0 is treated as 1.
pub fn total_pages(filtered_count: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    filtered_count.div_ceil(size).max(1)
}

/// Accepts `requested` when it lies in `[1, total]`, otherwise keeps `current`.
///
/// `current` itself is pulled back into range, so the result is always valid.
pub fn clamp(current: usize, requested: usize, total: usize) -> usize {
    let total = total.max(1);
    if (1..=total).contains(&requested) {
        requested
    } else {
        current.clamp(1, total)
    }
}

/// Items shown on `page` (1-based). Out-of-range pages yield an empty slice.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + size).min(items.len());
    &items[start..end]
}
