use std::ops::Range;

/// Splits `[0, width)` into `workers` contiguous column ranges.
///
/// The first `workers - 1` ranges get `width / workers` columns each and the
/// last one takes the remainder, so ranges may be empty when `width` is
/// smaller than `workers`. Returns no ranges when `workers` is zero.
pub fn partition_columns(width: usize, workers: usize) -> Vec<Range<usize>> {
    if workers == 0 {
        return Vec::new();
    }

    let quantum = width / workers;
    (0..workers)
        .map(|i| {
            let start = i * quantum;
            let end = if i + 1 == workers { width } else { start + quantum };
            start..end
        })
        .collect()
}
