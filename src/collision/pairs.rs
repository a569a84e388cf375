//! Flat enumeration of unordered index pairs, used to split the all-pairs
//! collision pass into equal contiguous ranges.
//!
//! Pairs are ordered row by row: `(0,1), (0,2), .., (0,n-1), (1,2), ..`.

/// Number of unordered pairs `(i, j)` with `i < j < n`.
pub fn pair_count(n: usize) -> u64 {
    let n = n as u64;
    n * n.saturating_sub(1) / 2
}

/// Flat index of the first pair in row `i`.
fn row_start(i: u64, n: u64) -> u64 {
    i * (2 * n - i - 1) / 2
}

/// Maps a flat pair index `k` in `[0, pair_count(n))` back to `(i, j)`, `i < j`.
///
/// The row is estimated in closed form and then corrected with exact integer
/// checks, so the mapping stays exact when the square root rounds badly.
pub fn pair_from_index(k: u64, n: usize) -> (usize, usize) {
    debug_assert!(k < pair_count(n));
    let n64 = n as u64;
    let last_row = n64.saturating_sub(2);

    let radicand = 4.0 * (n64 as f64) * ((n64 as f64) - 1.0) - 8.0 * (k as f64) - 7.0;
    let back = (radicand.max(0.0).sqrt() / 2.0 - 0.5).floor();
    let mut i = (last_row as f64 - back).clamp(0.0, last_row as f64) as u64;

    while i > 0 && row_start(i, n64) > k {
        i -= 1;
    }
    while i < last_row && row_start(i + 1, n64) <= k {
        i += 1;
    }

    let j = k - row_start(i, n64) + i + 1;
    (i as usize, j as usize)
}
