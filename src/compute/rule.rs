//! Conway's transition rule (B3/S23).
//!
//! The rule maps a cell's current state and its alive-neighbor count to the
//! cell's state in the next generation.

/// Next state of a cell with `neighbors` alive neighbors.
///
/// - alive with 2 or 3 neighbors survives
/// - dead with exactly 3 neighbors is born
/// - everything else is dead (under- or overpopulation)
#[inline]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2 | 3) | (false, 3))
}

/// Apply [`next_state`] to a whole grid in place.
///
/// `counts` must be a complete counting pass over the current contents of
/// `cells`; each output depends only on its own slot in both slices.
pub fn apply_rule(cells: &mut [bool], counts: &[u8]) {
    for (cell, &n) in cells.iter_mut().zip(counts.iter()) {
        *cell = next_state(*cell, n);
    }
}
