// File:    key_order.rs
// Author:  apezoo
// Date:    2026-10-19
//
// Description: Derives the column reading order for columnar transposition from a keyword.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Keyword ranking for columnar transposition ciphers.

/// The read position (1-indexed) of every keyword column, indexed by the
/// column's original position.
pub type ColumnOrder = Vec<usize>;

/// Uppercases the input and drops everything that is not an ASCII letter.
#[must_use]
pub fn normalize_keyword(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Ranks the characters of `keyword` alphabetically.
///
/// Equal letters are ranked left to right, so the result is always a
/// permutation of `1..=keyword.len()`. `"DATA"` yields `[3, 1, 4, 2]`.
///
/// An empty keyword yields an empty order.
#[must_use]
pub fn derive_order(keyword: &str) -> ColumnOrder {
    let mut indexed: Vec<(char, usize)> = keyword
        .chars()
        .enumerate()
        .map(|(idx, c)| (c.to_ascii_uppercase(), idx))
        .collect();
    // Tuples compare by letter first, then by original index.
    indexed.sort_unstable();

    let mut order = vec![0; indexed.len()];
    for (rank, &(_, idx)) in indexed.iter().enumerate() {
        order[idx] = rank + 1;
    }
    order
}

/// Checks that `order` is a permutation of `1..=order.len()`.
#[must_use]
pub fn is_permutation(order: &[usize]) -> bool {
    let mut seen = vec![false; order.len()];
    for &rank in order {
        if rank == 0 || rank > order.len() || seen[rank - 1] {
            return false;
        }
        seen[rank - 1] = true;
    }
    true
}

/// The keyword currently entered on a columnar page together with its
/// (possibly hand-edited) column order.
///
/// The order is only re-derived when the keyword's effective length changes,
/// so manual overrides survive edits that keep the same number of letters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordTracker {
    keyword: String,
    order: ColumnOrder,
}

impl KeywordTracker {
    /// Creates a tracker from raw user input and derives the initial order.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let keyword = normalize_keyword(raw);
        let order = derive_order(&keyword);
        Self { keyword, order }
    }

    /// Replaces the keyword. Returns `true` if the column order was re-derived.
    pub fn set_keyword(&mut self, raw: &str) -> bool {
        let keyword = normalize_keyword(raw);
        let length_changed = keyword.len() != self.keyword.len();
        self.keyword = keyword;
        if length_changed {
            log::debug!(
                "Keyword length changed to {}; re-deriving column order.",
                self.keyword.len()
            );
            self.order = derive_order(&self.keyword);
        }
        length_changed
    }

    /// Sets the read position of a single column.
    ///
    /// Returns `false` and leaves the order untouched if `index` is out of range.
    pub fn override_rank(&mut self, index: usize, rank: usize) -> bool {
        match self.order.get_mut(index) {
            Some(slot) => {
                *slot = rank;
                true
            }
            None => false,
        }
    }

    /// Replaces the whole column order with a hand-entered one.
    pub fn set_order(&mut self, order: ColumnOrder) {
        self.order = order;
    }

    /// The normalized keyword.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// The current column order.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }
}
