//! Weighted edit distance and common-prefix length
//!
//! Costs are asymmetric so that an unfinished slug (characters still to be
//! inserted) scores better than a slug with extra characters typed.

/// Cost of inserting a character of `b`
pub const INSERT_COST: usize = 2;
/// Cost of deleting a character of `a`
pub const DELETE_COST: usize = 3;
/// Cost of replacing one character with another
pub const SUBSTITUTE_COST: usize = 2;
/// Cost of swapping two adjacent characters
pub const TRANSPOSE_COST: usize = 1;

/// Weighted Damerau-style distance from `a` to `b`.
///
/// Classic row-by-row DP keeping the current row and the two before it;
/// the row from two steps back feeds the adjacent-transposition case.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // row0: two rows back, row1: previous, row2: current
    let mut row0 = vec![0usize; b.len() + 1];
    let mut row1: Vec<usize> = (0..=b.len()).map(|j| j * INSERT_COST).collect();
    let mut row2 = vec![0usize; b.len() + 1];

    for i in 0..a.len() {
        row2[0] = (i + 1) * DELETE_COST;

        for j in 0..b.len() {
            let sub = if a[i] == b[j] { 0 } else { SUBSTITUTE_COST };
            let mut best = row1[j] + sub;

            if i > 0 && j > 0 && a[i] == b[j - 1] && a[i - 1] == b[j] && a[i] != b[j] {
                best = best.min(row0[j - 1] + TRANSPOSE_COST);
            }

            best = best.min(row1[j + 1] + DELETE_COST);
            best = best.min(row2[j] + INSERT_COST);

            row2[j + 1] = best;
        }

        // Rotate: current becomes previous, previous becomes two-back
        std::mem::swap(&mut row0, &mut row1);
        std::mem::swap(&mut row1, &mut row2);
    }

    row1[b.len()]
}

/// Length in characters of the longest shared leading run
pub fn prefix_match(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .count()
}
