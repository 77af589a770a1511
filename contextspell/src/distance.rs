//! Levenshtein edit distance.

/// Minimum number of single-character insertions, deletions and
/// substitutions turning `a` into `b`.
///
/// Works on Unicode scalar values, so `levenshtein("é", "e")` is 1 regardless
/// of the UTF-8 width of either character. Uses the full
/// `(|a| + 1) x (|b| + 1)` table.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];

    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        table[0][j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };

            table[i][j] = (table[i - 1][j] + 1)
                .min(table[i][j - 1] + 1)
                .min(table[i - 1][j - 1] + cost);
        }
    }

    table[a.len()][b.len()]
}
