//! Closest-name suggestions for misspelled option names.

use std::mem;

/// Levenshtein distance between two strings, counted in chars.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1).min((curr[j - 1] + 1).min(prev[j - 1] + cost));
        }
        mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Find the candidate with the smallest distance to `name`.
///
/// The first candidate wins ties. Returns `None` when there are no candidates.
pub fn closest_name<'a, I>(name: &str, candidates: I) -> Option<(&'a str, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, usize)> = None;
    for candidate in candidates {
        let dist = levenshtein_distance(name, candidate);
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((candidate, dist));
        }
    }
    best
}
