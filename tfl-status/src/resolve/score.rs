//! Name similarity scoring for station search results.

use crate::domain::strip_suffix;

/// Reduce a station name or query to a comparable key.
///
/// Drops the station-type suffix and parenthesised qualifiers, lower-cases,
/// spells out "&", removes apostrophes and dots, and collapses everything
/// else that isn't a letter or digit into single spaces.
pub fn name_key(name: &str) -> String {
    let base = strip_suffix(name.trim());

    let mut cleaned = String::with_capacity(base.len());
    let mut depth = 0usize;
    for c in base.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth > 0 => {}
            '\'' | '’' | '.' => {}
            '&' => cleaned.push_str(" and "),
            c if c.is_alphanumeric() => cleaned.extend(c.to_lowercase()),
            _ => cleaned.push(' '),
        }
    }

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Similarity between two keys, from 0.0 (unrelated) to 1.0 (identical).
///
/// The score is the better of normalized edit similarity and a containment
/// score: a candidate that starts with the query scores at least 0.8, one
/// that merely contains it at least 0.6, both rising towards (but never
/// reaching) 1.0 as the query covers more of the candidate.
pub fn similarity(query: &str, candidate: &str) -> f64 {
    if query == candidate {
        return 1.0;
    }
    if query.is_empty() || candidate.is_empty() {
        return 0.0;
    }

    let q_len = query.chars().count();
    let c_len = candidate.chars().count();

    let distance = levenshtein(query, candidate);
    let edit = 1.0 - distance as f64 / q_len.max(c_len) as f64;

    let coverage = q_len as f64 / c_len as f64;
    let containment = if candidate.starts_with(query) {
        0.8 + 0.19 * coverage
    } else if candidate.contains(query) {
        0.6 + 0.19 * coverage
    } else {
        0.0
    };

    edit.max(containment).clamp(0.0, 1.0)
}

/// Character-level edit distance.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
