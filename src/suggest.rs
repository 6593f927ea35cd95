//! "Did you mean" hints for mistyped demo names

/// Maximum edit distance for a candidate to count as a suggestion.
pub const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Maximum number of suggestions returned.
const MAX_SUGGESTIONS: usize = 3;

/// Levenshtein distance between two strings, compared by `char`.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Single rolling row: row[j] holds the distance between a[..i] and b[..j]
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            let substitution = diagonal + usize::from(ca != cb);
            row[j + 1] = substitution.min(above + 1).min(row[j] + 1);
            diagonal = above;
        }
    }
    row[b.len()]
}

/// Rank `candidates` by closeness to `query`.
///
/// Comparison is case-insensitive. A candidate that starts with the query
/// (`"obs"` -> `"observer"`) always qualifies, ranked ahead of plain
/// edit-distance matches. At most three names are returned.
pub fn closest<'a, I>(query: &str, candidates: I, max_distance: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let query = query.to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, &str)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let lowered = candidate.to_lowercase();
            if lowered.starts_with(&query) {
                Some((0, candidate))
            } else {
                let distance = edit_distance(&query, &lowered);
                (distance <= max_distance).then_some((distance, candidate))
            }
        })
        .collect();

    // Stable sort keeps registry order among equal scores
    scored.sort_by_key(|(score, _)| *score);
    scored.into_iter().take(MAX_SUGGESTIONS).map(|(_, name)| name.to_string()).collect()
}

/// Render suggestions as a sentence, or `None` when there are none.
pub fn did_you_mean(suggestions: &[String]) -> Option<String> {
    match suggestions {
        [] => None,
        [only] => Some(format!("Did you mean '{}'?", only)),
        [first, second] => Some(format!("Did you mean '{}' or '{}'?", first, second)),
        [rest @ .., last] => {
            let quoted: Vec<String> = rest.iter().map(|s| format!("'{}'", s)).collect();
            Some(format!("Did you mean {}, or '{}'?", quoted.join(", "), last))
        }
    }
}
