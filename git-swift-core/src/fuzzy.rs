/// Case-insensitive subsequence match: every char of `query` must appear in
/// `candidate` in order, with arbitrary gaps. An empty query matches everything.
pub fn matches(candidate: &str, query: &str) -> bool {
    match_positions(candidate, query).is_some()
}

/// Char indices into `candidate` consumed by the greedy scan, or `None` when the
/// query is not a subsequence.
///
/// The scan is first-fit: each query char binds to the earliest remaining
/// candidate char equal to it. No scoring is performed, so callers must not rely
/// on the positions being the "best" alignment.
pub fn match_positions(candidate: &str, query: &str) -> Option<Vec<usize>> {
    if query.is_empty() {
        return Some(Vec::new());
    }

    let query: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    let mut positions = Vec::with_capacity(query.len());
    let mut query_idx = 0;

    for (idx, c) in candidate.chars().enumerate() {
        // Fold the same way as the query; one candidate char may lowercase to several
        for lower in c.to_lowercase() {
            if query_idx == query.len() {
                break;
            }
            if lower == query[query_idx] {
                if positions.last() != Some(&idx) {
                    positions.push(idx);
                }
                query_idx += 1;
            }
        }
        if query_idx == query.len() {
            break;
        }
    }

    (query_idx == query.len()).then_some(positions)
}

/// Names from `names` that match `query`, in their original order.
pub fn filter<'a>(names: &'a [String], query: &str) -> Vec<&'a str> {
    names
        .iter()
        .map(String::as_str)
        .filter(|name| matches(name, query))
        .collect()
}
