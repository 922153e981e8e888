use crate::domain::model::list_entry::ListEntry;
use crate::shared::style::strip_ansi;

/// Levenshtein distance over characters.
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// A search hit in the option tree. Groups carry their matching children and
/// score as the best (smallest) child distance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedEntry {
    pub path: Vec<usize>,
    pub distance: usize,
    pub children: Vec<MatchedEntry>,
}

fn contains_query(query: &str, text: &str) -> bool {
    strip_ansi(text).to_lowercase().contains(query)
}

/// Case-insensitive substring match against the entry's name, or for leaves
/// whose label differs from their value, against the value text too.
/// `query` must already be lowercase.
pub fn entry_matches<T>(query: &str, entry: &ListEntry<T>) -> bool {
    match entry {
        ListEntry::Option(option) => {
            contains_query(query, &option.name)
                || (option.name != option.value_text && contains_query(query, &option.value_text))
        }
        ListEntry::Group(group) => contains_query(query, &group.name),
        ListEntry::Separator(_) => false,
    }
}

/// Recursively match `entries` (located at `base` in the tree) against
/// `query`, sorting each level by ascending distance.
///
/// A group whose children match is kept with those children; otherwise the
/// group itself is tested like a leaf. Sorting is stable, so equal distances
/// keep their declaration order.
pub fn match_entries<T>(query: &str, entries: &[ListEntry<T>], base: &[usize]) -> Vec<MatchedEntry> {
    let mut matched = Vec::new();

    for (i, entry) in entries.iter().enumerate() {
        let mut path = base.to_vec();
        path.push(i);

        if let ListEntry::Group(group) = entry {
            let children = match_entries(query, &group.options, &path);
            if let Some(distance) = children.iter().map(|c| c.distance).min() {
                matched.push(MatchedEntry {
                    path,
                    distance,
                    children,
                });
                continue;
            }
        }

        if entry_matches(query, entry) {
            let name = strip_ansi(entry.name()).to_lowercase();
            matched.push(MatchedEntry {
                distance: edit_distance(&name, query),
                path,
                children: Vec::new(),
            });
        }
    }

    matched.sort_by_key(|m| m.distance);
    matched
}

/// Flatten matches depth-first into `(path, indent_level)` pairs.
pub fn flatten_matches(matches: &[MatchedEntry]) -> Vec<(Vec<usize>, usize)> {
    fn walk(matches: &[MatchedEntry], indent: usize, out: &mut Vec<(Vec<usize>, usize)>) {
        for m in matches {
            out.push((m.path.clone(), indent));
            walk(&m.children, indent + 1, out);
        }
    }

    let mut out = Vec::new();
    walk(matches, 0, &mut out);
    out
}

/// Filter suggestion candidates by case-insensitive prefix and sort them by
/// ascending edit distance to `input`.
///
/// An empty `input` returns all candidates in original order.
pub fn filter_and_sort(input: &str, candidates: Vec<String>) -> Vec<String> {
    if input.is_empty() {
        return candidates;
    }
    let needle = input.to_lowercase();

    let mut ranked: Vec<(usize, String)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let plain = strip_ansi(&candidate).to_lowercase();
            plain
                .starts_with(&needle)
                .then(|| (edit_distance(&plain, &needle), candidate))
        })
        .collect();

    ranked.sort_by_key(|(distance, _)| *distance);
    ranked.into_iter().map(|(_, candidate)| candidate).collect()
}
