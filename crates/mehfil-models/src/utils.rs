//! Small text helpers shared across the pipeline.

/// Capitalize the first letter of every whitespace-separated word,
/// lowercasing the rest. Used when laying out title card text so sheet
/// entries like "chirag agarwal" and "LONDON" render uniformly.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
