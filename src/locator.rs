//! Splitting `DataItem` text into a container path and a dataset path

use once_cell::sync::Lazy;
use regex::Regex;

/// Greedy prefix: the split happens at the last colon followed by `/`
static LOCATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*):(/.*)$").expect("locator pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator<'a> {
    Parsed { container: &'a str, dataset: &'a str },
    Malformed,
}

/// Parse `<container>:<dataset>` where the dataset path starts with `/`
///
/// The text is expected to be trimmed already. Newlines inside the text never
/// match.
pub fn parse_locator(text: &str) -> Locator<'_> {
    match LOCATOR_RE.captures(text) {
        Some(caps) => match (caps.get(1), caps.get(2)) {
            (Some(container), Some(dataset)) => Locator::Parsed {
                container: container.as_str(),
                dataset: dataset.as_str(),
            },
            _ => Locator::Malformed,
        },
        None => Locator::Malformed,
    }
}
