use once_cell::sync::Lazy;
use regex::Regex;

use super::{get_text, LookupResult, Match};
use crate::regex::cap_as_str;

/// Heading DBLP renders above unambiguous name hits.
const EXACT_MARKER: &str = "Exact matches";

static PID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<a href="(\w+://dblp\.uni-trier\.de/pid/\d+/\d+)"#).unwrap());

/// Pulls the first author pid link that appears after the "Exact matches"
/// heading. Returns None when the heading or the link is absent.
pub fn extract_pid(html: &str) -> Option<&str> {
    let start = html.find(EXACT_MARKER)? + EXACT_MARKER.len();
    cap_as_str(&PID_RE, &html[start..], 1)
}

pub fn resolve(first: &str, last: &str) -> LookupResult {
    let html = get_text(&format!(
        "https://dblp.uni-trier.de/search?q={first}%20{last}"
    ))?;
    Ok(extract_pid(&html).map(|pid| Match {
        id: pid.to_string(),
        display_name: format!("{first} {last}"),
    }))
}
