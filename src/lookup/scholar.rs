use regex::Regex;

use super::{get_text, LookupResult, Match};
use crate::regex::cap_as_str;

/// The author-search markup highlights the queried name inside a `gs_hlt`
/// span; the profile token is the word immediately before that span's
/// enclosing link.
fn user_token_re(first: &str, last: &str) -> Regex {
    Regex::new(&format!(
        r#"(\w+)"><span class='gs_hlt'>{} {}"#,
        regex::escape(first),
        regex::escape(last)
    ))
    .unwrap()
}

pub fn extract_user(html: &str, first: &str, last: &str) -> Option<String> {
    let re = user_token_re(first, last);
    cap_as_str(&re, html, 1).map(|s| s.to_string())
}

pub fn profile_url(user: &str) -> String {
    format!("https://scholar.google.com/citations?hl=en&user={user}")
}

pub fn resolve(first: &str, last: &str) -> LookupResult {
    let html = get_text(&format!(
        "https://scholar.google.com/citations?hl=en&view_op=search_authors&mauthors={first}+{last}"
    ))?;
    Ok(extract_user(&html, first, last).map(|user| Match {
        id: profile_url(&user),
        display_name: format!("{first} {last}"),
    }))
}
