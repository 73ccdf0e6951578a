use once_cell::sync::Lazy;
use regex::Regex;
use strsim::normalized_levenshtein;

use super::{get_json, LookupError, LookupResult, Match};
use crate::author::Author;

pub const DEFAULT_BASE_URL: &str = "https://api.openalex.org";

static NON_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W").unwrap());
static SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").unwrap());

/// Lowercases a title and collapses every non-word run to a single space,
/// which is all the works search filter tolerates.
pub fn normalize_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let spaced = NON_WORD_RE.replace_all(&lowered, " ");
    SPACE_RE.replace_all(&spaced, " ").trim().to_string()
}

/// Best candidate from one publication's authorship list, by normalized
/// Levenshtein ratio against the target name. Ties keep the earliest
/// candidate, and a lone candidate wins whatever its ratio.
pub fn best_candidate(name: &str, authorships: &[serde_json::Value]) -> Option<Match> {
    let target = name.to_lowercase();
    let mut best = f64::NEG_INFINITY;
    let mut chosen = None;
    for entry in authorships {
        let author = entry.get("author")?;
        let id = author.get("id").and_then(|v| v.as_str())?;
        let display_name = author.get("display_name").and_then(|v| v.as_str())?;
        let ratio = normalized_levenshtein(&display_name.to_lowercase(), &target);
        if ratio > best {
            best = ratio;
            chosen = Some(Match {
                id: id.to_string(),
                display_name: display_name.to_string(),
            });
        }
    }
    chosen
}

/// Last-pass-wins fold over per-publication authorship lists: each list's
/// best candidate overwrites the running one, so the last publication's
/// best match is the one returned. A list with no usable candidate fails
/// the whole author.
pub fn pick_across_publications(
    name: &str,
    lists: &[Vec<serde_json::Value>],
) -> Option<Match> {
    let mut found = None;
    for authorships in lists {
        match best_candidate(name, authorships) {
            Some(m) => found = Some(m),
            None => return None,
        }
    }
    found
}

pub struct Client {
    base_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Fuzzy-resolves an author id by searching each carried publication
    /// title in turn and folding the per-title candidates with
    /// `pick_across_publications`. A title whose search yields no work or
    /// no authorships fails the whole author.
    pub fn author_by_titles(&self, author: &Author) -> LookupResult {
        let mut lists = Vec::new();
        for publication in &author.publication {
            let title = normalize_title(&publication.title);
            let response = get_json(&format!(
                "{}/works?filter=title.search:{}",
                self.base_url, title
            ))?;
            let Some(authorships) = response
                .get("results")
                .and_then(|r| r.get(0))
                .and_then(|work| work.get("authorships"))
                .and_then(|a| a.as_array())
                .cloned()
            else {
                return Ok(None);
            };
            lists.push(authorships);
        }
        Ok(pick_across_publications(&author.name, &lists))
    }

    /// One page of works for a resolved author id.
    pub fn works(
        &self,
        author_id: &str,
        count: usize,
    ) -> Result<Vec<serde_json::Value>, LookupError> {
        let response = get_json(&format!(
            "{}/works?filter=author.id:{}&page=1&per-page={}",
            self.base_url, author_id, count
        ))?;
        Ok(response
            .get("results")
            .and_then(|r| r.as_array())
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn authorship(id: &str, display_name: &str) -> serde_json::Value {
        json!({"author": {"id": id, "display_name": display_name}})
    }

    #[test]
    fn normalizes_titles_for_search() {
        assert_eq!(
            normalize_title("Sketch of the Analytical Engine -- Note G!"),
            "sketch of the analytical engine note g"
        );
    }

    #[test]
    fn no_candidates_is_not_found() {
        assert_eq!(best_candidate("Ada Lovelace", &[]), None);
    }

    #[test]
    fn lone_candidate_wins_regardless_of_ratio() {
        let list = vec![authorship("A999", "Zyx Qwerty")];
        let m = best_candidate("Ada Lovelace", &list).unwrap();
        assert_eq!(m.id, "A999");
    }

    #[test]
    fn exact_name_beats_abbreviated_name() {
        let list = vec![
            authorship("A111", "Ada Lovelace"),
            authorship("A222", "A. Lovelace"),
        ];
        let m = best_candidate("Ada Lovelace", &list).unwrap();
        assert_eq!(m.id, "A111");
        assert_eq!(m.display_name, "Ada Lovelace");
    }

    #[test]
    fn order_is_irrelevant_when_one_name_is_exact() {
        let list = vec![
            authorship("A222", "A. Lovelace"),
            authorship("A111", "Ada Lovelace"),
        ];
        assert_eq!(best_candidate("Ada Lovelace", &list).unwrap().id, "A111");
    }

    #[test]
    fn abbreviated_target_beats_unrelated_name() {
        // Neither candidate is exact; the abbreviation of the target must
        // still outrank a name with nothing in common.
        let list = vec![
            authorship("A555", "J. Smith"),
            authorship("A222", "A. Lovelace"),
        ];
        let m = best_candidate("Ada Lovelace", &list).unwrap();
        assert_eq!(m.id, "A222");
    }

    #[test]
    fn ties_keep_the_earliest_candidate() {
        let list = vec![
            authorship("A111", "Ada Lovelace"),
            authorship("A222", "Ada Lovelace"),
        ];
        assert_eq!(best_candidate("Ada Lovelace", &list).unwrap().id, "A111");
    }

    #[test]
    fn last_publication_overwrites_earlier_best_match() {
        let lists = vec![
            vec![authorship("A111", "Ada Lovelace")],
            vec![authorship("A222", "A. Lovelace")],
        ];
        // The exact match from the first publication is discarded.
        let m = pick_across_publications("Ada Lovelace", &lists).unwrap();
        assert_eq!(m.id, "A222");
    }

    #[test]
    fn publication_without_candidates_fails_the_author() {
        let lists = vec![vec![authorship("A111", "Ada Lovelace")], vec![]];
        assert_eq!(pick_across_publications("Ada Lovelace", &lists), None);
    }

    #[test]
    fn author_without_publications_is_not_found() {
        let author: Author = serde_json::from_str(r#"{"name": "Ada Lovelace"}"#).unwrap();
        // No titles to search, so no network and no match.
        let client = Client::new("http://127.0.0.1:1");
        assert!(matches!(client.author_by_titles(&author), Ok(None)));
    }
}
