pub mod dblp;
pub mod openalex;
pub mod scholar;

use thiserror::Error;

/// A resolved identifier for one external service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub id: String,
    pub display_name: String,
}

/// Failures that are not "no match found". Callers that want to retry
/// should retry `Unreachable` only; `Malformed` will not get better on a
/// second attempt.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("service unreachable: {0}")]
    Unreachable(#[from] Box<ureq::Error>),
    #[error("malformed response: {0}")]
    Malformed(#[from] std::io::Error),
}

/// "Not found" is `Ok(None)`, distinct from the service being down.
pub type LookupResult = Result<Option<Match>, LookupError>;

pub(crate) fn get_text(url: &str) -> Result<String, LookupError> {
    Ok(ureq::get(url)
        .set("Accept", "text/html; charset=utf-8")
        .call()
        .map_err(Box::new)?
        .into_string()?)
}

pub(crate) fn get_json(url: &str) -> Result<serde_json::Value, LookupError> {
    Ok(ureq::get(url)
        .set("Accept", "application/json; charset=utf-8")
        .call()
        .map_err(Box::new)?
        .into_json()?)
}
