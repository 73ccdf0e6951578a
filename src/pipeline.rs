use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, warn};

use crate::author::{Author, RosterRecord};
use crate::lookup::{dblp, openalex, scholar};
use crate::ops;

fn progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}").unwrap());
    bar
}

/// Resolves DBLP and Google Scholar identifiers for every person in a
/// roster. The output is checkpointed after each record, and records
/// already present in it are not looked up again.
pub fn resolve_roster(roster_path: &Path, out_path: &Path, fresh: bool) -> Result<()> {
    let people = ops::roster(roster_path)?;
    let mut records: Vec<RosterRecord> = if !fresh && out_path.exists() {
        ops::read_json(out_path)?
    } else {
        Vec::new()
    };

    let bar = progress_bar(people.len() as u64);
    for person in people {
        let name = person.name();
        bar.set_message(name.clone());
        bar.inc(1);
        if records.iter().any(|r| r.name == name) {
            info!(name = %name, "already resolved, skipping");
            continue;
        }

        let mut record = RosterRecord {
            name: name.clone(),
            dblp: String::new(),
            google_scholar: String::new(),
        };
        match dblp::resolve(&person.first, &person.last) {
            Ok(Some(m)) => record.dblp = m.id,
            Ok(None) => warn!(name = %name, "cannot find dblp match"),
            Err(e) => error!(name = %name, error = %e, "dblp lookup failed"),
        }
        match scholar::resolve(&person.first, &person.last) {
            Ok(Some(m)) => record.google_scholar = m.id,
            Ok(None) => warn!(name = %name, "cannot find google scholar profile"),
            Err(e) => error!(name = %name, error = %e, "google scholar lookup failed"),
        }

        records.push(record);
        ops::write_json(out_path, &records)?;
    }
    bar.finish_and_clear();
    Ok(())
}

/// Attaches OpenAlex identifiers to every author in the merged file. Output
/// is a name-keyed mapping, checkpointed after each author; authors the
/// title search cannot place are logged and left out, so a later run tries
/// them again.
pub fn resolve_openalex(
    client: &openalex::Client,
    pc_file: &Path,
    out_path: &Path,
    fresh: bool,
) -> Result<()> {
    let authors: Vec<Author> = ops::read_json(pc_file)?;
    let mut resolved: BTreeMap<String, Author> = if !fresh && out_path.exists() {
        ops::read_json(out_path)?
    } else {
        BTreeMap::new()
    };

    let bar = progress_bar(authors.len() as u64);
    for mut author in authors {
        bar.set_message(author.name.clone());
        bar.inc(1);
        if resolved.contains_key(&author.name) {
            info!(name = %author.name, "already resolved, skipping");
            continue;
        }

        match client.author_by_titles(&author) {
            Ok(Some(m)) => {
                info!(name = %author.name, id = %m.id, openalex_name = %m.display_name, "openalex match");
                author.openalex_id = m.id;
                author.openalex_name = m.display_name;
                resolved.insert(author.name.clone(), author);
                ops::write_json(out_path, &resolved)?;
            }
            Ok(None) => info!(name = %author.name, "could not find openalex id"),
            Err(e) => error!(name = %author.name, error = %e, "openalex lookup failed"),
        }
    }
    bar.finish_and_clear();
    Ok(())
}

/// Downloads one page of publication metadata per resolved author.
pub fn download_publications(
    client: &openalex::Client,
    pc_file: &Path,
    out_dir: &Path,
    count: usize,
    force: bool,
) -> Result<()> {
    let authors: BTreeMap<String, Author> = ops::read_json(pc_file)?;
    for author in authors.values() {
        download_author(client, author, out_dir, count, force)?;
    }
    Ok(())
}

fn download_author(
    client: &openalex::Client,
    author: &Author,
    out_dir: &Path,
    count: usize,
    force: bool,
) -> Result<()> {
    let out_file = ops::publication_path(out_dir, &author.name);
    if out_file.exists() && !force {
        info!(name = %author.name, "found publication records, skipping");
        return Ok(());
    }
    if author.openalex_id.is_empty() {
        warn!(name = %author.name, "no openalex id, skipping");
        return Ok(());
    }

    let publications = client.works(&author.openalex_id, count)?;
    info!(name = %author.name, publications = publications.len(), "downloaded publications");
    persist_publications(&author.name, publications, count, &out_file)
}

/// Hard-stops on an empty page; a full page only warns, since the service
/// may hold more records than the single page we request.
fn persist_publications(
    name: &str,
    publications: Vec<serde_json::Value>,
    requested: usize,
    out_file: &Path,
) -> Result<()> {
    if publications.is_empty() {
        bail!("no publications returned for {name}");
    }
    if publications.len() == requested {
        warn!(
            name = %name,
            requested,
            got = publications.len(),
            "page came back full, potentially more publications to get"
        );
    }
    ops::write_json(out_file, &publications)
}
