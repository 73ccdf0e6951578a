use std::fs::{create_dir_all, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::author::Person;

/// Loads a committee roster CSV with at least `first` and `last` columns.
pub fn roster(path: &Path) -> Result<Vec<Person>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("cannot open roster {}", path.display()))?;
    reader
        .deserialize()
        .collect::<Result<Vec<Person>, _>>()
        .with_context(|| format!("bad roster row in {}", path.display()))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file =
        File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Rewrites the artifact in full. Callers invoke this after every record,
/// so an interrupted run keeps everything already written.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent() {
        create_dir_all(dir)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}

pub fn publication_path(out_dir: &Path, name: &str) -> PathBuf {
    out_dir.join(format!("{name}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn roster_parses_names_and_optional_email() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pc.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "first,last,email").unwrap();
        writeln!(file, "Ada,Lovelace,ada@example.org").unwrap();
        writeln!(file, "Grace,Hopper,").unwrap();

        let people = roster(&path).unwrap();
        assert_eq!(people.len(), 2);
        assert_eq!(people[0].name(), "Ada Lovelace");
        assert_eq!(people[0].email, "ada@example.org");
        assert_eq!(people[1].email, "");
    }

    #[test]
    fn roster_without_email_column_still_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pc.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "first,last").unwrap();
        writeln!(file, "Ada,Lovelace").unwrap();

        let people = roster(&path).unwrap();
        assert_eq!(people[0].name(), "Ada Lovelace");
    }

    #[test]
    fn write_json_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        write_json(&path, &vec!["x"]).unwrap();
        let back: Vec<String> = read_json(&path).unwrap();
        assert_eq!(back, vec!["x"]);
    }
}
