use anyhow::{anyhow, Context, Result};
use std::ffi::OsStr;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Cursor};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{ARCHIVE_MEMBER, INPUT_EXTENSIONS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Plain(PathBuf),
    Archive(PathBuf),
}

impl InputSource {
    fn from_path(path: PathBuf) -> Self {
        if path.extension() == Some(OsStr::new("7z")) {
            InputSource::Archive(path)
        } else {
            InputSource::Plain(path)
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            InputSource::Plain(p) | InputSource::Archive(p) => p,
        }
    }
}

fn has_input_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| INPUT_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

fn scan_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.with_context(|| format!("walk {}", dir.display()))?;
        if entry.file_type().is_file() && has_input_extension(entry.path()) {
            found.push(entry.path().to_path_buf());
        }
    }
    found.sort();
    Ok(found)
}

/// Expands the given inputs into sources, keeping argument order. Directory
/// contents are sorted by path.
pub fn collect_sources(inputs: &[PathBuf]) -> Result<Vec<InputSource>> {
    let mut sources = Vec::new();
    for input in inputs {
        if !input.exists() {
            return Err(anyhow!("input path not found: {}", input.display()));
        }
        if input.is_dir() {
            let found = scan_dir(input)?;
            if found.is_empty() {
                return Err(anyhow!(
                    "no input files found under: {} (expected .txt files or .7z archives)",
                    input.display()
                ));
            }
            sources.extend(found.into_iter().map(InputSource::from_path));
        } else {
            sources.push(InputSource::from_path(input.clone()));
        }
    }
    Ok(sources)
}

pub fn open_source(source: &InputSource) -> Result<Box<dyn BufRead>> {
    match source {
        InputSource::Plain(p) => {
            let file =
                fs::File::open(p).with_context(|| format!("failed to open {}", p.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        InputSource::Archive(p) => {
            let data = extract_records_from_7z(p)?;
            Ok(Box::new(Cursor::new(data)))
        }
    }
}

pub fn open_output(path: &Path, append: bool) -> Result<BufWriter<fs::File>> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .with_context(|| format!("failed to open output {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn archive_reader(path: &Path) -> Result<sevenz_rust::SevenZReader<fs::File>> {
    let file =
        fs::File::open(path).with_context(|| format!("failed to open archive {}", path.display()))?;
    let len = file
        .metadata()
        .with_context(|| format!("failed to stat archive {}", path.display()))?
        .len();
    sevenz_rust::SevenZReader::new(file, len, sevenz_rust::Password::empty())
        .with_context(|| format!("failed to create 7z reader for {}", path.display()))
}

fn is_preferred_member(name: &str) -> bool {
    name.rsplit('/').next() == Some(ARCHIVE_MEMBER)
}

/// Among non-preferred `.txt` members the shortest name wins, ties by name.
fn beats_fallback(name: &str, current: Option<&str>) -> bool {
    match current {
        None => true,
        Some(cur) => (name.len(), name) < (cur.len(), cur),
    }
}

/// Reads `itcont.txt` from the archive, or the fallback `.txt` member when
/// there is none, in a single pass over the entries.
fn extract_records_from_7z(archive_path: &Path) -> Result<Vec<u8>> {
    let mut seven = archive_reader(archive_path)?;
    let mut fallback: Option<(String, Vec<u8>)> = None;
    let mut preferred: Option<Vec<u8>> = None;

    seven
        .for_each_entries(|entry, reader| {
            let name = entry.name();
            if !name.ends_with(".txt") {
                return Ok(true);
            }
            if is_preferred_member(name) {
                let mut out = Vec::new();
                reader.read_to_end(&mut out)?;
                preferred = Some(out);
                return Ok(false);
            }
            if beats_fallback(name, fallback.as_ref().map(|(n, _)| n.as_str())) {
                let mut out = Vec::new();
                reader.read_to_end(&mut out)?;
                fallback = Some((name.to_string(), out));
            }
            Ok(true)
        })
        .with_context(|| format!("failed to read entries of {}", archive_path.display()))?;

    preferred
        .or_else(|| fallback.map(|(_, data)| data))
        .ok_or_else(|| anyhow!("no .txt member found in archive {}", archive_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_member_selection() {
        assert!(is_preferred_member("itcont.txt"));
        assert!(is_preferred_member("data/itcont.txt"));
        assert!(!is_preferred_member("data/itcont.txt.bak"));
        assert!(!is_preferred_member("old_itcont.txt"));

        assert!(beats_fallback("long_name.txt", None));
        assert!(beats_fallback("ab.txt", Some("long_name.txt")));
        assert!(beats_fallback("ab.txt", Some("bb.txt")));
        assert!(!beats_fallback("bb.txt", Some("ab.txt")));
    }

    #[test]
    fn test_collect_sources_keeps_argument_order() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("batch");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("b.txt"), "").unwrap();
        fs::write(sub.join("a.txt"), "").unwrap();
        fs::write(sub.join("readme.md"), "").unwrap();
        fs::write(sub.join("c.7z"), "").unwrap();
        let single = dir.path().join("z.txt");
        fs::write(&single, "").unwrap();

        let sources = collect_sources(&[single.clone(), sub.clone()]).unwrap();
        assert_eq!(
            sources,
            vec![
                InputSource::Plain(single),
                InputSource::Plain(sub.join("a.txt")),
                InputSource::Plain(sub.join("b.txt")),
                InputSource::Archive(sub.join("c.7z")),
            ]
        );
    }

    #[test]
    fn test_collect_sources_missing_path() {
        let dir = tempdir().unwrap();
        assert!(collect_sources(&[dir.path().join("missing.txt")]).is_err());
        assert!(collect_sources(&[dir.path().to_path_buf()]).is_err());
    }
}
