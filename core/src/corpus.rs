//! Loading documents from `.json` / `.jsonl` files.
//!
//! A `.json` file holds one document object or an array of them; a `.jsonl`
//! file holds one object per line. Each object is `{"id": u32, "content": str}`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{IndexError, Result};
use crate::Document;

/// Load every document under `path` (a file or a directory walked
/// recursively). Files are read in sorted path order.
pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let mut files: Vec<PathBuf> = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(extension(p), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else {
        files.push(path.to_path_buf());
    }

    let mut docs = Vec::new();
    for file in &files {
        if extension(file) == Some("jsonl") {
            load_jsonl(file, &mut docs)?;
        } else {
            load_json(file, &mut docs)?;
        }
    }
    tracing::info!(files = files.len(), documents = docs.len(), "loaded corpus");
    Ok(docs)
}

fn extension(p: &Path) -> Option<&str> {
    p.extension().and_then(|s| s.to_str())
}

fn json_error(path: &Path) -> impl FnOnce(serde_json::Error) -> IndexError + '_ {
    move |source| IndexError::Json { path: path.to_path_buf(), source }
}

fn load_jsonl(file: &Path, docs: &mut Vec<Document>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        docs.push(serde_json::from_str(&line).map_err(json_error(file))?);
    }
    Ok(())
}

fn load_json(file: &Path, docs: &mut Vec<Document>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader).map_err(json_error(file))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                docs.push(serde_json::from_value(v).map_err(json_error(file))?);
            }
        }
        other => docs.push(serde_json::from_value(other).map_err(json_error(file))?),
    }
    Ok(())
}
