//! Per-directory checksum manifests (`sha1sum`-style listings).
//!
//! One row per file: `<hex digest> <filename>`, whitespace separated. The
//! archive publishes one manifest per spectra directory; it is downloaded once
//! and reused for every file in that directory.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::checksum::HashAlgorithm;
use crate::error::FetchError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumManifest {
    entries: HashMap<String, String>,
}

impl ChecksumManifest {
    /// Parses manifest text. Blank lines and `#` comments are ignored, a leading
    /// `*` (binary-mode marker) on the filename is stripped, and rows whose digest
    /// is not `algorithm`-sized hex are skipped with a warning.
    pub fn parse(text: &str, algorithm: HashAlgorithm) -> Self {
        let mut entries = HashMap::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut cols = line.split_whitespace();
            let (digest, name) = match (cols.next(), cols.next()) {
                (Some(d), Some(n)) => (d, n.trim_start_matches('*')),
                _ => {
                    tracing::warn!(line = lineno + 1, "malformed manifest row skipped");
                    continue;
                }
            };
            if digest.len() != algorithm.hex_len() || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
                tracing::warn!(line = lineno + 1, %algorithm, "manifest row with bad digest skipped");
                continue;
            }
            entries.insert(name.to_string(), digest.to_ascii_lowercase());
        }
        Self { entries }
    }

    pub fn load(path: &Path, algorithm: HashAlgorithm) -> Result<Self, FetchError> {
        let text = fs::read_to_string(path).map_err(|e| FetchError::Unreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self::parse(&text, algorithm))
    }

    /// Digest recorded for `filename`, also matching rows that list it under a
    /// relative path (`stars/apo25m/.../<filename>`).
    pub fn lookup(&self, filename: &str) -> Option<&str> {
        if let Some(d) = self.entries.get(filename) {
            return Some(d);
        }
        let suffix = format!("/{filename}");
        self.entries
            .iter()
            .find(|(name, _)| name.ends_with(&suffix))
            .map(|(_, d)| d.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
