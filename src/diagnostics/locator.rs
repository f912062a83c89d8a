// Wed Jan 15 2026 - Alex

use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineLookup {
    /// 1-based line of the first match, 0 if nothing matched.
    Line(usize),
    /// The matching line carries the suppression marker.
    Suppressed,
}

/// Turns the declaring-file hints of the dictionary into real paths and
/// finds the line a finding belongs to.
#[derive(Debug, Clone, Default)]
pub struct SourceLocator {
    search_paths: Vec<PathBuf>,
    stripped_paths: Vec<PathBuf>,
}

impl SourceLocator {
    pub fn new(search_paths: Vec<PathBuf>, stripped_paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths,
            stripped_paths,
        }
    }

    /// Directories tried for a hint that does not exist as given: the hint's
    /// own directory, the working directory, then the search paths minus the
    /// stripped ones.
    fn candidate_dirs(&self, hint: &Path) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(parent) = hint.parent().filter(|p| !p.as_os_str().is_empty()) {
            dirs.push(parent.to_path_buf());
        }
        dirs.push(PathBuf::from("."));
        dirs.extend(
            self.search_paths
                .iter()
                .filter(|dir| !self.is_stripped(dir))
                .cloned(),
        );
        dirs
    }

    fn is_stripped(&self, dir: &Path) -> bool {
        self.stripped_paths
            .iter()
            .any(|stripped| stripped.components().eq(dir.components()))
    }

    /// Resolved path of `hint`, or the hint verbatim when it cannot be found.
    pub fn resolve(&self, hint: &str) -> PathBuf {
        let hint_path = Path::new(hint);
        if hint.is_empty() || hint_path.exists() {
            return hint_path.to_path_buf();
        }

        if hint_path.is_relative() {
            for dir in self.candidate_dirs(hint_path) {
                let candidate = dir.join(hint_path);
                if candidate.is_file() {
                    log::debug!("Resolved '{}' to '{}'", hint, candidate.display());
                    return candidate;
                }
            }
        }
        log::debug!("Could not resolve '{}'", hint);
        hint_path.to_path_buf()
    }

    /// Scans `path` for the first line matching `pattern`.
    pub fn find_line(path: &Path, pattern: &Regex, marker: &str) -> LineLookup {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(_) => return LineLookup::Line(0),
        };

        let mut reader = BufReader::new(file);
        let mut raw = Vec::new();
        let mut number = 0;
        loop {
            raw.clear();
            match reader.read_until(b'\n', &mut raw) {
                Ok(0) | Err(_) => break,
                Ok(_) => number += 1,
            }
            // Headers are not always UTF-8; undecodable bytes never belong to
            // an identifier or the marker.
            let mut line = String::from_utf8_lossy(&raw).into_owned();
            // Lines are matched with their terminator, a member declared last on
            // a line still ends in a non-identifier character.
            if !line.ends_with('\n') {
                line.push('\n');
            }
            if pattern.is_match(&line) {
                if line.contains(marker) {
                    return LineLookup::Suppressed;
                }
                return LineLookup::Line(number);
            }
        }
        LineLookup::Line(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_resolve_existing_path() {
        let dir = tempfile::tempdir().unwrap();
        let header = dir.path().join("Foo.h");
        fs::write(&header, "class Foo {};\n").unwrap();

        let locator = SourceLocator::default();
        assert_eq!(locator.resolve(header.to_str().unwrap()), header);
    }

    #[test]
    fn test_resolve_through_search_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("pkg")).unwrap();
        let header = dir.path().join("pkg/Foo.h");
        fs::write(&header, "class Foo {};\n").unwrap();

        let locator = SourceLocator::new(vec![dir.path().to_path_buf()], Vec::new());
        assert_eq!(locator.resolve("pkg/Foo.h"), header);
    }

    #[test]
    fn test_stripped_search_path_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Hidden.h"), "class Hidden {};\n").unwrap();

        let locator = SourceLocator::new(vec![dir.path().to_path_buf()], vec![dir.path().to_path_buf()]);
        assert_eq!(locator.resolve("Hidden.h"), PathBuf::from("Hidden.h"));
    }

    #[test]
    fn test_unresolvable_hint_kept_verbatim() {
        let locator = SourceLocator::default();
        assert_eq!(locator.resolve("does/not/Exist.h"), PathBuf::from("does/not/Exist.h"));
    }

    #[test]
    fn test_find_line() {
        let dir = tempfile::tempdir().unwrap();
        let header = dir.path().join("Foo.h");
        fs::write(
            &header,
            "class Foo {\n   int fX;\n   int fXY; // static-analyzer: ignore\n   int fY;\n};\n",
        )
        .unwrap();

        let marker = "static-analyzer: ignore";
        let fx = Regex::new(r".*[^_a-zA-Z]fX[^_a-zA-Z0-9].*").unwrap();
        assert_eq!(SourceLocator::find_line(&header, &fx, marker), LineLookup::Line(2));

        let fxy = Regex::new(r".*[^_a-zA-Z]fXY[^_a-zA-Z0-9].*").unwrap();
        assert_eq!(SourceLocator::find_line(&header, &fxy, marker), LineLookup::Suppressed);

        let missing = Regex::new("fZ").unwrap();
        assert_eq!(SourceLocator::find_line(&header, &missing, marker), LineLookup::Line(0));
    }

    #[test]
    fn test_find_line_past_non_utf8_lines() {
        let dir = tempfile::tempdir().unwrap();
        let header = dir.path().join("Foo.h");
        fs::write(
            &header,
            b"// Author: Ren\xe9\n class Foo {\n int fQuiet; // static-analyzer: ignore\n int fLoud;\n};",
        )
        .unwrap();

        let marker = "static-analyzer: ignore";
        let quiet = Regex::new(r".*[^_a-zA-Z]fQuiet[^_a-zA-Z0-9].*").unwrap();
        let loud = Regex::new(r".*[^_a-zA-Z]fLoud[^_a-zA-Z0-9].*").unwrap();
        assert_eq!(SourceLocator::find_line(&header, &quiet, marker), LineLookup::Suppressed);
        assert_eq!(SourceLocator::find_line(&header, &loud, marker), LineLookup::Line(4));
    }

    #[test]
    fn test_find_line_last_line_without_newline() {
        let dir = tempfile::tempdir().unwrap();
        let header = dir.path().join("Bar.h");
        fs::write(&header, "class Bar {\n int fLast;").unwrap();

        let re = Regex::new(r".*[^_a-zA-Z]fLast[^_a-zA-Z0-9].*").unwrap();
        assert_eq!(SourceLocator::find_line(&header, &re, "ignore"), LineLookup::Line(2));
    }

    #[test]
    fn test_find_line_unreadable_file() {
        let re = Regex::new("x").unwrap();
        assert_eq!(
            SourceLocator::find_line(Path::new("/nonexistent/Foo.h"), &re, "ignore"),
            LineLookup::Line(0)
        );
    }
}
