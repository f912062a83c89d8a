// Tue Jan 13 2026 - Alex

use crate::manifest::ManifestError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

// Legacy: "Library.TH1@@Axis:   libHist.so libMatrix.so"
static LEGACY_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Library\.(\S+)").unwrap());
// Modern: "class TH1::Axis"
static MODERN_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^class\s+(.+)$").unwrap());

/// Decodes the class name of a legacy manifest key. The key keeps everything
/// up to its last colon; `@` stands for `:` and `-` for a space.
fn decode_legacy_name(token: &str) -> Option<String> {
    let end = token.rfind(':')?;
    let name: String = token[..end]
        .chars()
        .map(|c| match c {
            '@' => ':',
            '-' => ' ',
            other => other,
        })
        .collect();
    (!name.is_empty()).then_some(name)
}

/// Extracts the class name declared by one manifest line, if any.
pub fn parse_manifest_line(line: &str) -> Option<String> {
    let line = line.trim_end_matches(['\r', '\n']);

    if let Some(captures) = LEGACY_LINE.captures(line) {
        return decode_legacy_name(&captures[1]);
    }

    MODERN_LINE
        .captures(line)
        .map(|captures| captures[1].to_string())
        .filter(|name| !name.trim().is_empty())
}

pub fn parse_manifest_str(content: &str, class_names: &mut BTreeSet<String>) -> usize {
    let before = class_names.len();
    for name in content.lines().filter_map(parse_manifest_line) {
        class_names.insert(name);
    }
    class_names.len() - before
}

pub fn parse_manifest(path: &Path, class_names: &mut BTreeSet<String>) -> Result<usize, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_manifest_str(&content, class_names))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_line() {
        assert_eq!(parse_manifest_line("Library.Foo:   libFoo.so"), Some("Foo".to_string()));
        assert_eq!(
            parse_manifest_line("Library.ns@@Inner:  libNs.so libDep.so"),
            Some("ns::Inner".to_string())
        );
        assert_eq!(
            parse_manifest_line("Library.vector<unsigned-int>: libCore.so"),
            Some("vector<unsigned int>".to_string())
        );
    }

    #[test]
    fn test_legacy_line_without_colon_is_ignored() {
        assert_eq!(parse_manifest_line("Library.Foo libFoo.so"), None);
    }

    #[test]
    fn test_modern_line() {
        assert_eq!(parse_manifest_line("class Bar"), Some("Bar".to_string()));
        assert_eq!(
            parse_manifest_line("class pair<int,float>\r"),
            Some("pair<int,float>".to_string())
        );
    }

    #[test]
    fn test_other_lines_ignored() {
        assert_eq!(parse_manifest_line("[ libBar.so ]"), None);
        assert_eq!(parse_manifest_line("header Bar.h"), None);
        assert_eq!(parse_manifest_line("# comment"), None);
        assert_eq!(parse_manifest_line(""), None);
        assert_eq!(parse_manifest_line("class "), None);
    }

    #[test]
    fn test_parse_manifest_str_dedups() {
        let mut names = BTreeSet::new();
        let added = parse_manifest_str("Library.Foo: libFoo.so\nclass Bar\nclass Foo\n", &mut names);
        assert_eq!(added, 2);
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["Bar", "Foo"]);
    }

    #[test]
    fn test_parse_manifest_missing_file() {
        let mut names = BTreeSet::new();
        let result = parse_manifest(Path::new("/nonexistent/lib.classmap"), &mut names);
        assert!(matches!(result, Err(ManifestError::Io { .. })));
    }
}
