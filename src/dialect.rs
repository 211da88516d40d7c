//! CSV dialect and encoding detection.
//!
//! A file's dialect (delimiter plus newline convention) is inferred once per
//! read from a bounded prefix of the raw bytes, never re-derived mid-parse.
//! Detection has one side effect: a semicolon-delimited file is rewritten in
//! place with commas, so downstream consumers always see the canonical
//! delimiter. The rewrite is byte-level and idempotent.

use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::{DialectError, DialectResult};

/// Number of raw bytes sampled for detection.
pub const SAMPLE_LEN: u64 = 512;

/// Candidate delimiters, most common first.
const CANDIDATES: [char; 4] = [',', ';', '\t', '|'];

/// Newline convention observed in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Crlf,
    Lf,
    Cr,
    Unknown,
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Crlf => "Windows (CRLF)",
            Self::Lf => "Unix (LF)",
            Self::Cr => "Mac (CR)",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A CSV file's delimiter and line-ending convention.
///
/// `delimiter` is `None` when the sample was too small or too irregular to
/// classify; parsing then falls back to the comma default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvDialect {
    pub delimiter: Option<char>,
    pub line_ending: LineEnding,
}

impl CsvDialect {
    /// Delimiter to parse with, falling back to the canonical comma.
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.unwrap_or(',') as u8
    }
}

/// Detect a file's CSV dialect, normalizing a semicolon delimiter in place.
pub fn detect<P: AsRef<Path>>(path: P) -> DialectResult<CsvDialect> {
    let path = path.as_ref();
    let sample = read_sample(path)?;
    let mut delimiter = detect_delimiter(&String::from_utf8_lossy(&sample));

    if delimiter == Some(';') {
        normalize_delimiter(path)?;
        delimiter = Some(',');
    }

    // Reopen after any rewrite and classify the newline convention actually
    // present on disk.
    let sample = read_sample(path)?;
    let line_ending = detect_line_ending(&sample);

    Ok(CsvDialect {
        delimiter,
        line_ending,
    })
}

fn read_sample(path: &Path) -> DialectResult<Vec<u8>> {
    let file = fs::File::open(path).map_err(|source| DialectError::Sample {
        path: path.to_path_buf(),
        source,
    })?;
    let mut sample = Vec::new();
    file.take(SAMPLE_LEN)
        .read_to_end(&mut sample)
        .map_err(|source| DialectError::Sample {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(sample)
}

/// Pick the candidate delimiter yielding a consistent, non-zero field count
/// across the sampled lines. `None` when nothing qualifies.
pub fn detect_delimiter(sample: &str) -> Option<char> {
    let mut lines: Vec<&str> = sample.lines().collect();
    // The sample may end mid-record; drop the truncated last line when there
    // is more than one to judge from.
    if !sample.ends_with('\n') && !sample.ends_with('\r') && lines.len() > 1 {
        lines.pop();
    }
    lines.retain(|line| !line.trim().is_empty());
    if lines.is_empty() {
        return None;
    }

    let mut best: Option<(char, usize)> = None;
    for candidate in CANDIDATES {
        let first = lines[0].matches(candidate).count();
        if first == 0 {
            continue;
        }
        if lines
            .iter()
            .any(|line| line.matches(candidate).count() != first)
        {
            continue;
        }
        if best.map_or(true, |(_, count)| first > count) {
            best = Some((candidate, first));
        }
    }
    best.map(|(delimiter, _)| delimiter)
}

/// Rewrite the file in place, replacing every semicolon with a comma.
///
/// Byte-level, so the file's encoding is untouched. Running it on an
/// already-comma-delimited file changes nothing.
pub fn normalize_delimiter(path: &Path) -> DialectResult<()> {
    let bytes = fs::read(path).map_err(|source| DialectError::Rewrite {
        path: path.to_path_buf(),
        source,
    })?;
    if !bytes.contains(&b';') {
        return Ok(());
    }
    let rewritten: Vec<u8> = bytes
        .into_iter()
        .map(|b| if b == b';' { b',' } else { b })
        .collect();
    fs::write(path, rewritten).map_err(|source| DialectError::Rewrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Classify the newline convention present in the raw bytes.
pub fn detect_line_ending(sample: &[u8]) -> LineEnding {
    if sample.windows(2).any(|pair| pair == b"\r\n") {
        LineEnding::Crlf
    } else if sample.contains(&b'\n') {
        LineEnding::Lf
    } else if sample.contains(&b'\r') {
        LineEnding::Cr
    } else {
        LineEnding::Unknown
    }
}

/// Detect the encoding of raw bytes using chardet, normalizing charset names.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let (charset, _, _) = chardet::detect(bytes);
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes using the named encoding, falling back to lossy UTF-8.
pub fn decode(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::ISO_8859_15.decode(bytes).0.into_owned(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_detect_delimiter_comma() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3\n"), Some(','));
    }

    #[test]
    fn test_detect_delimiter_semicolon() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3\n"), Some(';'));
    }

    #[test]
    fn test_detect_delimiter_tab_and_pipe() {
        assert_eq!(detect_delimiter("a\tb\n1\t2\n"), Some('\t'));
        assert_eq!(detect_delimiter("a|b\n1|2\n"), Some('|'));
    }

    #[test]
    fn test_inconsistent_counts_disqualify_candidate() {
        // Semicolon counts differ per line; comma stays consistent.
        assert_eq!(detect_delimiter("a,b;c\n1,2\n3,4\n"), Some(','));
    }

    #[test]
    fn test_irregular_sample_yields_unknown() {
        assert_eq!(detect_delimiter("just one header\n"), None);
        assert_eq!(detect_delimiter(""), None);
    }

    #[test]
    fn test_truncated_last_line_is_ignored() {
        // Final line cut mid-record by the sample boundary.
        assert_eq!(detect_delimiter("a,b,c\n1,2,3\n4,5"), Some(','));
    }

    #[test]
    fn test_detect_line_ending() {
        assert_eq!(detect_line_ending(b"a,b\r\n1,2\r\n"), LineEnding::Crlf);
        assert_eq!(detect_line_ending(b"a,b\n1,2\n"), LineEnding::Lf);
        assert_eq!(detect_line_ending(b"a,b\r1,2\r"), LineEnding::Cr);
        assert_eq!(detect_line_ending(b"a,b"), LineEnding::Unknown);
    }

    #[test]
    fn test_semicolon_file_is_normalized_in_place() {
        let file = file_with("col1;col2\n1;2\n3;4\n");
        let dialect = detect(file.path()).unwrap();

        assert_eq!(dialect.delimiter, Some(','));
        let content = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(content, "col1,col2\n1,2\n3,4\n");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let file = file_with("col1;col2\n1;2\n");
        detect(file.path()).unwrap();
        let first_pass = std::fs::read(file.path()).unwrap();

        let dialect = detect(file.path()).unwrap();
        let second_pass = std::fs::read(file.path()).unwrap();

        assert_eq!(dialect.delimiter, Some(','));
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn test_comma_file_left_untouched() {
        let file = file_with("a,b\n1,2\n");
        let before = std::fs::read(file.path()).unwrap();
        detect(file.path()).unwrap();
        assert_eq!(std::fs::read(file.path()).unwrap(), before);
    }

    #[test]
    fn test_unknown_dialect_falls_back_to_comma() {
        let dialect = CsvDialect {
            delimiter: None,
            line_ending: LineEnding::Unknown,
        };
        assert_eq!(dialect.delimiter_byte(), b',');
    }

    #[test]
    fn test_detect_encoding_utf8() {
        assert_eq!(detect_encoding("name,age\nAlice,30\n".as_bytes()), "utf-8");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode(bytes, "iso-8859-1");
        assert!(decoded.starts_with("Soci"));
        assert_eq!(decoded.chars().count(), 7);
    }
}
