// Shared primitives for the question file readers.

use std::fs;

use log::debug;
use snafu::prelude::*;

use crate::app::*;

/// Reads a text file, trying the two candidate encodings of the source
/// data in sequence: UTF-8 (with an optional BOM) first, then EUC-KR/CP949.
pub fn read_decoded(path: &str) -> AppResult<String> {
    let bytes = fs::read(path).context(OpeningFileSnafu {
        path: path.to_string(),
    })?;
    if let Ok(s) = std::str::from_utf8(&bytes) {
        return Ok(s.trim_start_matches('\u{feff}').to_string());
    }
    let (decoded, _, had_errors) = encoding_rs::EUC_KR.decode(&bytes);
    if had_errors {
        return BadEncodingSnafu {
            path: path.to_string(),
        }
        .fail();
    }
    debug!("read_decoded: {:?} decoded as euc-kr", path);
    Ok(decoded.into_owned())
}

/// Artifact columns produced by spreadsheet exports ("Unnamed: 3" and the
/// like) are stripped before the header is interpreted.
pub fn is_artifact_column(name: &str) -> bool {
    let trimmed = name.trim();
    trimmed.is_empty() || trimmed.starts_with("Unnamed")
}

/// Interprets a cell as a single-letter code.
pub fn single_letter(s: &str) -> Option<char> {
    let trimmed = s.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
        _ => None,
    }
}

/// The placeholder prompt for rows with an empty question cell.
pub fn default_prompt(id: u32) -> String {
    format!("Question {}", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_with_bom_is_stripped() {
        let dir = std::env::temp_dir().join("typetally_io_common_tests");
        fs::create_dir_all(&dir).unwrap();
        let p = dir.join("bom.csv");
        fs::write(&p, b"\xef\xbb\xbfid,code\n1,E\n").unwrap();
        let text = read_decoded(p.to_str().unwrap()).unwrap();
        assert!(text.starts_with("id,code"));
    }

    #[test]
    fn euc_kr_fallback_decodes() {
        let dir = std::env::temp_dir().join("typetally_io_common_tests");
        fs::create_dir_all(&dir).unwrap();
        let p = dir.join("euckr.csv");
        // 0xB0 0xA1 is the EUC-KR encoding of the syllable U+AC00.
        fs::write(&p, [0xB0u8, 0xA1u8]).unwrap();
        let text = read_decoded(p.to_str().unwrap()).unwrap();
        assert_eq!(text, "\u{ac00}");
    }

    #[test]
    fn artifact_columns_are_detected() {
        assert!(is_artifact_column("Unnamed: 7"));
        assert!(is_artifact_column("  "));
        assert!(!is_artifact_column("dimension_pair"));
    }

    #[test]
    fn single_letter_cells() {
        assert_eq!(single_letter(" e "), Some('E'));
        assert_eq!(single_letter("EI"), None);
        assert_eq!(single_letter(""), None);
        assert_eq!(single_letter("3"), None);
    }
}
