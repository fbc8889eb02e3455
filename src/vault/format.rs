//! Plain-text vault file format.
//!
//! A vault file is an append-only log with one record per line:
//!
//! ```text
//! <site>:<token>\n
//! ```
//!
//! - **site**: the entry name; never contains `:` or control characters.
//! - **token**: base64url of `nonce || ciphertext || tag` (see
//!   `crypto::encryption`).  Split happens at the *first* colon only.
//!
//! There is no header and no trailing checksum; every record carries
//! its own authentication tag.  Blank lines are ignored, lines that are
//! not UTF-8 or lack a colon are skipped with a warning, and a record
//! that fails to decrypt is skipped with a warning so one bad line never
//! hides the rest of the vault.  A later record for the same site supersedes an
//! earlier one.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use crate::crypto::encryption::decrypt_token;
use crate::crypto::keys::VaultKey;
use crate::errors::{Result, VaultError};

/// Separator between site and token.
pub const DELIMITER: char = ':';

/// A non-fatal problem found while scanning a vault file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The line is not UTF-8, has no delimiter, or has an empty site.
    MalformedLine { line: usize },

    /// The token for `site` did not decrypt under the current key.
    Decryption { line: usize, site: String },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLine { line } => write!(f, "skipping malformed line {line}"),
            Self::Decryption { line, site } => {
                write!(f, "could not decrypt entry for site '{site}' (line {line})")
            }
        }
    }
}

/// The decrypted contents of a vault file, in file order.
#[derive(Debug, Default)]
pub struct LoadedRecords {
    /// `(site, plaintext)` pairs that decrypted successfully.
    pub records: Vec<(String, String)>,
    pub warnings: Vec<LoadWarning>,
}

/// Check that `site` can be written as the first field of a record.
pub fn validate_site(site: &str) -> Result<()> {
    if site.is_empty() {
        return Err(VaultError::InvalidSite("site name cannot be empty".into()));
    }
    if site.trim() != site {
        return Err(VaultError::InvalidSite(format!(
            "site name '{site}' has leading or trailing whitespace"
        )));
    }
    if site.contains(DELIMITER) {
        return Err(VaultError::InvalidSite(format!(
            "site name '{site}' cannot contain '{DELIMITER}'"
        )));
    }
    if site.chars().any(char::is_control) {
        return Err(VaultError::InvalidSite(
            "site name cannot contain control characters".into(),
        ));
    }
    Ok(())
}

/// Render one record line, including the trailing newline.
pub fn format_record(site: &str, token: &str) -> String {
    format!("{site}{DELIMITER}{token}\n")
}

/// Split a record line at its first delimiter into trimmed `(site, token)`.
///
/// Returns `None` when there is no delimiter or the site is empty.
pub fn split_record(line: &str) -> Option<(&str, &str)> {
    let (site, token) = line.split_once(DELIMITER)?;
    let site = site.trim();
    if site.is_empty() {
        return None;
    }
    Some((site, token.trim()))
}

/// Create an empty vault file at `path`, truncating any existing one.
pub fn create(path: &Path) -> Result<()> {
    let file = fs::File::create(path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    file.sync_all()?;
    tracing::debug!(path = %path.display(), "vault file created");
    Ok(())
}

/// Append one record line and flush it to stable storage.
///
/// The whole line goes out in a single `write_all` on an append-mode
/// handle, so a successful return means the record survives a crash.
pub fn append_record(path: &Path, site: &str, token: &str) -> io::Result<()> {
    let line = format_record(site, token);

    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    file.write_all(line.as_bytes())?;
    file.sync_data()?;

    tracing::debug!(path = %path.display(), site, "record appended");
    Ok(())
}

/// Read and decrypt every record in the vault file at `path`.
///
/// A missing file is created empty and yields no records.  Only
/// failures to open or read the file are errors; per-line problems
/// become `LoadWarning`s.
pub fn load_all(path: &Path, key: &VaultKey) -> Result<LoadedRecords> {
    if !path.exists() {
        create(path)?;
        return Ok(LoadedRecords::default());
    }

    let reader = BufReader::new(fs::File::open(path)?);
    let mut loaded = LoadedRecords::default();

    // Split on raw bytes so one line of bad UTF-8 is skipped, not fatal.
    for (index, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let line_no = index + 1;

        let Ok(line) = std::str::from_utf8(&raw) else {
            tracing::warn!(line = line_no, "skipping vault line that is not UTF-8");
            loaded
                .warnings
                .push(LoadWarning::MalformedLine { line: line_no });
            continue;
        };

        if line.trim().is_empty() {
            continue;
        }

        let Some((site, token)) = split_record(line) else {
            tracing::warn!(line = line_no, "skipping malformed vault line");
            loaded
                .warnings
                .push(LoadWarning::MalformedLine { line: line_no });
            continue;
        };

        match decrypt_token(key, token) {
            Ok(plaintext) => loaded.records.push((site.to_string(), plaintext)),
            Err(VaultError::DecryptionFailed) => {
                tracing::warn!(line = line_no, site, "skipping record that failed to decrypt");
                loaded.warnings.push(LoadWarning::Decryption {
                    line: line_no,
                    site: site.to_string(),
                });
            }
            Err(other) => return Err(other),
        }
    }

    tracing::debug!(
        path = %path.display(),
        records = loaded.records.len(),
        warnings = loaded.warnings.len(),
        "vault file scanned"
    );
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::encryption::encrypt_token;
    use tempfile::TempDir;

    fn test_key() -> VaultKey {
        VaultKey::new([0x24u8; 32])
    }

    #[test]
    fn split_record_uses_first_colon_only() {
        assert_eq!(split_record("site:abc:def"), Some(("site", "abc:def")));
    }

    #[test]
    fn split_record_trims_fields() {
        assert_eq!(split_record("  a.com : tok \r"), Some(("a.com", "tok")));
    }

    #[test]
    fn split_record_rejects_missing_delimiter_and_empty_site() {
        assert_eq!(split_record("no delimiter here"), None);
        assert_eq!(split_record(":token"), None);
        assert_eq!(split_record("   :token"), None);
    }

    #[test]
    fn format_record_is_one_line() {
        assert_eq!(format_record("a.com", "TOKEN"), "a.com:TOKEN\n");
    }

    #[test]
    fn validate_site_accepts_ordinary_names() {
        assert!(validate_site("example.com").is_ok());
        assert!(validate_site("My Bank").is_ok());
        assert!(validate_site("пример.рф").is_ok());
    }

    #[test]
    fn validate_site_rejects_unrepresentable_names() {
        assert!(validate_site("").is_err());
        assert!(validate_site("a:b").is_err());
        assert!(validate_site("a\nb").is_err());
        assert!(validate_site(" padded ").is_err());
    }

    #[test]
    fn create_truncates_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("v.txt");
        fs::write(&path, "old:data\n").unwrap();

        create(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn append_record_writes_exact_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("v.txt");
        create(&path).unwrap();

        append_record(&path, "a.com", "T1").unwrap();
        append_record(&path, "b.com", "T2").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a.com:T1\nb.com:T2\n");
    }

    #[test]
    fn load_all_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fresh.txt");

        let loaded = load_all(&path, &test_key()).unwrap();
        assert!(loaded.records.is_empty());
        assert!(loaded.warnings.is_empty());
        assert!(path.exists());
    }

    #[test]
    fn load_all_skips_blank_lines_silently() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("v.txt");
        let key = test_key();
        let token = encrypt_token(&key, "pw").unwrap();
        fs::write(&path, format!("\n   \na.com:{token}\n\n")).unwrap();

        let loaded = load_all(&path, &key).unwrap();
        assert_eq!(loaded.records, vec![("a.com".to_string(), "pw".to_string())]);
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn load_all_reports_line_numbers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("v.txt");
        let key = test_key();
        let token = encrypt_token(&key, "pw").unwrap();
        fs::write(&path, format!("a.com:{token}\ngarbage\nb.com:AAAA\n")).unwrap();

        let loaded = load_all(&path, &key).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(
            loaded.warnings,
            vec![
                LoadWarning::MalformedLine { line: 2 },
                LoadWarning::Decryption {
                    line: 3,
                    site: "b.com".into()
                },
            ]
        );
    }

    #[test]
    fn load_all_skips_line_that_is_not_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("v.txt");
        let key = test_key();
        let token = encrypt_token(&key, "pw").unwrap();

        let mut bytes = b"bad\xff.com:AAAA\n".to_vec();
        bytes.extend_from_slice(format!("a.com:{token}").as_bytes());
        fs::write(&path, bytes).unwrap();

        let loaded = load_all(&path, &key).unwrap();
        assert_eq!(loaded.records, vec![("a.com".to_string(), "pw".to_string())]);
        assert_eq!(loaded.warnings, vec![LoadWarning::MalformedLine { line: 1 }]);
    }

    #[test]
    fn load_all_fails_when_path_is_a_directory() {
        let dir = TempDir::new().unwrap();
        let result = load_all(dir.path(), &test_key());
        assert!(matches!(result, Err(VaultError::Io(_))));
    }

    #[test]
    fn warnings_render_without_line_contents() {
        let w = LoadWarning::Decryption {
            line: 7,
            site: "a.com".into(),
        };
        assert_eq!(
            w.to_string(),
            "could not decrypt entry for site 'a.com' (line 7)"
        );
        assert_eq!(
            LoadWarning::MalformedLine { line: 2 }.to_string(),
            "skipping malformed line 2"
        );
    }
}
