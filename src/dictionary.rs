//! Common-password dictionary
//!
//! Handles loading the word list used by the substitution detector.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Words that are always in the dictionary, loaded list or not.
const SEED_WORDS: [&str; 10] = [
    "password", "letmein", "welcome", "admin", "monkey", "dragon", "master", "hello", "love",
    "abc123",
];

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Dictionary file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read dictionary file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Dictionary file is empty")]
    EmptyFile,
}

/// Returns the dictionary file path.
///
/// Priority:
/// 1. Environment variable `PWD_DICTIONARY_PATH`
/// 2. Default path `./assets/common_passwords.csv`
pub fn get_dictionary_path() -> PathBuf {
    std::env::var("PWD_DICTIONARY_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./assets/common_passwords.csv"))
}

/// Lower-cased set of common base words and passwords.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Dictionary {
    /// Dictionary holding only the seed words.
    pub fn builtin() -> Self {
        Self {
            words: SEED_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Seed words plus the first field of every record in `content`.
    ///
    /// Records are newline separated; fields are comma separated. Blank
    /// first fields are skipped.
    pub fn parse(content: &str) -> Self {
        let mut dictionary = Self::builtin();
        dictionary.words.extend(
            content
                .lines()
                .filter_map(|line| line.split(',').next())
                .map(|field| field.trim().to_lowercase())
                .filter(|field| !field.is_empty()),
        );
        dictionary
    }

    /// Loads a dictionary from a delimited text file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File does not exist
    /// - File cannot be read
    /// - File is empty
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DictionaryError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;

        if content.trim().is_empty() {
            return Err(DictionaryError::EmptyFile);
        }

        let dictionary = Self::parse(&content);

        #[cfg(feature = "tracing")]
        tracing::info!(
            "Dictionary initialized: {} words from {:?}",
            dictionary.len(),
            path
        );

        Ok(dictionary)
    }

    /// Loads from `path`, falling back to [`Dictionary::builtin`] on any error.
    pub fn load_or_builtin<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_path(path) {
            Ok(dictionary) => dictionary,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_e, "Dictionary unavailable, using built-in words");
                Self::builtin()
            }
        }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
