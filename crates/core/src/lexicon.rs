//! Static word lexicon.
//!
//! A [`Lexicon`] maps a lowercase source word to exactly one target string.
//! The English to Urdu table ships inside the crate as `data/en_ur.json` and is
//! parsed on first use. Lexicons are immutable once built, so a single
//! instance can be shared by any number of translators and threads.
//!
//! # Example
//!
//! ```rust
//! use tersa_core::Lexicon;
//!
//! let lexicon = Lexicon::english_urdu();
//! assert_eq!(lexicon.get("blog"), Some("بلاگ"));
//!
//! let custom: Lexicon = [("help", "مدد کرنا")].into_iter().collect();
//! assert_eq!(custom.len(), 1);
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use crate::{Result, TersaError};

/// Embedded English to Urdu table.
const ENGLISH_URDU_JSON: &str = include_str!("../data/en_ur.json");

/// File name looked up in the user configuration directory.
const USER_LEXICON_FILE: &str = "lexicon.json";

static ENGLISH_URDU: LazyLock<Arc<Lexicon>> = LazyLock::new(|| match Lexicon::from_json(ENGLISH_URDU_JSON) {
    Ok(lexicon) => Arc::new(lexicon),
    Err(e) => {
        tracing::error!(error = %e, "embedded lexicon is malformed");
        Arc::new(Lexicon::default())
    }
});

/// Read-only source word to target string mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    entries: HashMap<String, String>,
}

impl Lexicon {
    /// The built-in English to Urdu lexicon.
    pub fn english_urdu() -> &'static Lexicon {
        &ENGLISH_URDU
    }

    /// The built-in lexicon as a shared handle. Every call returns the same
    /// instance.
    pub fn english_urdu_shared() -> Arc<Lexicon> {
        Arc::clone(&*ENGLISH_URDU)
    }

    /// Parses a flat JSON object of `"word": "translation"` pairs.
    ///
    /// Keys are lowercased and trimmed. When two keys normalize to the same
    /// word the later one wins.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, String> =
            serde_json::from_str(json).map_err(|e| TersaError::Lexicon(e.to_string()))?;
        Ok(raw.into_iter().collect())
    }

    /// Reads a JSON lexicon from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TersaError::FileNotFound(path.to_path_buf()));
        }
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Looks up a normalized word.
    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Lexicon
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(k, v)| (k.as_ref().trim().to_lowercase(), v.into()))
            .filter(|(k, v): &(String, String)| !k.is_empty() && !v.is_empty())
            .collect();
        Self { entries }
    }
}

/// Where a lexicon was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexiconSource {
    /// The table compiled into the crate.
    Embedded,
    /// A JSON file on disk.
    File(PathBuf),
}

/// Resolves which lexicon to use.
///
/// Lookup order: an explicit path, then `lexicon.json` in the user
/// configuration directory (`~/.config/tersa` on Linux), then the embedded
/// table.
#[derive(Debug, Clone)]
pub struct LexiconLoader {
    /// Explicit lexicon file
    custom_path: Option<PathBuf>,
    /// Per-user configuration directory
    user_dir: Option<PathBuf>,
}

impl LexiconLoader {
    pub fn new() -> Self {
        Self { custom_path: None, user_dir: dirs::config_dir().map(|d| d.join("tersa")) }
    }

    pub fn builder() -> LexiconLoaderBuilder {
        LexiconLoaderBuilder::new()
    }

    /// Returns the file that would be loaded, if any.
    pub fn resolve(&self) -> LexiconSource {
        if let Some(path) = &self.custom_path {
            return LexiconSource::File(path.clone());
        }

        if let Some(dir) = &self.user_dir {
            let candidate = dir.join(USER_LEXICON_FILE);
            if candidate.is_file() {
                return LexiconSource::File(candidate);
            }
        }

        LexiconSource::Embedded
    }

    /// Loads the resolved lexicon.
    ///
    /// An explicit path that cannot be read is an error.
    pub fn load(&self) -> Result<Arc<Lexicon>> {
        match self.resolve() {
            LexiconSource::File(path) => {
                tracing::debug!(path = %path.display(), "loading lexicon from file");
                Lexicon::from_file(&path).map(Arc::new)
            }
            LexiconSource::Embedded => Ok(Lexicon::english_urdu_shared()),
        }
    }
}

impl Default for LexiconLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for LexiconLoader.
pub struct LexiconLoaderBuilder {
    loader: LexiconLoader,
}

impl LexiconLoaderBuilder {
    pub fn new() -> Self {
        Self { loader: LexiconLoader::new() }
    }

    /// Uses this file instead of any discovered one.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.loader.custom_path = Some(path.into());
        self
    }

    /// Overrides the user configuration directory.
    pub fn user_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.loader.user_dir = Some(dir.into());
        self
    }

    /// Skips the user configuration directory.
    pub fn no_user_dir(mut self) -> Self {
        self.loader.user_dir = None;
        self
    }

    pub fn build(self) -> LexiconLoader {
        self.loader
    }
}

impl Default for LexiconLoaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
