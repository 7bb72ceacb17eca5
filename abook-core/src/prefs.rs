use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the preferences file location
pub const PREFS_PATH_ENV: &str = "ABOOK_PREFS_PATH";
/// Environment variable naming the address book file directly
pub const FILE_ENV: &str = "ABOOK_FILE";
/// Address book picked up from the working directory when present
pub const LOCAL_FILE: &str = "addressbook.json";

/// User preferences stored as YAML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Address book used when nothing more specific is given
    pub address_book_path: String,
}

impl Preferences {
    pub fn new<P: AsRef<Path>>(address_book_path: P) -> Self {
        Self {
            address_book_path: address_book_path.as_ref().to_string_lossy().into_owned(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read preferences file: {:?}", path.as_ref()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse preferences file: {:?}", path.as_ref()))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(&self)?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write preferences to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Writes preferences pointing at `default_book` unless the file already exists
    pub fn create_default<P: AsRef<Path>>(path: P, default_book: &Path) -> Result<()> {
        if path.as_ref().exists() {
            return Ok(());
        }
        debug!("Creating default preferences at {:?}", path.as_ref());
        Self::new(default_book).save(path)
    }

    pub fn address_book_path(&self) -> PathBuf {
        PathBuf::from(&self.address_book_path)
    }
}

/// Location of the preferences file: `$ABOOK_PREFS_PATH` or `~/.abook.config`
pub fn get_prefs_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(PREFS_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }

    let home_dir = dirs::home_dir().context("Failed to determine home directory")?;
    Ok(home_dir.join(".abook.config"))
}

/// `~/.abook/addressbook.json`
pub fn default_address_book_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().context("Failed to determine home directory")?;
    Ok(home_dir.join(".abook").join(LOCAL_FILE))
}

/// Picks the address book file for this run.
///
/// Priority: the `--file` option, `$ABOOK_FILE`, `./addressbook.json` if it
/// exists, then the preferences file (created with the default location on
/// first use).
pub fn determine_address_book_path(file_option: Option<&Path>) -> Result<PathBuf> {
    let prefs_path = get_prefs_path()?;
    resolve_address_book_path(
        file_option,
        env::var(FILE_ENV).ok().as_deref(),
        Path::new(LOCAL_FILE),
        &prefs_path,
        &default_address_book_path()?,
    )
}

fn resolve_address_book_path(
    file_option: Option<&Path>,
    env_file: Option<&str>,
    local_file: &Path,
    prefs_path: &Path,
    default_book: &Path,
) -> Result<PathBuf> {
    if let Some(path) = file_option {
        return Ok(path.to_path_buf());
    }

    if let Some(path) = env_file {
        return Ok(PathBuf::from(path));
    }

    if local_file.exists() {
        return Ok(local_file.to_path_buf());
    }

    Preferences::create_default(prefs_path, default_book)?;
    let prefs = Preferences::load(prefs_path)?;
    Ok(prefs.address_book_path())
}
