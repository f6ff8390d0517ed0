//! YAML message catalog.
//!
//! # Storage layout
//!
//! ```text
//! ~/.mobportals/
//!   messages.yaml   (mode 0600, created on first init from the embedded defaults)
//! ```
//!
//! # API pattern
//!
//! Every function touching the filesystem has two forms:
//! - `fn_at(home: &Path, …)`: explicit home; used in tests with `TempDir`
//! - `fn(…)`: derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.

use std::path::{Path, PathBuf};

use crate::error::CatalogError;
use crate::types::MessageConfig;

/// Catalog shipped with the binary. User files are layered over it.
pub const DEFAULT_MESSAGES: &str = include_str!("defaults/messages.yaml");

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.mobportals/messages.yaml`: pure, no I/O.
pub fn catalog_path_at(home: &Path) -> PathBuf {
    home.join(".mobportals").join("messages.yaml")
}

/// `catalog_path_at` convenience wrapper.
pub fn catalog_path() -> Result<PathBuf, CatalogError> {
    Ok(catalog_path_at(&home()?))
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Parse the embedded default catalog.
pub fn defaults() -> Result<MessageConfig, CatalogError> {
    Ok(serde_yaml::from_str(DEFAULT_MESSAGES)?)
}

/// Load a catalog document from an arbitrary path, without merging defaults.
///
/// Returns `CatalogError::CatalogNotFound` if absent,
/// `CatalogError::Parse` (with path + line context) if malformed YAML.
pub fn load_file(path: &Path) -> Result<MessageConfig, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::CatalogNotFound { path: path.to_path_buf() });
    }
    let contents = std::fs::read_to_string(path)?;
    let config: MessageConfig = serde_yaml::from_str(&contents).map_err(|e| CatalogError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), messages = config.messages.len(), "loaded message catalog");
    Ok(config)
}

/// Load `<home>/.mobportals/messages.yaml` layered over the embedded defaults.
pub fn load_at(home: &Path) -> Result<MessageConfig, CatalogError> {
    let user = load_file(&catalog_path_at(home))?;
    Ok(user.merged_over(&defaults()?))
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<MessageConfig, CatalogError> {
    load_at(&home()?)
}

/// Like [`load_at`], but falls back to the embedded defaults when no user
/// catalog exists yet. Parse errors are still reported.
pub fn load_or_default_at(home: &Path) -> Result<MessageConfig, CatalogError> {
    match load_at(home) {
        Err(CatalogError::CatalogNotFound { path }) => {
            tracing::debug!(path = %path.display(), "no user catalog, using defaults");
            defaults()
        }
        other => other,
    }
}

/// `load_or_default_at` convenience wrapper.
pub fn load_or_default() -> Result<MessageConfig, CatalogError> {
    load_or_default_at(&home()?)
}

// ---------------------------------------------------------------------------
// 3. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically save a catalog to `<home>/.mobportals/messages.yaml`.
///
/// Write flow: serialize → `.yaml.tmp` sibling → `chmod 0600` → `rename`.
pub fn save_at(home: &Path, config: &MessageConfig) -> Result<(), CatalogError> {
    let path = catalog_path_at(home);
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
            set_dir_permissions(dir)?;
        }
    }
    let tmp_path = path.with_file_name("messages.yaml.tmp");

    let yaml = serde_yaml::to_string(config)?;
    write_atomic(&tmp_path, &path, &yaml)?;
    tracing::debug!(path = %path.display(), messages = config.messages.len(), "saved message catalog");
    Ok(())
}

/// `save_at` convenience wrapper.
pub fn save(config: &MessageConfig) -> Result<(), CatalogError> {
    save_at(&home()?, config)
}

// ---------------------------------------------------------------------------
// 4. Init
// ---------------------------------------------------------------------------

/// Write the embedded default catalog to `<home>/.mobportals/messages.yaml`.
///
/// Idempotent: if the file already exists it is left untouched and loaded.
/// The defaults are written byte-for-byte so their layout survives.
pub fn init_at(home: &Path) -> Result<MessageConfig, CatalogError> {
    let path = catalog_path_at(home);
    if path.exists() {
        return load_at(home);
    }

    let dir = home.join(".mobportals");
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
        set_dir_permissions(&dir)?;
    }
    write_atomic(&path.with_file_name("messages.yaml.tmp"), &path, DEFAULT_MESSAGES)?;
    defaults()
}

/// `init_at` convenience wrapper.
pub fn init() -> Result<MessageConfig, CatalogError> {
    init_at(&home()?)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, CatalogError> {
    dirs::home_dir().ok_or(CatalogError::HomeNotFound)
}

fn write_atomic(tmp_path: &Path, path: &Path, contents: &str) -> Result<(), CatalogError> {
    std::fs::write(tmp_path, contents)?;
    set_file_permissions(tmp_path)?;
    std::fs::rename(tmp_path, path)?;
    Ok(())
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), CatalogError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), CatalogError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), CatalogError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), CatalogError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
