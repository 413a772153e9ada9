//! The settings store: one JSON file per call, resolved against a
//! host-provided data directory.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::paths::{app_data_dir, settings_file_path};
use crate::validate::{settings_are_valid, Validator};

// ── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("settings must be an object or array")]
    PayloadNotObject,
    #[error("settings rejected by custom validator")]
    ValidationRejected,
}

// ── Options ─────────────────────────────────────────────────────────────────

/// Per-call configuration. A fresh value accompanies every operation; the
/// store keeps no state between calls beyond its data directory.
#[derive(Default)]
pub struct StoreOptions {
    /// File name inside the data directory. Defaults to `app-settings.json`.
    pub file_name: Option<String>,
    /// Extra validation run before every save, combined with the built-in
    /// shape check. Both must pass.
    pub validator: Option<Box<Validator>>,
}

impl StoreOptions {
    pub fn with_file_name(name: impl Into<String>) -> Self {
        Self {
            file_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn validator(mut self, f: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.validator = Some(Box::new(f));
        self
    }
}

// ── Store ───────────────────────────────────────────────────────────────────

pub struct SettingsStore {
    data_dir: PathBuf,
}

impl SettingsStore {
    /// A store rooted at a host-provided directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// A store rooted at the platform data directory for the given
    /// application identity.
    pub fn for_app(qualifier: &str, organization: &str, application: &str) -> Result<Self> {
        Ok(Self::new(app_data_dir(qualifier, organization, application)?))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of the settings file for this call's options. Recomputed
    /// every time, never cached.
    pub fn resolve_path(&self, options: &StoreOptions) -> PathBuf {
        settings_file_path(&self.data_dir, options.file_name.as_deref())
    }

    /// Whether a settings file exists for this call's options.
    pub fn settings_exist(&self, options: &StoreOptions) -> bool {
        let path = self.resolve_path(options);
        if path.exists() {
            return true;
        }
        debug!(path = %path.display(), "no settings file found");
        false
    }

    // ── Save ────────────────────────────────────────────────────────────────

    /// Validate and write settings synchronously. An invalid payload fails
    /// before anything touches the filesystem.
    pub fn save_sync<T: Serialize>(&self, settings: &T, options: &StoreOptions) -> Result<()> {
        let (path, json) = self.prepare_save(settings, options)?;
        fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("create {}", self.data_dir.display()))?;
        fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
        debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Async variant of [`save_sync`](Self::save_sync).
    pub async fn save<T: Serialize>(&self, settings: &T, options: &StoreOptions) -> Result<()> {
        let (path, json) = self.prepare_save(settings, options)?;
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .with_context(|| format!("create {}", self.data_dir.display()))?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("write {}", path.display()))?;
        debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    // ── Load ────────────────────────────────────────────────────────────────

    /// Parsed settings, or `None` when no file has been written yet.
    pub fn load_sync(&self, options: &StoreOptions) -> Result<Option<Value>> {
        if !self.settings_exist(options) {
            return Ok(None);
        }
        let path = self.resolve_path(options);
        let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        let value =
            serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
        Ok(Some(value))
    }

    /// Async variant of [`load_sync`](Self::load_sync).
    pub async fn load(&self, options: &StoreOptions) -> Result<Option<Value>> {
        if !self.settings_exist(options) {
            return Ok(None);
        }
        let path = self.resolve_path(options);
        let raw = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("read {}", path.display()))?;
        let value =
            serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
        Ok(Some(value))
    }

    /// Load and deserialize into a caller-supplied type.
    pub fn load_sync_as<T: DeserializeOwned>(&self, options: &StoreOptions) -> Result<Option<T>> {
        match self.load_sync(options)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Async variant of [`load_sync_as`](Self::load_sync_as).
    pub async fn load_as<T: DeserializeOwned>(&self, options: &StoreOptions) -> Result<Option<T>> {
        match self.load(options).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    // ── Private helpers ─────────────────────────────────────────────────────

    fn prepare_save<T: Serialize>(
        &self,
        settings: &T,
        options: &StoreOptions,
    ) -> Result<(PathBuf, String)> {
        let value = serde_json::to_value(settings).context("serialize settings")?;
        settings_are_valid(&value, options.validator.as_deref())?;
        let json = serde_json::to_string_pretty(&value)?;
        Ok((self.resolve_path(options), json))
    }
}
