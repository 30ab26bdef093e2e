// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use jewelbench_app::{ClientSort, ClientSortKey, SortDirection};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "jewelbench";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_SHOP_NAME: &str = "Jewelbench Repairs";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub shop: Shop,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            storage: Storage::default(),
            ui: Ui::default(),
            shop: Shop::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Storage {
    pub clients_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub sort_key: Option<String>,
    pub sort_direction: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            sort_key: Some(ClientSortKey::Name.as_str().to_owned()),
            sort_direction: Some(SortDirection::Asc.as_str().to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Shop {
    pub name: Option<String>,
}

impl Default for Shop {
    fn default() -> Self {
        Self {
            name: Some(DEFAULT_SHOP_NAME.to_owned()),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("JEWELBENCH_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!(
                "cannot resolve config directory; set JEWELBENCH_CONFIG_PATH to the config file"
            )
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and keep values under [storage], [ui], and [shop]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(clients_path) = &self.storage.clients_path {
            validate_clients_path(clients_path)
                .with_context(|| format!("invalid storage.clients_path in {}", path.display()))?;
        }

        if let Some(key) = &self.ui.sort_key
            && ClientSortKey::parse(key).is_none()
        {
            bail!(
                "ui.sort_key in {} must be one of name, last_repair, total_repairs; got {key:?}",
                path.display()
            );
        }

        if let Some(direction) = &self.ui.sort_direction
            && SortDirection::parse(direction).is_none()
        {
            bail!(
                "ui.sort_direction in {} must be asc or desc; got {direction:?}",
                path.display()
            );
        }

        if let Some(name) = &self.shop.name
            && name.trim().is_empty()
        {
            bail!(
                "shop.name in {} is blank -- remove the key or give the shop a name",
                path.display()
            );
        }

        Ok(())
    }

    pub fn clients_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.storage.clients_path {
            return Ok(PathBuf::from(path));
        }
        if let Some(path) = env::var_os("JEWELBENCH_CLIENTS_PATH") {
            return Ok(PathBuf::from(path));
        }
        let data_root = dirs::data_dir().ok_or_else(|| {
            anyhow!(
                "cannot resolve data directory; set [storage].clients_path or JEWELBENCH_CLIENTS_PATH"
            )
        })?;
        Ok(data_root.join(APP_NAME).join("clients.json"))
    }

    /// Sort applied to the client table when no CLI flag overrides it.
    pub fn client_sort(&self) -> ClientSort {
        let key = self
            .ui
            .sort_key
            .as_deref()
            .and_then(ClientSortKey::parse)
            .unwrap_or_default();
        let direction = self
            .ui
            .sort_direction
            .as_deref()
            .and_then(SortDirection::parse)
            .unwrap_or_default();
        ClientSort::new(key, direction)
    }

    pub fn shop_name(&self) -> &str {
        self.shop.name.as_deref().unwrap_or(DEFAULT_SHOP_NAME)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# jewelbench config\n# Place this file at: {}\n\nversion = 1\n\n[storage]\n# Optional. Default is platform data dir (for example ~/.local/share/jewelbench/clients.json)\n# clients_path = \"/absolute/path/to/clients.json\"\n\n[ui]\n# name, last_repair, or total_repairs\nsort_key = \"name\"\n# asc or desc\nsort_direction = \"asc\"\n\n[shop]\nname = \"{}\"\n",
            path.display(),
            DEFAULT_SHOP_NAME,
        )
    }
}

fn validate_clients_path(raw: &str) -> Result<()> {
    if raw.trim().is_empty() {
        bail!("clients path is empty; point it at a JSON file such as clients.json");
    }
    if raw.contains("://") {
        bail!("clients path {raw:?} looks like a URI; use a filesystem path");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Config;
    use anyhow::Result;
    use jewelbench_app::{ClientSort, ClientSortKey, SortDirection};
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.client_sort(), ClientSort::default());
        assert_eq!(config.shop_name(), "Jewelbench Repairs");
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[shop]\nname = \"Gold & Co\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[storage], [ui], and [shop]"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[storage]\nclients_path = \"/srv/shop/clients.json\"\n[ui]\nsort_key = \"total_repairs\"\nsort_direction = \"desc\"\n[shop]\nname = \"Gold & Co\"\n",
        )?;

        let config = Config::load(&path)?;
        assert_eq!(config.clients_path()?, PathBuf::from("/srv/shop/clients.json"));
        assert_eq!(
            config.client_sort(),
            ClientSort::new(ClientSortKey::TotalRepairs, SortDirection::Desc)
        );
        assert_eq!(config.shop_name(), "Gold & Co");
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 3\n")?;
        let error = Config::load(&path).expect_err("v3 config should fail");
        assert!(error.to_string().contains("unsupported config version 3"));
        Ok(())
    }

    #[test]
    fn unknown_sort_values_are_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nsort_key = \"karat\"\n")?;
        let error = Config::load(&path).expect_err("unknown sort key should fail");
        assert!(error.to_string().contains("ui.sort_key"));

        let (_temp, path) = write_config("version = 1\n[ui]\nsort_direction = \"up\"\n")?;
        let error = Config::load(&path).expect_err("unknown direction should fail");
        assert!(error.to_string().contains("asc or desc"));
        Ok(())
    }

    #[test]
    fn blank_shop_name_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[shop]\nname = \"  \"\n")?;
        let error = Config::load(&path).expect_err("blank name should fail");
        assert!(error.to_string().contains("shop.name"));
        Ok(())
    }

    #[test]
    fn uri_clients_path_is_rejected() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[storage]\nclients_path = \"https://evil.example/clients.json\"\n",
        )?;
        let error = Config::load(&path).expect_err("URI clients_path should fail validation");
        assert!(format!("{error:#}").contains("looks like a URI"));
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("JEWELBENCH_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path();
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("JEWELBENCH_CONFIG_PATH");
        }
        assert_eq!(resolved?, override_path);
        Ok(())
    }

    #[test]
    fn clients_path_prefers_storage_config_over_env_override() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) =
            write_config("version = 1\n[storage]\nclients_path = \"/explicit/clients.json\"\n")?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("JEWELBENCH_CLIENTS_PATH", "/from/env.json");
        }
        let resolved = Config::load(&path).and_then(|config| config.clients_path());
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("JEWELBENCH_CLIENTS_PATH");
        }
        assert_eq!(resolved?, PathBuf::from("/explicit/clients.json"));
        Ok(())
    }

    #[test]
    fn clients_path_uses_env_override_when_storage_missing() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) = write_config("version = 1\n")?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("JEWELBENCH_CLIENTS_PATH", "/from/env-only.json");
        }
        let resolved = Config::load(&path).and_then(|config| config.clients_path());
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("JEWELBENCH_CLIENTS_PATH");
        }
        assert_eq!(resolved?, PathBuf::from("/from/env-only.json"));
        Ok(())
    }

    #[test]
    fn example_config_round_trips_through_load() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[storage]"));
        assert!(example.contains("[ui]"));
        assert!(example.contains("[shop]"));

        std::fs::write(&path, example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.client_sort(), ClientSort::default());
        Ok(())
    }
}
