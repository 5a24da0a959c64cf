use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::model::{AccountType, ProfileConfig, SessionState};

const CONFIG_FILE: &str = "config.json";
const SESSION_FILE: &str = "session.json";

/// File-backed store for the profile configuration and the session
/// credential. All writes go through an atomic temp-file-and-rename so a
/// crash never leaves a half-written credential behind.
#[derive(Clone)]
pub struct SessionStore {
    root: PathBuf,
}

impl SessionStore {
    pub fn default_profile_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os("VOLTIX_HOME") {
            return Ok(PathBuf::from(dir));
        }
        let home = std::env::var_os("HOME")
            .ok_or_else(|| anyhow!("neither VOLTIX_HOME nor HOME is set"))?;
        Ok(PathBuf::from(home).join(".voltix"))
    }

    pub fn open_default() -> Result<Self> {
        Self::open_at(&Self::default_profile_dir()?)
    }

    /// Opens (creating if necessary) the profile directory.
    pub fn open_at(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)
            .with_context(|| format!("create profile dir {}", root.display()))?;
        let store = Self {
            root: root.to_path_buf(),
        };
        if !store.root.join(CONFIG_FILE).exists() {
            store.write_config(&ProfileConfig {
                version: 1,
                server: None,
            })?;
        }
        if !store.root.join(SESSION_FILE).exists() {
            store.write_session(&SessionState {
                version: 1,
                ..SessionState::default()
            })?;
        }
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn read_config(&self) -> Result<ProfileConfig> {
        let bytes = fs::read(self.root.join(CONFIG_FILE)).context("read config.json")?;
        let cfg: ProfileConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &ProfileConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join(CONFIG_FILE), &bytes).context("write config.json")?;
        Ok(())
    }

    pub fn read_session(&self) -> Result<SessionState> {
        let path = self.root.join(SESSION_FILE);
        if !path.exists() {
            return Ok(SessionState {
                version: 1,
                ..SessionState::default()
            });
        }
        let bytes = fs::read(&path).context("read session.json")?;
        let st: SessionState = serde_json::from_slice(&bytes).context("parse session.json")?;
        Ok(st)
    }

    pub fn write_session(&self, st: &SessionState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(st).context("serialize session state")?;
        write_atomic(&self.root.join(SESSION_FILE), &bytes).context("write session.json")?;
        Ok(())
    }

    pub fn get_credential(&self) -> Result<Option<String>> {
        let st = self.read_session()?;
        if st.version != 1 {
            anyhow::bail!("unsupported session state version {}", st.version);
        }
        Ok(st.credential)
    }

    pub fn set_credential(&self, credential: &str) -> Result<()> {
        let mut st = self.read_session()?;
        if st.version != 1 {
            anyhow::bail!("unsupported session state version {}", st.version);
        }
        st.credential = Some(credential.to_string());
        self.write_session(&st)
    }

    pub fn clear_credential(&self) -> Result<()> {
        let mut st = self.read_session()?;
        if st.version != 1 {
            anyhow::bail!("unsupported session state version {}", st.version);
        }
        st.credential = None;
        st.account_type = None;
        self.write_session(&st)
    }

    pub fn get_account_type(&self) -> Result<Option<AccountType>> {
        Ok(self.read_session()?.account_type)
    }

    pub fn set_account_type(&self, account_type: AccountType) -> Result<()> {
        let mut st = self.read_session()?;
        st.account_type = Some(account_type);
        self.write_session(&st)
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}
