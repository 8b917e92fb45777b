use crate::model::Workspace;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge l'espace de travail depuis un support.
    fn load(&self) -> anyhow::Result<Workspace>;
    /// Sauvegarde de manière atomique.
    fn save(&self, workspace: &Workspace) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Espace vierge si le fichier n'existe pas encore ; toute autre erreur
    /// (JSON invalide, droits) est remontée.
    pub fn load_or_default(&self) -> anyhow::Result<Workspace> {
        if !self.path.exists() {
            #[cfg(feature = "logging")]
            tracing::info!(path = %self.path.display(), "no workspace file, starting empty");
            return Ok(Workspace::default());
        }
        self.load()
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Workspace> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let workspace: Workspace = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        #[cfg(feature = "logging")]
        tracing::debug!(
            missions = workspace.missions.len(),
            employees = workspace.employees.len(),
            records = workspace.schedule.len(),
            "workspace loaded"
        );
        Ok(workspace)
    }

    fn save(&self, workspace: &Workspace) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(workspace)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        #[cfg(feature = "logging")]
        tracing::debug!(path = %self.path.display(), bytes = json.len(), "workspace saved");
        Ok(())
    }
}
