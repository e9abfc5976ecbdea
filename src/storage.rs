use crate::io::parent_dir;
use crate::model::FavoritePlace;
use anyhow::Context;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge les lieux favoris depuis un support.
    fn load(&self) -> anyhow::Result<Vec<FavoritePlace>>;
    /// Sauvegarde de manière atomique.
    fn save(&self, places: &[FavoritePlace]) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonStorage {
    /// Un fichier absent équivaut à une liste vide.
    fn load(&self) -> anyhow::Result<Vec<FavoritePlace>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", self.path.display()))
            }
        };
        let places: Vec<FavoritePlace> = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(places)
    }

    fn save(&self, places: &[FavoritePlace]) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(places)?;
        let mut tmp = NamedTempFile::new_in(parent_dir(&self.path))
            .with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
