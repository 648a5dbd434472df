use crate::stores::draft_store::{DraftStore, DraftValue};
use anyhow::{bail, Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const DRAFT_FILE_EXTENSION: &str = "json";

/// Keeps every draft in its own file inside a folder. Keys may contain only
/// ascii alphanumerics, `-` and `_`.
pub struct FileDraftStore {
    folder: PathBuf,
}

impl FileDraftStore {
    pub fn new<P: AsRef<Path>>(folder: P) -> Self {
        Self {
            folder: folder.as_ref().to_path_buf(),
        }
    }

    fn path_to_draft(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            bail!("invalid draft key: {:?}", key);
        }

        Ok(self
            .folder
            .join(format!("{}.{}", key, DRAFT_FILE_EXTENSION)))
    }
}

impl DraftStore for FileDraftStore {
    fn read_draft(&self, key: &str) -> Result<Option<DraftValue>> {
        let path = self.path_to_draft(key)?;

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context(format!("error on reading a draft from {:?}", path)),
        }
    }

    fn write_draft(&mut self, key: &str, value: DraftValue) -> Result<()> {
        let path = self.path_to_draft(key)?;

        fs::create_dir_all(&self.folder)
            .context(format!("error on creating a drafts folder {:?}", self.folder))?;

        fs::write(&path, value).context(format!("error on writing a draft to {:?}", path))
    }

    fn remove_draft(&mut self, key: &str) -> Result<()> {
        let path = self.path_to_draft(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context(format!("error on removing a draft {:?}", path)),
        }
    }
}
