use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::{MemoryTransactionStore, TransactionStore};
use crate::{
    errors::{CashflowError, Result},
    ledger::{NewTransaction, Transaction, TransactionPatch},
    utils::paths::ensure_dir,
};

pub const STORE_SCHEMA_VERSION: u32 = 1;
const TMP_SUFFIX: &str = "tmp";

/// On-disk layout of a transaction file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDocument {
    pub schema_version: u32,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            schema_version: STORE_SCHEMA_VERSION,
            transactions: Vec::new(),
        }
    }
}

/// File-backed store. The whole document is rewritten atomically on every mutation.
#[derive(Debug, Clone)]
pub struct JsonTransactionStore {
    path: PathBuf,
    cache: MemoryTransactionStore,
}

impl JsonTransactionStore {
    /// Opens `path`, treating a missing file as an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let document = load_document(&path)?;
        debug!(path = %path.display(), count = document.transactions.len(), "opened transaction store");
        Ok(Self {
            path,
            cache: MemoryTransactionStore::with_transactions(document.transactions),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-reads the file, discarding the cached view.
    pub fn reload(&mut self) -> Result<()> {
        let document = load_document(&self.path)?;
        self.cache = MemoryTransactionStore::with_transactions(document.transactions);
        Ok(())
    }

    /// Runs `mutate` on a copy of the cache and adopts the copy only once it is on disk.
    fn commit<T>(
        &mut self,
        mutate: impl FnOnce(&mut MemoryTransactionStore) -> Result<T>,
    ) -> Result<T> {
        let mut staged = self.cache.clone();
        let value = mutate(&mut staged)?;
        self.persist(&staged)?;
        self.cache = staged;
        Ok(value)
    }

    fn persist(&self, staged: &MemoryTransactionStore) -> Result<()> {
        let document = StoreDocument {
            schema_version: STORE_SCHEMA_VERSION,
            transactions: staged.transactions().to_vec(),
        };
        save_document(&document, &self.path)?;
        info!(path = %self.path.display(), count = document.transactions.len(), "transaction store saved");
        Ok(())
    }
}

impl TransactionStore for JsonTransactionStore {
    fn list(&self) -> Result<Vec<Transaction>> {
        self.cache.list()
    }

    fn create(&mut self, draft: NewTransaction) -> Result<Transaction> {
        self.commit(|cache| cache.create(draft))
    }

    fn update(&mut self, id: Uuid, patch: TransactionPatch) -> Result<Transaction> {
        self.commit(|cache| cache.update(id, patch))
    }

    fn delete(&mut self, id: Uuid) -> Result<()> {
        self.commit(|cache| cache.delete(id))
    }
}

pub fn load_document(path: &Path) -> Result<StoreDocument> {
    if !path.exists() {
        return Ok(StoreDocument::default());
    }
    let data = fs::read_to_string(path)?;
    let document: StoreDocument = serde_json::from_str(&data)?;
    if document.schema_version > STORE_SCHEMA_VERSION {
        return Err(CashflowError::StorageError(format!(
            "transaction file `{}` is from a newer schema version ({})",
            path.display(),
            document.schema_version
        )));
    }
    Ok(document)
}

/// Stages to `<file>.tmp` and renames over the target.
pub fn save_document(document: &StoreDocument, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(document)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
