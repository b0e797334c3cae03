use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    book::{BudgetBook, Expense, RecurringExpense},
    errors::Result,
    utils::{app_data_dir, ensure_dir, write_atomic},
};

use super::StorageBackend;

const EXPENSES_FILE: &str = "expenses.json";
const RECURRING_FILE: &str = "recurring_expenses.json";
const BUDGETS_FILE: &str = "budgets.json";
const BACKUP_DIR: &str = "backups";
const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const DEFAULT_RETENTION: usize = 5;

/// File-based backend: each store is one pretty-printed JSON file under the
/// app data directory, written atomically, with a timestamped backup of the
/// previous contents taken before every overwrite.
#[derive(Clone)]
pub struct JsonStorage {
    root: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        let backups_dir = root.join(BACKUP_DIR);
        ensure_dir(&backups_dir)?;
        Ok(Self {
            root,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None, None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    fn store_path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    fn load_json<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>> {
        let path = self.store_path(file);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    fn save_json<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        let path = self.store_path(file);
        self.backup_existing_file(&path)?;
        let json = serde_json::to_string_pretty(value)?;
        write_atomic(&path, &json)?;
        Ok(())
    }

    fn backup_existing_file(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        let stem = match path.file_stem().and_then(|stem| stem.to_str()) {
            Some(stem) => stem.to_string(),
            None => return Ok(()),
        };
        let dir = self.backups_dir.join(&stem);
        ensure_dir(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let backup_path = dir.join(format!("{}_{}.{}", stem, timestamp, BACKUP_EXTENSION));
        fs::copy(path, &backup_path)?;
        self.prune_backups(&stem)?;
        Ok(())
    }

    fn prune_backups(&self, stem: &str) -> Result<()> {
        let backups = self.list_backups(stem)?;
        for name in backups.iter().skip(self.retention) {
            let _ = fs::remove_file(self.backups_dir.join(stem).join(name));
        }
        Ok(())
    }

    /// Backup file names for one store, most recent first.
    pub fn list_backups(&self, stem: &str) -> Result<Vec<String>> {
        let dir = self.backups_dir.join(stem);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(name.to_string());
            }
        }
        entries.sort_by(|a, b| b.cmp(a));
        Ok(entries)
    }
}

impl StorageBackend for JsonStorage {
    fn load_expenses(&self) -> Result<Option<Vec<Expense>>> {
        self.load_json(EXPENSES_FILE)
    }

    fn save_expenses(&self, expenses: &[Expense]) -> Result<()> {
        self.save_json(EXPENSES_FILE, &expenses)
    }

    fn load_recurring(&self) -> Result<Option<Vec<RecurringExpense>>> {
        self.load_json(RECURRING_FILE)
    }

    fn save_recurring(&self, templates: &[RecurringExpense]) -> Result<()> {
        self.save_json(RECURRING_FILE, &templates)
    }

    fn load_budgets(&self) -> Result<Option<BudgetBook>> {
        self.load_json(BUDGETS_FILE)
    }

    fn save_budgets(&self, budgets: &BudgetBook) -> Result<()> {
        self.save_json(BUDGETS_FILE, budgets)
    }
}
