//! Directory-backed store.
//!
//! Each collection lives in its own file under the data directory:
//!
//! ```text
//! <data_dir>/
//!   rules.dat     DRG rule catalog (seeded on first read)
//!   records.dat   patient records
//!   users.dat     user accounts (seeded on first read)
//!   session.dat   signed-in user
//! ```

use std::fs;
use std::path::PathBuf;

use drg_model::{DrgRule, PatientRecord, User};

use crate::error::{Result, StoreError};
use crate::io::{load_collection, save_collection};
use crate::seed::{initial_rules, initial_users};
use crate::store::{RecordStore, RuleStore, SessionStore, UserStore, insert_user, replace_user};

const RULES_FILE: &str = "rules.dat";
const RECORDS_FILE: &str = "records.dat";
const USERS_FILE: &str = "users.dat";
const SESSION_FILE: &str = "session.dat";

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| StoreError::io("create directory", root.clone(), e))?;
        tracing::debug!(data_dir = %root.display(), "opened file store");
        Ok(Self { root })
    }

    fn path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    /// Load a collection, writing `seed` first if the file does not exist.
    fn load_or_seed<T>(&self, file: &str, collection: &'static str, seed: fn() -> Vec<T>) -> Result<Vec<T>>
    where
        T: serde::Serialize + serde::de::DeserializeOwned,
    {
        let path = self.path(file);
        if let Some(values) = load_collection(&path)? {
            return Ok(values);
        }
        let values = seed();
        save_collection(&values, &path, collection)?;
        tracing::info!(collection, count = values.len(), "seeded collection");
        Ok(values)
    }
}

impl RuleStore for FileStore {
    fn list_rules(&self) -> Result<Vec<DrgRule>> {
        self.load_or_seed(RULES_FILE, "rules", initial_rules)
    }

    fn replace_rules(&mut self, rules: Vec<DrgRule>) -> Result<()> {
        save_collection(&rules, &self.path(RULES_FILE), "rules")
    }
}

impl RecordStore for FileStore {
    fn list_records(&self) -> Result<Vec<PatientRecord>> {
        Ok(load_collection(&self.path(RECORDS_FILE))?.unwrap_or_default())
    }

    fn append_record(&mut self, record: PatientRecord) -> Result<()> {
        let mut records = self.list_records()?;
        records.push(record);
        save_collection(&records, &self.path(RECORDS_FILE), "records")
    }

    fn replace_records(&mut self, records: Vec<PatientRecord>) -> Result<()> {
        save_collection(&records, &self.path(RECORDS_FILE), "records")
    }
}

impl UserStore for FileStore {
    fn list_users(&self) -> Result<Vec<User>> {
        self.load_or_seed(USERS_FILE, "users", initial_users)
    }

    fn add_user(&mut self, user: User) -> Result<()> {
        let mut users = self.list_users()?;
        insert_user(&mut users, user)?;
        save_collection(&users, &self.path(USERS_FILE), "users")
    }

    fn update_user(&mut self, user: User) -> Result<()> {
        let mut users = self.list_users()?;
        replace_user(&mut users, user)?;
        save_collection(&users, &self.path(USERS_FILE), "users")
    }
}

impl SessionStore for FileStore {
    fn current_user(&self) -> Result<Option<User>> {
        load_collection(&self.path(SESSION_FILE))
    }

    fn save_session(&mut self, user: &User) -> Result<()> {
        save_collection(user, &self.path(SESSION_FILE), "session")
    }

    fn clear_session(&mut self) -> Result<()> {
        let path = self.path(SESSION_FILE);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io("remove", path, e)),
        }
    }
}
