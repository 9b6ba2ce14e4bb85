//! In-memory store for tests and dry runs.

use drg_model::{DrgRule, PatientRecord, User};

use crate::error::Result;
use crate::seed::{initial_rules, initial_users};
use crate::store::{RecordStore, RuleStore, SessionStore, UserStore, insert_user, replace_user};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rules: Vec<DrgRule>,
    records: Vec<PatientRecord>,
    users: Vec<User>,
    session: Option<User>,
}

impl MemoryStore {
    /// An empty store with no rules or users.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the first-run rules and accounts.
    pub fn seeded() -> Self {
        Self {
            rules: initial_rules(),
            users: initial_users(),
            ..Self::default()
        }
    }
}

impl RuleStore for MemoryStore {
    fn list_rules(&self) -> Result<Vec<DrgRule>> {
        Ok(self.rules.clone())
    }

    fn replace_rules(&mut self, rules: Vec<DrgRule>) -> Result<()> {
        self.rules = rules;
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn list_records(&self) -> Result<Vec<PatientRecord>> {
        Ok(self.records.clone())
    }

    fn append_record(&mut self, record: PatientRecord) -> Result<()> {
        self.records.push(record);
        Ok(())
    }

    fn replace_records(&mut self, records: Vec<PatientRecord>) -> Result<()> {
        self.records = records;
        Ok(())
    }
}

impl UserStore for MemoryStore {
    fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.users.clone())
    }

    fn add_user(&mut self, user: User) -> Result<()> {
        insert_user(&mut self.users, user)
    }

    fn update_user(&mut self, user: User) -> Result<()> {
        replace_user(&mut self.users, user)
    }
}

impl SessionStore for MemoryStore {
    fn current_user(&self) -> Result<Option<User>> {
        Ok(self.session.clone())
    }

    fn save_session(&mut self, user: &User) -> Result<()> {
        self.session = Some(user.clone());
        Ok(())
    }

    fn clear_session(&mut self) -> Result<()> {
        self.session = None;
        Ok(())
    }
}
