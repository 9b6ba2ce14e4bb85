//! Persistent storage for the DRG compliance workbench.
//!
//! # Features
//!
//! - **Collection contracts** ([`RuleStore`], [`RecordStore`], [`UserStore`],
//!   [`SessionStore`]) consumed by the workflows
//! - **File-backed store** with one file per collection and atomic writes
//! - **In-memory store** for tests
//! - **First-run seeding** of the rule catalog and accounts
//!
//! # File Format
//!
//! Every `.dat` file holds the base64 encoding of the collection's JSON
//! document. This is obfuscation only; nothing is encrypted.
//!
//! # Example
//!
//! ```ignore
//! use drg_store::{FileStore, RuleStore};
//!
//! let store = FileStore::open("/var/lib/drg")?;
//! let rules = store.list_rules()?; // seeded on first access
//! ```

mod codec;
mod error;
mod file;
mod io;
mod memory;
mod seed;
mod store;

pub use error::{Result, StoreError};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use seed::{initial_rules, initial_users};
pub use store::{DataStore, RecordStore, RuleStore, SessionStore, UserStore};
