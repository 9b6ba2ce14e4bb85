//! Workflows of the DRG compliance workbench.
//!
//! Each workflow is a plain function over the storage traits from
//! `drg-store`, so the CLI runs them against files and tests run them
//! against [`drg_store::MemoryStore`].
//!
//! - [`submission`]: parse, validate and store a patient record
//! - [`authoring`]: create rules, edit cost caps, toggle availability
//! - [`users`] and [`session`]: accounts and sign-in
//! - [`records`]: role-scoped record listing and lookup
//! - [`demo`]: synthetic data and bulk clear

pub mod authoring;
pub mod demo;
pub mod error;
pub mod records;
pub mod session;
pub mod submission;
pub mod users;

pub use authoring::{MetricDraft, RuleDraft, create_rule, set_rule_active, update_max_cost};
pub use demo::{
    DEFAULT_DEMO_RECORDS, SYNTHETIC_FLAG_MESSAGE, clear_records, generate_demo_records,
    reset_with_demo_data,
};
pub use error::{
    AuthoringError, DemoError, RecordError, SessionError, SubmissionError, UserError,
};
pub use records::{find_record, visible_records};
pub use session::{login, logout, require_admin, require_user};
pub use submission::{SubmissionForm, submit};
pub use users::{provision_doctor, update_user};
