//! Compliance reporting.
//!
//! Everything here is a pure function of the record collection and is
//! recomputed on demand:
//!
//! - **Statistics**: compliance rate, per-doctor and per-clinic totals
//! - **Series**: chart-ready compliance breakdown and submissions per doctor
//! - **Export**: one CSV row per record

mod error;
mod export;
mod series;
mod stats;

pub use error::{ReportError, Result};
pub use export::{EXPORT_COLUMNS, export_csv, write_csv};
pub use series::{ComplianceBreakdown, SeriesPoint, compliance_breakdown, submissions_by_doctor};
pub use stats::{
    ClinicStats, DoctorStats, ReportSummary, clinic_stats, compliance_rate, doctor_stats, summarize,
};
