//! Core domain logic for StaffDesk.
//! This crate is the single source of truth for employee records, the
//! derived dashboard view and their persistence.

pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use config::CoreConfig;
pub use export::{export_csv, CsvExport, ExportError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{
    Department, Employee, EmployeeDraft, EmployeeForm, EmployeeId, FieldError, FormErrors,
    FormField,
};
pub use repo::slot_repo::{RepoError, RepoResult, SlotRepository, SqliteSlotRepository};
pub use search::view::{derive_view, EmployeeQuery, SortField, SortSpec};
pub use service::dashboard::{ConfirmPrompt, DashboardController, EditMode, SubmitOutcome};
pub use service::employee_store::{
    EmployeeStore, LoadSource, StoreError, StoreResult, SubscriptionId,
};
pub use service::theme_service::{ClassListSink, Theme, ThemeService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
