//! Dashboard use-case controller.
//!
//! # Responsibility
//! - Hold form state and create/edit mode.
//! - Route submits and deletes to the record store.
//! - Keep the derived view in step with the store and the filter/sort state.
//!
//! # Invariants
//! - The derived view is recomputed after every store notification and every
//!   search/department/sort change; it is never edited in place.
//! - A rejected submit changes nothing: mode, form values and list stay put.
//! - Unconfirmed deletes never reach the store.

use crate::export::{export_csv, CsvExport, ExportError};
use crate::model::employee::{Department, Employee, EmployeeForm, EmployeeId, FormErrors};
use crate::repo::slot_repo::SlotRepository;
use crate::search::view::{derive_view, EmployeeQuery, SortField, SortSpec};
use crate::service::employee_store::{EmployeeStore, StoreResult, SubscriptionId};
use chrono::{Local, NaiveDate};
use log::{debug, info};
use std::cell::RefCell;
use std::rc::Rc;

/// Whether a submit creates a record or replaces the selected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Create,
    Edit(EmployeeId),
}

/// Result of one form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(Employee),
    Updated(EmployeeId),
    /// Validation failed; nothing was changed.
    Invalid(FormErrors),
}

impl SubmitOutcome {
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid(_))
    }
}

/// Confirmation boundary for destructive actions.
pub trait ConfirmPrompt {
    fn confirm(&mut self, title: &str, content: &str) -> bool;
}

/// Controller over one record store.
pub struct DashboardController<R: SlotRepository> {
    store: EmployeeStore<R>,
    snapshot: Rc<RefCell<Vec<Employee>>>,
    subscription: SubscriptionId,
    form: EmployeeForm,
    mode: EditMode,
    search: String,
    department: Option<Department>,
    sort: Option<SortSpec>,
    filtered: Vec<Employee>,
}

impl<R: SlotRepository> DashboardController<R> {
    /// Takes ownership of `store`, subscribes to it and computes the first view.
    pub fn new(mut store: EmployeeStore<R>) -> Self {
        let snapshot = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&snapshot);
        let subscription = store.subscribe(move |list| {
            *sink.borrow_mut() = list.to_vec();
        });

        let mut controller = Self {
            store,
            snapshot,
            subscription,
            form: EmployeeForm::default(),
            mode: EditMode::Create,
            search: String::new(),
            department: None,
            sort: None,
            filtered: Vec::new(),
        };
        controller.apply_filters();
        controller
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &EmployeeStore<R> {
        &self.store
    }

    /// Detaches from the store and hands it back.
    pub fn into_store(mut self) -> EmployeeStore<R> {
        self.store.unsubscribe(self.subscription);
        self.store
    }

    /// Latest authoritative list as delivered by the store.
    pub fn employees(&self) -> Vec<Employee> {
        self.snapshot.borrow().clone()
    }

    /// Current derived view.
    pub fn filtered_employees(&self) -> &[Employee] {
        &self.filtered
    }

    pub fn form(&self) -> &EmployeeForm {
        &self.form
    }

    /// Replaces the form values; mode is unaffected.
    pub fn set_form(&mut self, form: EmployeeForm) {
        self.form = form;
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn editing_id(&self) -> Option<EmployeeId> {
        match self.mode {
            EditMode::Create => None,
            EditMode::Edit(id) => Some(id),
        }
    }

    /// Selects `employee` for editing and pre-fills the form.
    pub fn start_edit(&mut self, employee: &Employee) {
        self.mode = EditMode::Edit(employee.id);
        self.form = EmployeeForm::from_employee(employee);
        debug!("event=edit_start module=dashboard status=ok id={}", employee.id);
    }

    /// Leaves edit mode and clears the form.
    pub fn cancel(&mut self) {
        self.mode = EditMode::Create;
        self.form = EmployeeForm::default();
    }

    /// Submits the form, validating against the local calendar date.
    pub fn submit(&mut self) -> StoreResult<SubmitOutcome> {
        self.submit_on(Local::now().date_naive())
    }

    /// Submits the form, validating against `today`.
    ///
    /// # Errors
    /// - Returns store errors unchanged; mode and form are kept on error.
    pub fn submit_on(&mut self, today: NaiveDate) -> StoreResult<SubmitOutcome> {
        let draft = match self.form.validate(today) {
            Ok(draft) => draft,
            Err(errors) => {
                info!(
                    "event=form_submit module=dashboard status=invalid error_count={}",
                    errors.len()
                );
                return Ok(SubmitOutcome::Invalid(errors));
            }
        };

        let outcome = match self.mode {
            EditMode::Edit(id) => {
                self.store.update(id, draft)?;
                SubmitOutcome::Updated(id)
            }
            EditMode::Create => SubmitOutcome::Created(self.store.add(draft)?),
        };

        self.cancel();
        self.apply_filters();
        Ok(outcome)
    }

    /// Deletes `id` when `confirmed`; returns whether a delete happened.
    ///
    /// Deleting the record under edit also leaves edit mode.
    pub fn delete(&mut self, id: EmployeeId, confirmed: bool) -> StoreResult<bool> {
        if !confirmed {
            debug!("event=employee_delete module=dashboard status=skipped id={id}");
            return Ok(false);
        }

        self.store.delete(id)?;
        if self.mode == EditMode::Edit(id) {
            self.cancel();
        }
        self.apply_filters();
        Ok(true)
    }

    /// Asks `prompt` before deleting `id`.
    pub fn delete_with_prompt(
        &mut self,
        id: EmployeeId,
        prompt: &mut dyn ConfirmPrompt,
    ) -> StoreResult<bool> {
        let confirmed = prompt.confirm(
            "Delete employee",
            &format!("Delete employee #{id}? This cannot be undone."),
        );
        self.delete(id, confirmed)
    }

    /// Sorts by `field`, flipping direction when it is already active.
    pub fn set_sort(&mut self, field: SortField) {
        self.sort = Some(match self.sort {
            Some(current) if current.field == field => SortSpec {
                field,
                ascending: !current.ascending,
            },
            _ => SortSpec::ascending(field),
        });
        self.apply_filters();
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.apply_filters();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_department(&mut self, department: Option<Department>) {
        self.department = department;
        self.apply_filters();
    }

    pub fn department(&self) -> Option<Department> {
        self.department
    }

    /// Current view parameters.
    pub fn query(&self) -> EmployeeQuery {
        EmployeeQuery {
            search: Some(self.search.clone()),
            department: self.department,
            sort: self.sort,
        }
    }

    /// Exports the current derived view, not the full list.
    pub fn export_csv(&self) -> Result<CsvExport, ExportError> {
        let export = export_csv(&self.filtered)?;
        info!(
            "event=csv_export module=dashboard status=ok rows={}",
            self.filtered.len()
        );
        Ok(export)
    }

    fn apply_filters(&mut self) {
        let query = self.query();
        self.filtered = derive_view(&self.snapshot.borrow(), &query);
        debug!(
            "event=view_refresh module=dashboard status=ok total={} visible={}",
            self.snapshot.borrow().len(),
            self.filtered.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfirmPrompt, DashboardController, EditMode, SubmitOutcome};
    use crate::db::open_db_in_memory;
    use crate::model::employee::{EmployeeForm, FormField};
    use crate::repo::slot_repo::SqliteSlotRepository;
    use crate::search::view::{SortField, SortSpec};
    use crate::service::employee_store::EmployeeStore;
    use chrono::NaiveDate;

    struct Answer(bool, usize);

    impl ConfirmPrompt for Answer {
        fn confirm(&mut self, _title: &str, _content: &str) -> bool {
            self.1 += 1;
            self.0
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn form(name: &str) -> EmployeeForm {
        EmployeeForm {
            name: name.to_string(),
            email: "new@example.com".to_string(),
            department: "Sales".to_string(),
            date_of_joining: "2024-05-01".to_string(),
        }
    }

    #[test]
    fn set_sort_toggles_direction_and_resets_on_new_field() {
        let conn = open_db_in_memory().unwrap();
        let store = EmployeeStore::load(SqliteSlotRepository::new(&conn)).unwrap();
        let mut controller = DashboardController::new(store);

        controller.set_sort(SortField::Name);
        assert_eq!(controller.sort(), Some(SortSpec::ascending(SortField::Name)));
        controller.set_sort(SortField::Name);
        assert_eq!(controller.sort(), Some(SortSpec::descending(SortField::Name)));
        controller.set_sort(SortField::DateOfJoining);
        assert_eq!(
            controller.sort(),
            Some(SortSpec::ascending(SortField::DateOfJoining))
        );
    }

    #[test]
    fn invalid_submit_keeps_mode_and_form() {
        let conn = open_db_in_memory().unwrap();
        let store = EmployeeStore::load(SqliteSlotRepository::new(&conn)).unwrap();
        let mut controller = DashboardController::new(store);
        let alice = controller.employees()[0].clone();

        controller.start_edit(&alice);
        let mut edited = controller.form().clone();
        edited.name = "Al".to_string();
        controller.set_form(edited.clone());

        let outcome = controller.submit_on(today()).unwrap();
        assert!(matches!(&outcome, SubmitOutcome::Invalid(errors) if errors.has(FormField::Name)));
        assert!(!outcome.is_valid());
        assert_eq!(controller.mode(), EditMode::Edit(alice.id));
        assert_eq!(controller.form(), &edited);
        assert_eq!(controller.employees()[0], alice);
    }

    #[test]
    fn prompt_decides_delete() {
        let conn = open_db_in_memory().unwrap();
        let store = EmployeeStore::load(SqliteSlotRepository::new(&conn)).unwrap();
        let mut controller = DashboardController::new(store);

        let mut refuse = Answer(false, 0);
        assert!(!controller.delete_with_prompt(1, &mut refuse).unwrap());
        assert_eq!(refuse.1, 1);
        assert_eq!(controller.employees().len(), 2);

        let mut accept = Answer(true, 0);
        assert!(controller.delete_with_prompt(1, &mut accept).unwrap());
        assert_eq!(controller.employees().len(), 1);
    }

    #[test]
    fn deleting_record_under_edit_returns_to_create_mode() {
        let conn = open_db_in_memory().unwrap();
        let store = EmployeeStore::load(SqliteSlotRepository::new(&conn)).unwrap();
        let mut controller = DashboardController::new(store);
        let bob = controller.employees()[1].clone();

        controller.start_edit(&bob);
        controller.delete(bob.id, true).unwrap();
        assert_eq!(controller.mode(), EditMode::Create);
        assert_eq!(controller.form(), &EmployeeForm::default());
    }

    #[test]
    fn create_submit_clears_form_and_refreshes_view() {
        let conn = open_db_in_memory().unwrap();
        let store = EmployeeStore::load(SqliteSlotRepository::new(&conn)).unwrap();
        let mut controller = DashboardController::new(store);
        controller.set_search("carol");
        assert!(controller.filtered_employees().is_empty());

        controller.set_form(form("Carol White"));
        let outcome = controller.submit_on(today()).unwrap();
        assert!(matches!(outcome, SubmitOutcome::Created(ref created) if created.id == 3));
        assert_eq!(controller.form(), &EmployeeForm::default());
        assert_eq!(controller.filtered_employees().len(), 1);
        assert_eq!(controller.filtered_employees()[0].name, "Carol White");
    }

    #[test]
    fn into_store_releases_subscription() {
        let conn = open_db_in_memory().unwrap();
        let store = EmployeeStore::load(SqliteSlotRepository::new(&conn)).unwrap();
        let controller = DashboardController::new(store);
        assert_eq!(controller.store().subscriber_count(), 1);
        assert_eq!(controller.into_store().subscriber_count(), 0);
    }
}
