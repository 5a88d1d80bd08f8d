//! Authoritative employee list with write-through persistence.
//!
//! # Responsibility
//! - Own the in-memory employee list and mirror it to the `employees_v1` slot.
//! - Assign ids for new records.
//! - Push the full list to subscribers after every mutation.
//!
//! # Invariants
//! - Ids are unique across the list at all times.
//! - After every successful mutation the slot and memory hold the same list.
//! - A failed slot write leaves memory and subscribers untouched.
//! - Unknown ids are reported as `NotFound` and never persisted or broadcast.

use crate::model::employee::{Department, Employee, EmployeeDraft, EmployeeId};
use crate::repo::slot_repo::{RepoError, SlotRepository, EMPLOYEES_SLOT};
use chrono::NaiveDate;
use log::{info, warn};
use std::collections::{BTreeMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for employee mutations.
#[derive(Debug)]
pub enum StoreError {
    Repo(RepoError),
    NotFound(EmployeeId),
    DuplicateId(EmployeeId),
    IdSpaceExhausted,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::DuplicateId(id) => write!(f, "duplicate employee id: {id}"),
            Self::IdSpaceExhausted => write!(f, "no employee id left to assign"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Handle returned by [`EmployeeStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&[Employee])>;

/// How the initial list was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Slot was never written or is blank; demo records were seeded and
    /// persisted.
    Seeded,
    /// Slot held a readable list.
    Restored,
    /// Slot could not be read or decoded; started empty.
    Corrupt,
}

/// Record store for employees backed by a durable slot.
pub struct EmployeeStore<R: SlotRepository> {
    repo: R,
    employees: Vec<Employee>,
    subscribers: BTreeMap<SubscriptionId, Subscriber>,
    next_subscription: u64,
    load_source: LoadSource,
}

impl<R: SlotRepository> EmployeeStore<R> {
    /// Loads the list from the slot, seeding demo data on first run.
    ///
    /// An absent or blank slot seeds. A slot that cannot be read or decoded
    /// starts empty and is left as is.
    ///
    /// # Errors
    /// - Returns `Repo` when the seed list cannot be written back.
    pub fn load(repo: R) -> StoreResult<Self> {
        let raw = match repo.read_slot(EMPLOYEES_SLOT) {
            Ok(raw) => raw.filter(|value| !value.trim().is_empty()),
            Err(err) => {
                warn!(
                    "event=store_load module=store status=degraded source=slot error_code=slot_unreadable reason={err}"
                );
                return Ok(Self::with_list(repo, Vec::new(), LoadSource::Corrupt));
            }
        };

        let (employees, load_source) = match raw {
            None => {
                let seed = seed_employees();
                write_list(&repo, &seed)?;
                info!(
                    "event=store_load module=store status=ok source=seed count={}",
                    seed.len()
                );
                (seed, LoadSource::Seeded)
            }
            Some(raw) => match decode_list(&raw) {
                Ok(list) => {
                    info!(
                        "event=store_load module=store status=ok source=slot count={}",
                        list.len()
                    );
                    (list, LoadSource::Restored)
                }
                Err(reason) => {
                    warn!(
                        "event=store_load module=store status=degraded source=slot error_code=slot_corrupt reason={reason}"
                    );
                    (Vec::new(), LoadSource::Corrupt)
                }
            },
        };

        Ok(Self::with_list(repo, employees, load_source))
    }

    fn with_list(repo: R, employees: Vec<Employee>, load_source: LoadSource) -> Self {
        Self {
            repo,
            employees,
            subscribers: BTreeMap::new(),
            next_subscription: 0,
            load_source,
        }
    }

    /// Returns how the list was obtained at construction.
    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    /// Returns an independent copy of the current list.
    pub fn get_all(&self) -> Vec<Employee> {
        self.employees.clone()
    }

    /// Returns one record by id.
    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id == id)
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Appends a new record with id `max + 1` (or `1` when empty).
    pub fn add(&mut self, draft: EmployeeDraft) -> StoreResult<Employee> {
        let id = next_id(&self.employees)?;
        let employee = Employee::from_draft(id, draft);

        let mut next = self.employees.clone();
        next.push(employee.clone());
        self.commit(next)?;

        info!("event=employee_add module=store status=ok id={id}");
        Ok(employee)
    }

    /// Replaces every field except `id` on the record matching `id`.
    pub fn update(&mut self, id: EmployeeId, draft: EmployeeDraft) -> StoreResult<()> {
        let Some(index) = self.position(id) else {
            warn!("event=employee_update module=store status=error error_code=not_found id={id}");
            return Err(StoreError::NotFound(id));
        };

        let mut next = self.employees.clone();
        next[index] = Employee::from_draft(id, draft);
        self.commit(next)?;

        info!("event=employee_update module=store status=ok id={id}");
        Ok(())
    }

    /// Removes the record matching `id`.
    pub fn delete(&mut self, id: EmployeeId) -> StoreResult<()> {
        let Some(index) = self.position(id) else {
            warn!("event=employee_delete module=store status=error error_code=not_found id={id}");
            return Err(StoreError::NotFound(id));
        };

        let mut next = self.employees.clone();
        next.remove(index);
        self.commit(next)?;

        info!("event=employee_delete module=store status=ok id={id}");
        Ok(())
    }

    /// Overwrites the whole list.
    ///
    /// # Errors
    /// - Returns `DuplicateId` when two records share an id; nothing changes.
    pub fn replace_all(&mut self, list: Vec<Employee>) -> StoreResult<()> {
        if let Some(id) = first_duplicate_id(&list) {
            warn!(
                "event=employee_replace_all module=store status=error error_code=duplicate_id id={id}"
            );
            return Err(StoreError::DuplicateId(id));
        }

        let count = list.len();
        self.commit(list)?;

        info!("event=employee_replace_all module=store status=ok count={count}");
        Ok(())
    }

    /// Registers a subscriber and immediately delivers the current list.
    pub fn subscribe(&mut self, mut callback: impl FnMut(&[Employee]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;

        callback(&self.employees);
        self.subscribers.insert(id, Box::new(callback));
        id
    }

    /// Removes a subscriber. Returns `false` when the handle is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn position(&self, id: EmployeeId) -> Option<usize> {
        self.employees.iter().position(|employee| employee.id == id)
    }

    fn commit(&mut self, next: Vec<Employee>) -> StoreResult<()> {
        write_list(&self.repo, &next)?;
        self.employees = next;
        for callback in self.subscribers.values_mut() {
            callback(&self.employees);
        }
        Ok(())
    }
}

fn write_list<R: SlotRepository>(repo: &R, list: &[Employee]) -> StoreResult<()> {
    let encoded = serde_json::to_string(list).map_err(RepoError::from)?;
    repo.write_slot(EMPLOYEES_SLOT, &encoded)?;
    Ok(())
}

fn decode_list(raw: &str) -> Result<Vec<Employee>, String> {
    let list: Vec<Employee> = serde_json::from_str(raw).map_err(|err| err.to_string())?;
    if let Some(id) = first_duplicate_id(&list) {
        return Err(format!("duplicate id {id}"));
    }
    Ok(list)
}

fn next_id(list: &[Employee]) -> StoreResult<EmployeeId> {
    match list.iter().map(|employee| employee.id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or(StoreError::IdSpaceExhausted),
    }
}

fn first_duplicate_id(list: &[Employee]) -> Option<EmployeeId> {
    let mut seen = HashSet::with_capacity(list.len());
    list.iter()
        .map(|employee| employee.id)
        .find(|id| !seen.insert(*id))
}

/// Demo records written on first run.
pub fn seed_employees() -> Vec<Employee> {
    vec![
        Employee {
            id: 1,
            name: "Alice Smith".to_string(),
            email: "alice@example.com".to_string(),
            department: Department::Engineering,
            date_of_joining: seed_date(2023, 5, 10),
        },
        Employee {
            id: 2,
            name: "Bob Johnson".to_string(),
            email: "bob@example.com".to_string(),
            department: Department::Hr,
            date_of_joining: seed_date(2022, 11, 1),
        },
    ]
}

fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
