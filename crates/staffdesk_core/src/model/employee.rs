//! Employee domain model and form validation rules.
//!
//! # Responsibility
//! - Define the canonical employee record persisted in the durable slot.
//! - Validate raw form input into a typed draft.
//!
//! # Invariants
//! - `id` is assigned by the record store and never changes afterwards.
//! - A draft that passed validation has a name of at least
//!   [`NAME_MIN_LENGTH`] chars, a well-formed email and a joining date that
//!   is not after the validation date.
//!
//! # See also
//! - crate::service::employee_store

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Minimum accepted employee name length, in chars.
pub const NAME_MIN_LENGTH: usize = 3;

const EMAIL_MAX_LENGTH: usize = 254;
const EMAIL_LOCAL_MAX_LENGTH: usize = 64;
const DATE_FORMAT: &str = "%Y-%m-%d";

// Length limits are checked separately; the regex crate has no lookahead.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("valid email regex")
});

/// Stable numeric employee identifier. Always positive once assigned.
pub type EmployeeId = u32;

/// Fixed department set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "HR")]
    Hr,
    Engineering,
    Sales,
    Marketing,
}

impl Department {
    /// All departments in display order.
    pub const ALL: [Department; 4] = [
        Department::Hr,
        Department::Engineering,
        Department::Sales,
        Department::Marketing,
    ];

    /// Returns the persisted/display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hr => "HR",
            Self::Engineering => "Engineering",
            Self::Sales => "Sales",
            Self::Marketing => "Marketing",
        }
    }
}

impl Display for Department {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a department name is not one of [`Department::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDepartment(pub String);

impl Display for UnknownDepartment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown department `{}`; expected HR|Engineering|Sales|Marketing",
            self.0
        )
    }
}

impl Error for UnknownDepartment {}

impl FromStr for Department {
    type Err = UnknownDepartment;

    /// Parses a department name case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Department::ALL
            .into_iter()
            .find(|dept| dept.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownDepartment(trimmed.to_string()))
    }
}

/// Canonical employee record.
///
/// Serialized in camelCase (`dateOfJoining`) to keep the persisted JSON shape
/// stable across versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub department: Department,
    pub date_of_joining: NaiveDate,
}

impl Employee {
    /// Builds a record from a validated draft and a store-assigned id.
    pub fn from_draft(id: EmployeeId, draft: EmployeeDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            department: draft.department,
            date_of_joining: draft.date_of_joining,
        }
    }

    /// Returns the id-less field set of this record.
    pub fn to_draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            department: self.department,
            date_of_joining: self.date_of_joining,
        }
    }
}

/// Employee candidate without an identifier.
///
/// Used for `add` and `update`; the store owns id assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    pub department: Department,
    pub date_of_joining: NaiveDate,
}

/// Raw, untrusted form values as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    pub name: String,
    pub email: String,
    pub department: String,
    /// ISO `YYYY-MM-DD`.
    pub date_of_joining: String,
}

/// Form field identifiers, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    Name,
    Email,
    Department,
    DateOfJoining,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Department => "department",
            Self::DateOfJoining => "dateOfJoining",
        }
    }
}

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Required,
    MinLength { min: usize, actual: usize },
    InvalidEmail,
    UnknownDepartment(String),
    InvalidDate(String),
    FutureDate { date: NaiveDate, today: NaiveDate },
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => write!(f, "is required"),
            Self::MinLength { min, actual } => {
                write!(f, "must be at least {min} characters (got {actual})")
            }
            Self::InvalidEmail => write!(f, "is not a valid email address"),
            Self::UnknownDepartment(value) => write!(f, "`{value}` is not a known department"),
            Self::InvalidDate(value) => write!(f, "`{value}` is not a YYYY-MM-DD date"),
            Self::FutureDate { date, today } => {
                write!(f, "{date} is in the future (today is {today})")
            }
        }
    }
}

/// Per-field validation failures for one form submission.
///
/// Rendered by UI layers as inline messages; never empty when returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<(FormField, FieldError)>,
}

impl FormErrors {
    fn push(&mut self, field: FormField, error: FieldError) {
        self.errors.push((field, error));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns errors reported for one field.
    pub fn for_field(&self, field: FormField) -> Vec<&FieldError> {
        self.errors
            .iter()
            .filter(|(candidate, _)| *candidate == field)
            .map(|(_, error)| error)
            .collect()
    }

    pub fn has(&self, field: FormField) -> bool {
        self.errors.iter().any(|(candidate, _)| *candidate == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(FormField, FieldError)> {
        self.errors.iter()
    }
}

impl Display for FormErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, error) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{} {error}", field.as_str())?;
            first = false;
        }
        Ok(())
    }
}

impl Error for FormErrors {}

impl EmployeeForm {
    /// Pre-fills form values from an existing record.
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            email: employee.email.clone(),
            department: employee.department.as_str().to_string(),
            date_of_joining: employee.date_of_joining.format(DATE_FORMAT).to_string(),
        }
    }

    /// Validates all fields against `today` and returns a typed draft.
    ///
    /// All fields are checked; the error set lists every failed rule. Values
    /// are trimmed before checks and stored trimmed.
    pub fn validate(&self, today: NaiveDate) -> Result<EmployeeDraft, FormErrors> {
        let mut errors = FormErrors::default();

        let name = self.name.trim();
        let name_len = name.chars().count();
        if name_len == 0 {
            errors.push(FormField::Name, FieldError::Required);
        } else if name_len < NAME_MIN_LENGTH {
            errors.push(
                FormField::Name,
                FieldError::MinLength {
                    min: NAME_MIN_LENGTH,
                    actual: name_len,
                },
            );
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FormField::Email, FieldError::Required);
        } else if !is_valid_email(email) {
            errors.push(FormField::Email, FieldError::InvalidEmail);
        }

        let department = match self.department.trim() {
            "" => {
                errors.push(FormField::Department, FieldError::Required);
                None
            }
            raw => match raw.parse::<Department>() {
                Ok(department) => Some(department),
                Err(UnknownDepartment(value)) => {
                    errors.push(FormField::Department, FieldError::UnknownDepartment(value));
                    None
                }
            },
        };

        let date_of_joining = match self.date_of_joining.trim() {
            "" => {
                errors.push(FormField::DateOfJoining, FieldError::Required);
                None
            }
            raw => match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
                Ok(date) if date > today => {
                    errors.push(FormField::DateOfJoining, FieldError::FutureDate { date, today });
                    None
                }
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push(
                        FormField::DateOfJoining,
                        FieldError::InvalidDate(raw.to_string()),
                    );
                    None
                }
            },
        };

        match (department, date_of_joining) {
            (Some(department), Some(date_of_joining)) if errors.is_empty() => Ok(EmployeeDraft {
                name: name.to_string(),
                email: email.to_string(),
                department,
                date_of_joining,
            }),
            _ => Err(errors),
        }
    }
}

/// Checks the conventional `local@domain` email shape.
pub fn is_valid_email(value: &str) -> bool {
    if value.len() > EMAIL_MAX_LENGTH {
        return false;
    }
    let Some((local, _)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > EMAIL_LOCAL_MAX_LENGTH {
        return false;
    }
    EMAIL_RE.is_match(value)
}
