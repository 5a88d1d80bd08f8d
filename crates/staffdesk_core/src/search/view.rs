//! Derived employee view: search, department filter and sort.
//!
//! # Responsibility
//! - Compute the displayed/exported sequence from the authoritative list.
//!
//! # Invariants
//! - `derive_view` never mutates its input and is deterministic.
//! - Filters are conjunctive; each one is optional.
//! - Sorting is stable; without a sort the input order is kept.

use crate::model::employee::{Department, Employee};
use std::cmp::Ordering;

/// Sortable columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    DateOfJoining,
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub ascending: bool,
}

impl SortSpec {
    pub fn ascending(field: SortField) -> Self {
        Self {
            field,
            ascending: true,
        }
    }

    pub fn descending(field: SortField) -> Self {
        Self {
            field,
            ascending: false,
        }
    }
}

/// View parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeQuery {
    /// Free text matched against name and email. Blank means no filter.
    pub search: Option<String>,
    pub department: Option<Department>,
    pub sort: Option<SortSpec>,
}

/// Derives the filtered and sorted view from `all`.
pub fn derive_view(all: &[Employee], query: &EmployeeQuery) -> Vec<Employee> {
    let needle = normalize_search(query.search.as_deref());

    let mut view = all
        .iter()
        .filter(|employee| {
            needle
                .as_deref()
                .map_or(true, |needle| matches_search(employee, needle))
        })
        .filter(|employee| {
            query
                .department
                .map_or(true, |department| employee.department == department)
        })
        .cloned()
        .collect::<Vec<_>>();

    if let Some(sort) = query.sort {
        view.sort_by(|a, b| {
            let ordering = compare_by(sort.field, a, b);
            if sort.ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
    }

    view
}

/// Trims and lower-cases a search term; blank terms become `None`.
pub fn normalize_search(search: Option<&str>) -> Option<String> {
    let trimmed = search?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn matches_search(employee: &Employee, needle: &str) -> bool {
    employee.name.to_lowercase().contains(needle) || employee.email.to_lowercase().contains(needle)
}

fn compare_by(field: SortField, a: &Employee, b: &Employee) -> Ordering {
    match field {
        SortField::Name => compare_names(&a.name, &b.name),
        SortField::DateOfJoining => a.date_of_joining.cmp(&b.date_of_joining),
    }
}

// Case-insensitive first so "bob" sorts next to "Bob", not after "Zed".
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::{derive_view, normalize_search, EmployeeQuery, SortField, SortSpec};
    use crate::model::employee::{Department, Employee};
    use chrono::NaiveDate;

    fn employee(id: u32, name: &str, department: Department, joined: &str) -> Employee {
        Employee {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            department,
            date_of_joining: NaiveDate::parse_from_str(joined, "%Y-%m-%d").unwrap(),
        }
    }

    fn alice_bob() -> Vec<Employee> {
        vec![
            employee(1, "Alice", Department::Hr, "2023-05-10"),
            employee(2, "Bob", Department::Engineering, "2022-11-01"),
        ]
    }

    fn names(view: &[Employee]) -> Vec<&str> {
        view.iter().map(|employee| employee.name.as_str()).collect()
    }

    #[test]
    fn department_filter_keeps_exact_matches() {
        let query = EmployeeQuery {
            department: Some(Department::Engineering),
            ..EmployeeQuery::default()
        };
        assert_eq!(names(&derive_view(&alice_bob(), &query)), vec!["Bob"]);
    }

    #[test]
    fn name_sort_in_both_directions() {
        let all = vec![alice_bob()[1].clone(), alice_bob()[0].clone()];
        let asc = EmployeeQuery {
            sort: Some(SortSpec::ascending(SortField::Name)),
            ..EmployeeQuery::default()
        };
        assert_eq!(names(&derive_view(&all, &asc)), vec!["Alice", "Bob"]);

        let desc = EmployeeQuery {
            sort: Some(SortSpec::descending(SortField::Name)),
            ..EmployeeQuery::default()
        };
        assert_eq!(names(&derive_view(&all, &desc)), vec!["Bob", "Alice"]);
    }

    #[test]
    fn date_sort_is_chronological() {
        let query = EmployeeQuery {
            sort: Some(SortSpec::ascending(SortField::DateOfJoining)),
            ..EmployeeQuery::default()
        };
        assert_eq!(names(&derive_view(&alice_bob(), &query)), vec!["Bob", "Alice"]);
    }

    #[test]
    fn search_matches_name_or_email_case_insensitively() {
        let mut all = alice_bob();
        all[1].email = "robert@corp.example".to_string();

        let by_name = EmployeeQuery {
            search: Some("  ALI ".to_string()),
            ..EmployeeQuery::default()
        };
        assert_eq!(names(&derive_view(&all, &by_name)), vec!["Alice"]);

        let by_email = EmployeeQuery {
            search: Some("Corp".to_string()),
            ..EmployeeQuery::default()
        };
        assert_eq!(names(&derive_view(&all, &by_email)), vec!["Bob"]);
    }

    #[test]
    fn filters_are_conjunctive() {
        let all = vec![
            employee(1, "Alice", Department::Hr, "2023-05-10"),
            employee(2, "Alina", Department::Sales, "2021-01-01"),
            employee(3, "Bob", Department::Sales, "2022-11-01"),
        ];
        let query = EmployeeQuery {
            search: Some("ali".to_string()),
            department: Some(Department::Sales),
            sort: None,
        };
        assert_eq!(names(&derive_view(&all, &query)), vec!["Alina"]);
    }

    #[test]
    fn unsorted_view_keeps_input_order_and_sort_is_stable() {
        let all = vec![
            employee(5, "Same", Department::Hr, "2020-01-01"),
            employee(2, "same", Department::Hr, "2020-01-01"),
            employee(9, "Same", Department::Hr, "2020-01-01"),
        ];
        let unsorted = derive_view(&all, &EmployeeQuery::default());
        assert_eq!(unsorted, all);

        let by_date = EmployeeQuery {
            sort: Some(SortSpec::ascending(SortField::DateOfJoining)),
            ..EmployeeQuery::default()
        };
        let ids: Vec<u32> = derive_view(&all, &by_date).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }

    #[test]
    fn blank_search_is_no_filter() {
        assert_eq!(normalize_search(Some("   ")), None);
        assert_eq!(normalize_search(None), None);
        assert_eq!(normalize_search(Some(" Bo ")).as_deref(), Some("bo"));
    }
}
