//! CSV export of an employee view.
//!
//! # Responsibility
//! - Serialize a derived view into a downloadable CSV payload.
//!
//! # Invariants
//! - Header row is fixed; one data row per record, in view order.
//! - Rows are separated by `\n` with no trailing terminator; fields with
//!   commas, quotes or newlines are quoted.

use crate::model::employee::Employee;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const CSV_FILE_NAME: &str = "employees.csv";
pub const CSV_MIME_TYPE: &str = "text/csv";
pub const CSV_HEADER: [&str; 5] = ["ID", "Name", "Email", "Department", "Date of Joining"];

/// Export failure. Only raised by the CSV writer itself.
#[derive(Debug)]
pub enum ExportError {
    Csv(csv::Error),
    Encoding(std::string::FromUtf8Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv(err) => write!(f, "failed to write csv: {err}"),
            Self::Encoding(err) => write!(f, "csv output is not UTF-8: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Csv(err) => Some(err),
            Self::Encoding(err) => Some(err),
        }
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<csv::IntoInnerError<csv::Writer<Vec<u8>>>> for ExportError {
    fn from(value: csv::IntoInnerError<csv::Writer<Vec<u8>>>) -> Self {
        Self::Csv(value.into_error().into())
    }
}

/// A ready-to-save CSV document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub content: String,
}

/// Serializes `view` to CSV text.
pub fn employees_to_csv(view: &[Employee]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for employee in view {
        writer.write_record([
            employee.id.to_string().as_str(),
            employee.name.as_str(),
            employee.email.as_str(),
            employee.department.as_str(),
            employee.date_of_joining.format("%Y-%m-%d").to_string().as_str(),
        ])?;
    }

    let mut bytes = writer.into_inner()?;
    // Rows are joined, not terminated.
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    String::from_utf8(bytes).map_err(ExportError::Encoding)
}

/// Builds the `employees.csv` download for `view`.
pub fn export_csv(view: &[Employee]) -> Result<CsvExport, ExportError> {
    Ok(CsvExport {
        file_name: CSV_FILE_NAME,
        mime_type: CSV_MIME_TYPE,
        content: employees_to_csv(view)?,
    })
}

#[cfg(test)]
mod tests {
    use super::{employees_to_csv, export_csv};
    use crate::model::employee::{Department, Employee};
    use chrono::NaiveDate;

    fn employee(id: u32, name: &str) -> Employee {
        Employee {
            id,
            name: name.to_string(),
            email: "someone@example.com".to_string(),
            department: Department::Marketing,
            date_of_joining: NaiveDate::from_ymd_opt(2020, 2, 29).unwrap(),
        }
    }

    #[test]
    fn empty_view_is_header_only() {
        assert_eq!(
            employees_to_csv(&[]).unwrap(),
            "ID,Name,Email,Department,Date of Joining"
        );
    }

    #[test]
    fn rows_follow_view_order() {
        let csv = employees_to_csv(&[employee(9, "Zed Ray"), employee(3, "Amy Lo")]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "9,Zed Ray,someone@example.com,Marketing,2020-02-29");
        assert_eq!(lines[2], "3,Amy Lo,someone@example.com,Marketing,2020-02-29");
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn newline_inside_last_field_survives_trimming() {
        let mut last = employee(2, "Amy Lo");
        last.email = "line\nbreak".to_string();
        let csv = employees_to_csv(&[last]).unwrap();
        assert!(csv.ends_with("\"line\nbreak\",Marketing,2020-02-29"));
    }

    #[test]
    fn embedded_commas_and_quotes_are_quoted() {
        let csv = employees_to_csv(&[employee(1, "Smith, \"Jo\"")]).unwrap();
        assert!(csv.contains("1,\"Smith, \"\"Jo\"\"\",someone@example.com"));
    }

    #[test]
    fn export_carries_download_metadata() {
        let export = export_csv(&[]).unwrap();
        assert_eq!(export.file_name, "employees.csv");
        assert_eq!(export.mime_type, "text/csv");
    }
}
