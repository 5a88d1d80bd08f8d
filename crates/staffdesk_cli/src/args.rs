//! Command-line argument model.

use clap::{Args, Parser, Subcommand, ValueEnum};
use staffdesk_core::{Department, EmployeeId, SortField};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "staffdesk", version, about = "Manage employee records")]
pub struct Cli {
    /// Directory holding the database and logs.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the filtered and sorted employee list.
    List(ViewArgs),
    /// Create an employee.
    Add(AddArgs),
    /// Change fields of an existing employee.
    Edit(EditArgs),
    /// Delete an employee after confirmation.
    Delete(DeleteArgs),
    /// Write the filtered view as CSV.
    Export(ExportArgs),
    /// Show or change the UI theme.
    Theme(ThemeArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortColumn {
    Name,
    Date,
}

impl From<SortColumn> for SortField {
    fn from(value: SortColumn) -> Self {
        match value {
            SortColumn::Name => SortField::Name,
            SortColumn::Date => SortField::DateOfJoining,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ViewArgs {
    /// Case-insensitive match on name or email.
    #[arg(long, short)]
    pub search: Option<String>,

    #[arg(long, short)]
    pub department: Option<Department>,

    #[arg(long, value_enum)]
    pub sort: Option<SortColumn>,

    /// Sort descending.
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub department: String,
    /// Joining date, YYYY-MM-DD.
    #[arg(long)]
    pub joined: String,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    pub id: EmployeeId,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub joined: Option<String>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: EmployeeId,
    /// Skip the confirmation prompt.
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Output file; `-` writes to stdout. Defaults to ./employees.csv.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    Toggle,
    Light,
    Dark,
}

#[derive(Debug, Args)]
pub struct ThemeArgs {
    #[arg(value_enum)]
    pub action: Option<ThemeAction>,
}
