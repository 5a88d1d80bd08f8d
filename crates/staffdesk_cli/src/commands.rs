//! Command handlers over the core dashboard controller.
//!
//! # Responsibility
//! - Translate parsed arguments into controller calls.
//! - Render views, validation errors and theme state as plain text.

use crate::args::{
    AddArgs, DeleteArgs, EditArgs, ExportArgs, ThemeAction, ThemeArgs, ViewArgs,
};
use dialoguer::Confirm;
use log::info;
use staffdesk_core::{
    ConfirmPrompt, DashboardController, Employee, EmployeeForm, EmployeeStore, FormErrors,
    SqliteSlotRepository, SubmitOutcome, Theme, ThemeService,
};
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

pub type CommandResult = Result<(), Box<dyn Error>>;

type Controller<'conn> = DashboardController<SqliteSlotRepository<'conn>>;

/// Terminal confirmation backed by `dialoguer`.
struct TerminalPrompt;

impl ConfirmPrompt for TerminalPrompt {
    fn confirm(&mut self, title: &str, content: &str) -> bool {
        Confirm::new()
            .with_prompt(format!("{title}: {content}"))
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

fn controller(repo: SqliteSlotRepository<'_>) -> Result<Controller<'_>, Box<dyn Error>> {
    Ok(DashboardController::new(EmployeeStore::load(repo)?))
}

fn apply_view(controller: &mut Controller<'_>, view: &ViewArgs) {
    if let Some(search) = &view.search {
        controller.set_search(search.as_str());
    }
    controller.set_department(view.department);
    if let Some(column) = view.sort {
        controller.set_sort(column.into());
        if view.desc {
            controller.set_sort(column.into());
        }
    }
}

pub fn list(repo: SqliteSlotRepository<'_>, view: &ViewArgs) -> CommandResult {
    let mut controller = controller(repo)?;
    apply_view(&mut controller, view);
    print_table(controller.filtered_employees());
    Ok(())
}

pub fn add(repo: SqliteSlotRepository<'_>, args: AddArgs) -> CommandResult {
    let mut controller = controller(repo)?;
    controller.set_form(EmployeeForm {
        name: args.name,
        email: args.email,
        department: args.department,
        date_of_joining: args.joined,
    });
    report_submit(controller.submit()?)
}

pub fn edit(repo: SqliteSlotRepository<'_>, args: EditArgs) -> CommandResult {
    let mut controller = controller(repo)?;
    let employee = controller
        .store()
        .get(args.id)
        .cloned()
        .ok_or_else(|| format!("employee not found: {}", args.id))?;

    controller.start_edit(&employee);
    let mut form = controller.form().clone();
    if let Some(name) = args.name {
        form.name = name;
    }
    if let Some(email) = args.email {
        form.email = email;
    }
    if let Some(department) = args.department {
        form.department = department;
    }
    if let Some(joined) = args.joined {
        form.date_of_joining = joined;
    }
    controller.set_form(form);
    report_submit(controller.submit()?)
}

pub fn delete(repo: SqliteSlotRepository<'_>, args: DeleteArgs) -> CommandResult {
    let mut controller = controller(repo)?;
    let deleted = if args.yes {
        controller.delete(args.id, true)?
    } else {
        controller.delete_with_prompt(args.id, &mut TerminalPrompt)?
    };

    if deleted {
        println!("deleted employee #{}", args.id);
    } else {
        println!("cancelled");
    }
    Ok(())
}

pub fn export(repo: SqliteSlotRepository<'_>, args: ExportArgs) -> CommandResult {
    let mut controller = controller(repo)?;
    apply_view(&mut controller, &args.view);
    let export = controller.export_csv()?;

    let target = args
        .out
        .unwrap_or_else(|| PathBuf::from(export.file_name));
    if target.as_os_str() == "-" {
        writeln!(std::io::stdout(), "{}", export.content)?;
        return Ok(());
    }

    std::fs::write(&target, export.content.as_bytes())?;
    info!(
        "event=csv_written module=cli status=ok rows={}",
        controller.filtered_employees().len()
    );
    println!(
        "wrote {} rows ({}) to {}",
        controller.filtered_employees().len(),
        export.mime_type,
        target.display()
    );
    Ok(())
}

pub fn theme(repo: SqliteSlotRepository<'_>, args: ThemeArgs) -> CommandResult {
    let mut service = ThemeService::load(repo)?;
    match args.action {
        None => {}
        Some(ThemeAction::Toggle) => {
            service.toggle()?;
        }
        Some(ThemeAction::Light) => service.set(Theme::Light)?,
        Some(ThemeAction::Dark) => service.set(Theme::Dark)?,
    }
    println!("{}", service.get());
    Ok(())
}

fn report_submit(outcome: SubmitOutcome) -> CommandResult {
    match outcome {
        SubmitOutcome::Created(employee) => {
            println!("created employee #{}", employee.id);
            Ok(())
        }
        SubmitOutcome::Updated(id) => {
            println!("updated employee #{id}");
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            print_form_errors(&errors);
            Err("validation failed".into())
        }
    }
}

fn print_form_errors(errors: &FormErrors) {
    for (field, error) in errors.iter() {
        eprintln!("  {}: {error}", field.as_str());
    }
}

fn print_table(rows: &[Employee]) {
    println!(
        "{:>4}  {:<24}  {:<32}  {:<12}  {}",
        "ID", "Name", "Email", "Department", "Date of Joining"
    );
    for employee in rows {
        println!(
            "{:>4}  {:<24}  {:<32}  {:<12}  {}",
            employee.id,
            employee.name,
            employee.email,
            employee.department,
            employee.date_of_joining
        );
    }
    println!("{} employee(s)", rows.len());
}
