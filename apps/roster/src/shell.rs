//! Line-oriented front end for the grid.

use anyhow::Result;
use dialoguer::Confirm as Prompt;
use rustyline::{DefaultEditor, error::ReadlineError};
use tracing::debug;

use crate::{
    Confirm, DeleteOutcome, EmployeeApi, GridState, Operation,
    column::Column,
    sort::{Sort, SortDirection},
    view::render_table,
};

const HELP: &str = "\
commands:
  list                     show the grid
  reload                   fetch the full list again
  set <field> <value>      fill a form field (name, position, department, salary)
  form                     show the form
  submit                   add the form as a new employee, or save the edit
  edit <row>               load a row into the form
  cancel                   drop the current edit
  delete <row>             delete a row after confirmation
  filter <column> [text]   show only rows whose column contains text
  clear                    remove the filter
  sort <column> [asc|desc] order the grid by a column; `sort` alone restores load order
  help                     this text
  quit                     leave";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Reload,
    Set(Column, String),
    Form,
    Submit,
    Edit(usize),
    Cancel,
    Delete(usize),
    Filter(Column, String),
    Clear,
    Sort(Option<Sort>),
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(verb, rest)| (verb, rest.trim()))
            .unwrap_or((line, ""));
        let command = match verb.to_ascii_lowercase().as_str() {
            "list" | "ls" => Self::List,
            "reload" => Self::Reload,
            "form" => Self::Form,
            "submit" | "save" => Self::Submit,
            "cancel" => Self::Cancel,
            "clear" => Self::Clear,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "edit" => Self::Edit(parse_row(rest)?),
            "delete" | "rm" => Self::Delete(parse_row(rest)?),
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let field = Column::parse(field)
                    .ok_or_else(|| format!("unknown field {field:?}"))?;
                Self::Set(field, value.trim().to_string())
            }
            "filter" => {
                let (column, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let column = Column::parse(column)
                    .ok_or_else(|| format!("unknown column {column:?}"))?;
                Self::Filter(column, value.trim().to_string())
            }
            "sort" if rest.is_empty() => Self::Sort(None),
            "sort" => {
                let (column, direction) =
                    rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let column = Column::parse(column)
                    .ok_or_else(|| format!("unknown column {column:?}"))?;
                let direction = SortDirection::parse(direction)
                    .ok_or_else(|| format!("expected asc or desc, got {:?}", direction.trim()))?;
                Self::Sort(Some(Sort::new(column, direction)))
            }
            other => return Err(format!("unknown command {other:?}; try `help`")),
        };
        Ok(Some(command))
    }
}

fn parse_row(raw: &str) -> Result<usize, String> {
    raw.parse()
        .map_err(|_| format!("expected a row number, got {raw:?}"))
}

struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        Prompt::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

fn notify(message: &str) {
    eprintln!("! {message}");
}

fn print_grid(grid: &GridState) {
    let filter = grid.filter();
    if filter.is_active() {
        println!("filter: {} contains {:?}", filter.column.label(), filter.value);
    }
    if let Some(sort) = grid.sort() {
        println!("sort: {} {}", sort.column.label(), sort.direction.label());
    }
    print!("{}", render_table(&grid.rows()));
}

fn print_form(grid: &GridState) {
    let form = grid.form();
    let style = grid.submit_style();
    println!("name:       {}", form.name);
    println!("position:   {}", form.position);
    println!("department: {}", form.department);
    println!("salary:     {}", form.salary);
    println!("{}[{}]\x1b[0m", style.ansi(), style.label);
}

pub async fn run(api: &dyn EmployeeApi) -> Result<()> {
    let mut grid = GridState::new();
    if let Err(err) = grid.load(api).await {
        debug!(error = %err, "initial load failed");
        notify(&err.notice(Operation::Load));
    }
    print_grid(&grid);

    let mut editor = DefaultEditor::new()?;
    loop {
        let line = match editor.readline("roster> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        let _ = editor.add_history_entry(line.as_str());
        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                notify(&message);
                continue;
            }
        };
        if command == ShellCommand::Quit {
            break;
        }
        execute(&mut grid, api, command).await;
    }
    Ok(())
}

async fn execute(grid: &mut GridState, api: &dyn EmployeeApi, command: ShellCommand) {
    match command {
        ShellCommand::List => print_grid(grid),
        ShellCommand::Reload => match grid.load(api).await {
            Ok(_) => print_grid(grid),
            Err(err) => notify(&err.notice(Operation::Load)),
        },
        ShellCommand::Set(field, value) => grid.form_mut().set(field, value),
        ShellCommand::Form => print_form(grid),
        ShellCommand::Submit => match grid.submit(api).await {
            Ok(employee) => {
                println!("saved {}", employee.name);
                print_grid(grid);
            }
            Err(err) => notify(&err.notice(Operation::Save)),
        },
        ShellCommand::Edit(row) => match grid.id_at_row(row) {
            Ok(id) => {
                grid.edit(id);
                print_form(grid);
            }
            Err(err) => notify(&err.to_string()),
        },
        ShellCommand::Cancel => grid.cancel_edit(),
        ShellCommand::Delete(row) => {
            let id = match grid.id_at_row(row) {
                Ok(id) => id,
                Err(err) => return notify(&err.to_string()),
            };
            match grid.delete(api, id, &TerminalConfirm).await {
                Ok(DeleteOutcome::Deleted) => print_grid(grid),
                Ok(DeleteOutcome::Cancelled) => {}
                Err(err) => notify(&err.notice(Operation::Delete)),
            }
        }
        ShellCommand::Filter(column, value) => {
            grid.set_filter_column(column);
            grid.set_filter_value(value);
            print_grid(grid);
        }
        ShellCommand::Clear => {
            grid.clear_filter();
            print_grid(grid);
        }
        ShellCommand::Sort(sort) => {
            match sort {
                Some(sort) => grid.sort_by(sort.column, sort.direction),
                None => grid.clear_sort(),
            }
            print_grid(grid);
        }
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Quit => {}
    }
}
