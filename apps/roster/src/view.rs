use std::fmt::Write as _;

use products_hr::Employee;

const HEADERS: [&str; 5] = ["ID", "Name", "Position", "Department", "Salary"];

/// One displayed row. `number` is the position in the current view; the
/// database id stays hidden but is kept for targeting edits and deletes.
#[derive(Clone, Debug, PartialEq)]
pub struct GridRow {
    pub number: usize,
    pub id: i32,
    pub name: String,
    pub position: String,
    pub department: String,
    pub salary: String,
}

impl GridRow {
    pub fn new(number: usize, employee: &Employee) -> Self {
        Self {
            number,
            id: employee.id,
            name: employee.name.clone(),
            position: employee.position.clone(),
            department: employee.department.clone(),
            salary: format_salary(employee.salary),
        }
    }

    fn cells(&self) -> [String; 5] {
        [
            self.number.to_string(),
            self.name.clone(),
            self.position.clone(),
            self.department.clone(),
            self.salary.clone(),
        ]
    }
}

pub fn format_salary(salary: Option<f64>) -> String {
    match salary {
        Some(value) => format!("₹{value}"),
        None => "-".to_string(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Green,
    Yellow,
}

/// Presentation of the submit action for a given form state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitStyle {
    pub label: &'static str,
    pub tone: Tone,
    pub disabled: bool,
}

const SUBMIT_STYLES: [(bool, &str, Tone); 2] = [
    (false, "Add", Tone::Green),
    (true, "Update", Tone::Yellow),
];

impl SubmitStyle {
    pub fn for_state(editing: bool, busy: bool) -> Self {
        let (_, label, tone) = SUBMIT_STYLES
            .iter()
            .copied()
            .find(|(mode, _, _)| *mode == editing)
            .unwrap_or(SUBMIT_STYLES[0]);
        Self {
            label,
            tone,
            disabled: busy,
        }
    }

    pub fn ansi(&self) -> &'static str {
        match (self.disabled, self.tone) {
            (true, _) => "\x1b[2m",
            (false, Tone::Green) => "\x1b[32m",
            (false, Tone::Yellow) => "\x1b[33m",
        }
    }
}

/// Plain-text table with a header rule.
pub fn render_table(rows: &[GridRow]) -> String {
    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));
    for row in rows {
        push_line(&mut out, &row.cells(), &widths);
    }
    if rows.is_empty() {
        out.push_str("(no rows)\n");
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: i32, name: &str, salary: Option<f64>) -> Employee {
        Employee {
            id,
            name: name.into(),
            position: "Dev".into(),
            department: "Eng".into(),
            salary,
        }
    }

    #[test]
    fn salary_formatting() {
        assert_eq!(format_salary(None), "-");
        assert_eq!(format_salary(Some(50000.0)), "₹50000");
        assert_eq!(format_salary(Some(1250.5)), "₹1250.5");
    }

    #[test]
    fn row_number_is_not_the_database_id() {
        let row = GridRow::new(1, &employee(42, "Asha", None));
        assert_eq!(row.cells()[0], "1");
        assert_eq!(row.id, 42);
    }

    #[test]
    fn submit_style_lookup() {
        assert_eq!(
            SubmitStyle::for_state(false, false),
            SubmitStyle {
                label: "Add",
                tone: Tone::Green,
                disabled: false
            }
        );
        let editing_busy = SubmitStyle::for_state(true, true);
        assert_eq!(editing_busy.label, "Update");
        assert_eq!(editing_busy.tone, Tone::Yellow);
        assert!(editing_busy.disabled);
    }

    #[test]
    fn table_aligns_columns() {
        let rows = vec![
            GridRow::new(1, &employee(10, "Asha", Some(50000.0))),
            GridRow::new(2, &employee(11, "Bo", None)),
        ];
        let table = render_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ID | Name | Position"));
        assert!(lines[2].starts_with("1  | Asha | Dev"));
        assert!(lines[3].ends_with("| -"));
    }

    #[test]
    fn empty_table_says_so() {
        assert!(render_table(&[]).ends_with("(no rows)\n"));
    }
}
