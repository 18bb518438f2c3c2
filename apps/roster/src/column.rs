use std::cmp::Ordering;

use products_hr::Employee;

/// The four editable, filterable and sortable employee columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Column {
    #[default]
    Name,
    Position,
    Department,
    Salary,
}

impl Column {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "position" => Some(Self::Position),
            "department" | "dept" => Some(Self::Department),
            "salary" => Some(Self::Salary),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Position => "position",
            Self::Department => "department",
            Self::Salary => "salary",
        }
    }

    /// Text a filter is matched against. A missing salary has none.
    pub fn text(self, employee: &Employee) -> Option<String> {
        match self {
            Self::Name => Some(employee.name.clone()),
            Self::Position => Some(employee.position.clone()),
            Self::Department => Some(employee.department.clone()),
            Self::Salary => employee.salary.map(|salary| salary.to_string()),
        }
    }

    /// Ascending order on this column. Text compares case-insensitively;
    /// salary compares numerically with missing values first.
    pub fn compare(self, left: &Employee, right: &Employee) -> Ordering {
        match self {
            Self::Salary => match (left.salary, right.salary) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            _ => {
                let key =
                    |employee: &Employee| self.text(employee).map(|text| text.to_lowercase());
                key(left).cmp(&key(right))
            }
        }
    }
}
