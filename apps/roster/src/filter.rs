use products_hr::Employee;

use crate::column::Column;

/// View-only "contains" filter over the cached rows. Case-insensitive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    pub column: Column,
    pub value: String,
}

impl Filter {
    pub fn is_active(&self) -> bool {
        !self.value.is_empty()
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        if !self.is_active() {
            return true;
        }
        let needle = self.value.to_lowercase();
        self.column
            .text(employee)
            .is_some_and(|cell| cell.to_lowercase().contains(&needle))
    }
}
