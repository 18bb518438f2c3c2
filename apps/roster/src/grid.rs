//! Grid state and its reconciliation rules.
//!
//! The full list is fetched once by [`GridState::load`]; afterwards every
//! successful mutation merges the single record the server returned into the
//! cache by id. A failed request leaves the cache, form and edit target as
//! they were. Filtering and sorting only shape the displayed view.

use products_hr::Employee;
use tracing::debug;

use crate::{
    ClientError, EmployeeApi,
    column::Column,
    filter::Filter,
    form::EmployeeForm,
    sort::{Sort, SortDirection},
    view::{GridRow, SubmitStyle},
};

pub const DELETE_PROMPT: &str = "Delete this employee?";

/// Asks the user to approve a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

#[derive(Debug, Default)]
pub struct GridState {
    employees: Vec<Employee>,
    form: EmployeeForm,
    editing_id: Option<i32>,
    busy: bool,
    filter: Filter,
    sort: Option<Sort>,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn form(&self) -> &EmployeeForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EmployeeForm {
        &mut self.form
    }

    pub fn editing_id(&self) -> Option<i32> {
        self.editing_id
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    pub fn submit_style(&self) -> SubmitStyle {
        SubmitStyle::for_state(self.editing_id.is_some(), self.busy)
    }

    /// Replace the cache with the server's list. On failure the cache keeps
    /// whatever it held, which is nothing before the first successful load.
    pub async fn load(&mut self, api: &dyn EmployeeApi) -> Result<usize, ClientError> {
        self.employees = api.list().await?;
        Ok(self.employees.len())
    }

    /// Create when nothing is being edited, update the edit target otherwise.
    pub async fn submit(&mut self, api: &dyn EmployeeApi) -> Result<Employee, ClientError> {
        if self.busy {
            return Err(ClientError::Busy);
        }
        let draft = self.form.to_draft()?;

        self.busy = true;
        let result = match self.editing_id {
            Some(id) => api.update(id, &draft).await,
            None => api.create(&draft).await,
        };
        self.busy = false;

        let employee = result?;
        self.merge_by_id(employee.clone());
        self.editing_id = None;
        self.form.reset();
        Ok(employee)
    }

    /// Load a cached record into the form and make it the edit target.
    pub fn edit(&mut self, id: i32) -> bool {
        let Some(employee) = self.employees.iter().find(|row| row.id == id) else {
            return false;
        };
        self.form = EmployeeForm::from_employee(employee);
        self.editing_id = Some(id);
        true
    }

    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
        self.form.reset();
    }

    pub async fn delete(
        &mut self,
        api: &dyn EmployeeApi,
        id: i32,
        confirm: &dyn Confirm,
    ) -> Result<DeleteOutcome, ClientError> {
        if self.busy {
            return Err(ClientError::Busy);
        }
        if !confirm.confirm(DELETE_PROMPT) {
            return Ok(DeleteOutcome::Cancelled);
        }

        self.busy = true;
        let result = api.delete(id).await;
        self.busy = false;

        result?;
        self.remove_by_id(id);
        if self.editing_id == Some(id) {
            self.cancel_edit();
        }
        Ok(DeleteOutcome::Deleted)
    }

    pub fn set_filter_column(&mut self, column: Column) {
        self.filter.column = column;
    }

    pub fn set_filter_value(&mut self, value: impl Into<String>) {
        self.filter.value = value.into();
    }

    pub fn clear_filter(&mut self) {
        self.filter.value.clear();
    }

    pub fn sort_by(&mut self, column: Column, direction: SortDirection) {
        self.sort = Some(Sort::new(column, direction));
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Rows that pass the current filter, in sort order when one is set and
    /// cache order otherwise.
    pub fn visible(&self) -> Vec<&Employee> {
        let mut rows: Vec<&Employee> = self
            .employees
            .iter()
            .filter(|employee| self.filter.matches(employee))
            .collect();
        if let Some(sort) = &self.sort {
            sort.apply(&mut rows);
        }
        rows
    }

    pub fn rows(&self) -> Vec<GridRow> {
        self.visible()
            .into_iter()
            .enumerate()
            .map(|(index, employee)| GridRow::new(index + 1, employee))
            .collect()
    }

    /// Database id behind a displayed (1-based) row number.
    pub fn id_at_row(&self, number: usize) -> Result<i32, ClientError> {
        number
            .checked_sub(1)
            .and_then(|index| self.visible().get(index).copied())
            .map(|employee| employee.id)
            .ok_or(ClientError::UnknownRow(number))
    }

    /// Replace the cached record with the same id in place, or append it.
    /// Applying the same record twice leaves the cache unchanged.
    pub fn merge_by_id(&mut self, employee: Employee) {
        match self.employees.iter_mut().find(|row| row.id == employee.id) {
            Some(slot) => *slot = employee,
            None => {
                debug!(id = employee.id, "appending employee to cache");
                self.employees.push(employee);
            }
        }
    }

    pub fn remove_by_id(&mut self, id: i32) {
        self.employees.retain(|row| row.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use products_hr::{DeleteReceipt, EmployeeDraft, coerce_salary};
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Default)]
    struct FakeApi {
        rows: Mutex<Vec<Employee>>,
        next_id: AtomicUsize,
        calls: AtomicUsize,
        fail_with: Mutex<Option<String>>,
    }

    impl FakeApi {
        fn seeded(rows: Vec<Employee>) -> Self {
            let next = rows.iter().map(|r| r.id as usize).max().unwrap_or(0);
            Self {
                rows: Mutex::new(rows),
                next_id: AtomicUsize::new(next),
                ..Self::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn fail_next(&self, message: &str) {
            *self.fail_with.lock().unwrap() = Some(message.to_string());
        }

        fn enter(&self) -> Result<(), ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.fail_with.lock().unwrap().take() {
                Some(message) => Err(ClientError::Api {
                    status: 400,
                    message: Some(message),
                }),
                None => Ok(()),
            }
        }

        fn materialize(id: i32, draft: &EmployeeDraft) -> Employee {
            Employee {
                id,
                name: draft.name.clone().unwrap_or_default(),
                position: draft.position.clone().unwrap_or_default(),
                department: draft.department.clone().unwrap_or_default(),
                salary: coerce_salary(draft.salary.as_ref()).unwrap(),
            }
        }
    }

    fn not_found() -> ClientError {
        ClientError::Api {
            status: 404,
            message: Some("Employee not found".into()),
        }
    }

    #[async_trait]
    impl EmployeeApi for FakeApi {
        async fn list(&self) -> Result<Vec<Employee>, ClientError> {
            self.enter()?;
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn create(&self, draft: &EmployeeDraft) -> Result<Employee, ClientError> {
            self.enter()?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i32 + 1;
            let employee = Self::materialize(id, draft);
            self.rows.lock().unwrap().push(employee.clone());
            Ok(employee)
        }

        async fn update(&self, id: i32, draft: &EmployeeDraft) -> Result<Employee, ClientError> {
            self.enter()?;
            let mut rows = self.rows.lock().unwrap();
            let slot = rows.iter_mut().find(|r| r.id == id).ok_or_else(not_found)?;
            *slot = Self::materialize(id, draft);
            Ok(slot.clone())
        }

        async fn delete(&self, id: i32) -> Result<DeleteReceipt, ClientError> {
            self.enter()?;
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| r.id != id);
            if rows.len() == before {
                return Err(not_found());
            }
            Ok(DeleteReceipt::default())
        }
    }

    struct Answer(bool);

    impl Confirm for Answer {
        fn confirm(&self, prompt: &str) -> bool {
            assert_eq!(prompt, DELETE_PROMPT);
            self.0
        }
    }

    fn employee(id: i32, name: &str, department: &str) -> Employee {
        Employee {
            id,
            name: name.into(),
            position: "Dev".into(),
            department: department.into(),
            salary: None,
        }
    }

    fn fill(grid: &mut GridState, name: &str, salary: &str) {
        let form = grid.form_mut();
        form.set(Column::Name, name);
        form.set(Column::Position, "Dev");
        form.set(Column::Department, "Eng");
        form.set(Column::Salary, salary);
    }

    async fn loaded(rows: Vec<Employee>) -> (FakeApi, GridState) {
        let api = FakeApi::seeded(rows);
        let mut grid = GridState::new();
        grid.load(&api).await.unwrap();
        (api, grid)
    }

    #[tokio::test]
    async fn failed_first_load_leaves_list_empty() {
        let api = FakeApi::seeded(vec![employee(1, "A", "Eng")]);
        api.fail_next("Internal server error");
        let mut grid = GridState::new();
        let err = grid.load(&api).await.unwrap_err();
        assert_eq!(err.notice(crate::Operation::Load), "Internal server error");
        assert!(grid.employees().is_empty());
    }

    #[tokio::test]
    async fn failed_reload_keeps_cached_rows() {
        let (api, mut grid) = loaded(vec![employee(1, "A", "Eng")]).await;
        api.fail_next("Internal server error");
        let err = grid.load(&api).await.unwrap_err();
        assert_eq!(err.notice(crate::Operation::Load), "Internal server error");
        assert_eq!(grid.employees(), &[employee(1, "A", "Eng")]);
        assert_eq!(grid.rows().len(), 1);
    }

    #[tokio::test]
    async fn create_appends_without_refetch() {
        let (api, mut grid) = loaded(vec![employee(1, "A", "Eng")]).await;
        fill(&mut grid, "B", "");
        let created = grid.submit(&api).await.unwrap();
        assert_eq!(created.salary, None);
        assert_eq!(grid.employees().len(), 2);
        assert_eq!(grid.employees()[1].id, created.id);
        assert_eq!(api.calls(), 2);
        assert_eq!(grid.form(), &EmployeeForm::default());
    }

    #[tokio::test]
    async fn update_replaces_in_place_and_clears_edit_target() {
        let (api, mut grid) =
            loaded(vec![employee(1, "A", "Eng"), employee(2, "B", "Ops")]).await;
        assert!(grid.edit(1));
        assert_eq!(grid.form().name, "A");
        grid.form_mut().set(Column::Name, "A2");
        let updated = grid.submit(&api).await.unwrap();
        assert_eq!(updated.name, "A2");
        let names: Vec<&str> = grid.employees().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A2", "B"]);
        assert_eq!(grid.editing_id(), None);
        assert_eq!(grid.form(), &EmployeeForm::default());
    }

    #[tokio::test]
    async fn failed_submit_keeps_local_state() {
        let (api, mut grid) = loaded(vec![employee(1, "A", "Eng")]).await;
        grid.edit(1);
        grid.form_mut().set(Column::Name, "A2");
        api.fail_next("Salary must be a number");
        let err = grid.submit(&api).await.unwrap_err();
        assert_eq!(err.notice(crate::Operation::Save), "Salary must be a number");
        assert_eq!(grid.employees()[0].name, "A");
        assert_eq!(grid.editing_id(), Some(1));
        assert_eq!(grid.form().name, "A2");
        assert!(!grid.is_busy());
    }

    #[tokio::test]
    async fn local_validation_sends_nothing() {
        let (api, mut grid) = loaded(vec![]).await;
        grid.form_mut().set(Column::Name, "Solo");
        let err = grid.submit(&api).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn busy_grid_refuses_new_submissions() {
        let (api, mut grid) = loaded(vec![]).await;
        fill(&mut grid, "A", "");
        grid.busy = true;
        assert!(matches!(grid.submit(&api).await, Err(ClientError::Busy)));
        assert!(matches!(
            grid.delete(&api, 1, &Answer(true)).await,
            Err(ClientError::Busy)
        ));
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let (api, mut grid) = loaded(vec![employee(1, "A", "Eng")]).await;
        let outcome = grid.delete(&api, 1, &Answer(false)).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(grid.employees().len(), 1);
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn deleting_edit_target_resets_form() {
        let (api, mut grid) =
            loaded(vec![employee(1, "A", "Eng"), employee(2, "B", "Ops")]).await;
        grid.edit(2);
        let outcome = grid.delete(&api, 2, &Answer(true)).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(grid.employees().len(), 1);
        assert_eq!(grid.editing_id(), None);
        assert_eq!(grid.form(), &EmployeeForm::default());
    }

    #[tokio::test]
    async fn failed_delete_keeps_row() {
        let (api, mut grid) = loaded(vec![employee(1, "A", "Eng")]).await;
        api.fail_next("Employee not found");
        let err = grid.delete(&api, 1, &Answer(true)).await.unwrap_err();
        assert_eq!(err.notice(crate::Operation::Delete), "Employee not found");
        assert_eq!(grid.employees().len(), 1);
    }

    #[tokio::test]
    async fn filter_is_local_and_view_only() {
        let (api, mut grid) = loaded(vec![
            employee(1, "A", "Engineering"),
            employee(2, "B", "Sales"),
            employee(3, "C", "Eng Ops"),
        ])
        .await;
        let calls = api.calls();

        grid.set_filter_column(Column::Department);
        grid.set_filter_value("Eng");
        let visible: Vec<i32> = grid.visible().iter().map(|e| e.id).collect();
        assert_eq!(visible, vec![1, 3]);
        assert_eq!(grid.employees().len(), 3);
        assert_eq!(grid.id_at_row(2).unwrap(), 3);

        grid.clear_filter();
        assert_eq!(grid.visible().len(), 3);
        assert_eq!(api.calls(), calls);
    }

    #[tokio::test]
    async fn sort_is_local_and_view_only() {
        let salaried = |id, name: &str, salary| Employee {
            salary,
            ..employee(id, name, "Eng")
        };
        let (api, mut grid) = loaded(vec![
            salaried(1, "Cleo", Some(300.0)),
            salaried(2, "asha", None),
            salaried(3, "Bo", Some(100.0)),
            salaried(4, "Dev", None),
        ])
        .await;
        let calls = api.calls();

        grid.sort_by(Column::Name, SortDirection::Ascending);
        let rows = grid.rows();
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["asha", "Bo", "Cleo", "Dev"]);
        assert_eq!(grid.id_at_row(1).unwrap(), 2);

        grid.sort_by(Column::Salary, SortDirection::Ascending);
        let ids: Vec<i32> = grid.visible().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);

        grid.sort_by(Column::Salary, SortDirection::Descending);
        let ids: Vec<i32> = grid.visible().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3, 2, 4]);
        assert_eq!(grid.rows()[0].number, 1);
        assert_eq!(grid.id_at_row(1).unwrap(), 1);

        grid.set_filter_column(Column::Name);
        grid.set_filter_value("o");
        let ids: Vec<i32> = grid.visible().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let cached: Vec<i32> = grid.employees().iter().map(|e| e.id).collect();
        assert_eq!(cached, vec![1, 2, 3, 4]);
        grid.clear_sort();
        grid.clear_filter();
        let ids: Vec<i32> = grid.visible().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(api.calls(), calls);
    }

    #[test]
    fn merge_by_id_is_idempotent_and_order_preserving() {
        let mut grid = GridState::new();
        grid.merge_by_id(employee(1, "A", "Eng"));
        grid.merge_by_id(employee(2, "B", "Eng"));
        let renamed = employee(1, "A2", "Eng");
        grid.merge_by_id(renamed.clone());
        grid.merge_by_id(renamed);
        let ids: Vec<i32> = grid.employees().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(grid.employees()[0].name, "A2");
    }

    #[test]
    fn unknown_row_numbers_are_reported() {
        let grid = GridState::new();
        assert!(matches!(grid.id_at_row(0), Err(ClientError::UnknownRow(0))));
        assert!(matches!(grid.id_at_row(4), Err(ClientError::UnknownRow(4))));
    }
}
