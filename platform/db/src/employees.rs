use entity::employees;
use products_hr::{Employee, EmployeeFields};
use sea_orm::{
    ActiveModelTrait, ActiveValue::{NotSet, Set, Unchanged}, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

fn to_employee(model: employees::Model) -> Employee {
    Employee {
        id: model.id,
        name: model.name,
        position: model.position,
        department: model.department,
        salary: model.salary,
    }
}

pub async fn list_employees<C>(conn: &C) -> Result<Vec<Employee>, DbErr>
where
    C: ConnectionTrait,
{
    let rows = employees::Entity::find()
        .order_by_asc(employees::Column::Id)
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(to_employee).collect())
}

pub async fn employee_exists<C>(conn: &C, id: i32) -> Result<bool, DbErr>
where
    C: ConnectionTrait,
{
    let found = employees::Entity::find()
        .select_only()
        .column(employees::Column::Id)
        .filter(employees::Column::Id.eq(id))
        .into_tuple::<i32>()
        .one(conn)
        .await?;
    Ok(found.is_some())
}

pub async fn insert_employee<C>(conn: &C, fields: EmployeeFields) -> Result<Employee, DbErr>
where
    C: ConnectionTrait,
{
    let model = employees::ActiveModel {
        id: NotSet,
        name: Set(fields.name),
        position: Set(fields.position),
        department: Set(fields.department),
        salary: Set(fields.salary),
    }
    .insert(conn)
    .await?;
    Ok(to_employee(model))
}

/// Replaces all four fields. `None` when the row vanished before the write.
pub async fn update_employee<C>(
    conn: &C,
    id: i32,
    fields: EmployeeFields,
) -> Result<Option<Employee>, DbErr>
where
    C: ConnectionTrait,
{
    let result = employees::ActiveModel {
        id: Unchanged(id),
        name: Set(fields.name),
        position: Set(fields.position),
        department: Set(fields.department),
        salary: Set(fields.salary),
    }
    .update(conn)
    .await;
    match result {
        Ok(model) => Ok(Some(to_employee(model))),
        Err(DbErr::RecordNotUpdated) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Hard delete. Returns whether a row was removed.
pub async fn delete_employee<C>(conn: &C, id: i32) -> Result<bool, DbErr>
where
    C: ConnectionTrait,
{
    let result = employees::Entity::delete_by_id(id).exec(conn).await?;
    Ok(result.rows_affected > 0)
}

pub async fn employee_count<C>(conn: &C) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    employees::Entity::find().count(conn).await
}
