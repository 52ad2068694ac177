use std::collections::HashMap;

use diesel::prelude::*;
use diesel_async::{
    pooled_connection::{deadpool::Pool, AsyncDieselConnectionManager},
    AsyncPgConnection, RunQueryDsl,
};
use shared_types::{Task, TodoList, User};
use uuid::Uuid;

use crate::models::TodoListRow;

pub type DbPool = Pool<AsyncPgConnection>;

pub fn establish_connection_pool(database_url: &str, max_size: usize) -> anyhow::Result<DbPool> {
    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    let pool = Pool::builder(config).max_size(max_size).build()?;

    Ok(pool)
}

// User database operations
pub mod users {
    use super::*;

    /// Insert the user if no row exists for this identity, then return it.
    pub async fn upsert(conn: &mut AsyncPgConnection, external_id: &str) -> QueryResult<User> {
        use crate::schema::users::dsl::*;

        diesel::insert_into(users)
            .values(external_auth_id.eq(external_id))
            .on_conflict(external_auth_id)
            .do_nothing()
            .execute(conn)
            .await?;

        users
            .filter(external_auth_id.eq(external_id))
            .first::<User>(conn)
            .await
    }

    pub async fn get_by_external_id(
        conn: &mut AsyncPgConnection,
        external_id: &str,
    ) -> QueryResult<Option<User>> {
        use crate::schema::users::dsl::*;

        users
            .filter(external_auth_id.eq(external_id))
            .first::<User>(conn)
            .await
            .optional()
    }
}

// Todo list database operations
pub mod lists {
    use super::*;
    use diesel_async::{scoped_futures::ScopedFutureExt, AsyncConnection};

    pub async fn create(
        conn: &mut AsyncPgConnection,
        owner_id: Uuid,
        title_val: &str,
    ) -> QueryResult<TodoList> {
        use crate::schema::todo_lists::dsl::*;

        let row = diesel::insert_into(todo_lists)
            .values((user_id.eq(owner_id), title.eq(title_val)))
            .returning(TodoListRow::as_returning())
            .get_result(conn)
            .await?;

        Ok(row.with_tasks(Vec::new()))
    }

    pub async fn list_by_owner(
        conn: &mut AsyncPgConnection,
        owner_id: Uuid,
    ) -> QueryResult<Vec<TodoList>> {
        use crate::schema::todo_lists::dsl::*;

        let rows = todo_lists
            .filter(user_id.eq(owner_id))
            .order_by((created_at.asc(), id.asc()))
            .select(TodoListRow::as_select())
            .load(conn)
            .await?;

        let list_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut grouped = super::tasks::load_for_lists(conn, &list_ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let tasks = grouped.remove(&row.id).unwrap_or_default();
                row.with_tasks(tasks)
            })
            .collect())
    }

    pub async fn get_owner(
        conn: &mut AsyncPgConnection,
        list_id: Uuid,
    ) -> QueryResult<Option<Uuid>> {
        use crate::schema::todo_lists::dsl::*;

        todo_lists
            .find(list_id)
            .select(user_id)
            .first::<Uuid>(conn)
            .await
            .optional()
    }

    pub async fn rename(
        conn: &mut AsyncPgConnection,
        list_id: Uuid,
        title_val: &str,
    ) -> QueryResult<Option<TodoList>> {
        use crate::schema::todo_lists::dsl::*;

        let row = diesel::update(todo_lists.find(list_id))
            .set((title.eq(title_val), updated_at.eq(chrono::Utc::now())))
            .returning(TodoListRow::as_returning())
            .get_result(conn)
            .await
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut grouped = super::tasks::load_for_lists(conn, &[row.id]).await?;
        let tasks = grouped.remove(&row.id).unwrap_or_default();
        Ok(Some(row.with_tasks(tasks)))
    }

    /// Delete a list and its tasks in one transaction.
    /// Returns false when the list did not exist.
    pub async fn delete_with_tasks(
        conn: &mut AsyncPgConnection,
        list_id: Uuid,
    ) -> QueryResult<bool> {
        use crate::schema::{tasks, todo_lists};

        let deleted = conn
            .transaction::<_, diesel::result::Error, _>(move |conn| {
                async move {
                    diesel::delete(tasks::table.filter(tasks::list_id.eq(list_id)))
                        .execute(conn)
                        .await?;
                    diesel::delete(todo_lists::table.find(list_id))
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await?;

        Ok(deleted > 0)
    }
}

// Task database operations
pub mod tasks {
    use super::*;
    use crate::models::TaskChangeset;

    /// Load tasks for the given lists, grouped by list id in insertion order.
    pub async fn load_for_lists(
        conn: &mut AsyncPgConnection,
        list_ids: &[Uuid],
    ) -> QueryResult<HashMap<Uuid, Vec<Task>>> {
        use crate::schema::tasks::dsl::*;

        if list_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let items = tasks
            .filter(list_id.eq_any(list_ids.to_vec()))
            .order_by((created_at.asc(), id.asc()))
            .load::<Task>(conn)
            .await?;

        let mut grouped: HashMap<Uuid, Vec<Task>> = HashMap::new();
        for task in items {
            grouped.entry(task.list_id).or_default().push(task);
        }
        Ok(grouped)
    }

    pub async fn create(
        conn: &mut AsyncPgConnection,
        list_id_val: Uuid,
        content_val: &str,
    ) -> QueryResult<Task> {
        use crate::schema::tasks::dsl::*;

        diesel::insert_into(tasks)
            .values((
                list_id.eq(list_id_val),
                content.eq(content_val),
                completed.eq(false),
            ))
            .get_result::<Task>(conn)
            .await
    }

    /// Fetch a task together with the user id owning its list.
    pub async fn get_with_owner(
        conn: &mut AsyncPgConnection,
        task_id: Uuid,
    ) -> QueryResult<Option<(Task, Uuid)>> {
        use crate::schema::{tasks, todo_lists};

        tasks::table
            .inner_join(todo_lists::table)
            .filter(tasks::id.eq(task_id))
            .select((tasks::all_columns, todo_lists::user_id))
            .first::<(Task, Uuid)>(conn)
            .await
            .optional()
    }

    pub async fn update(
        conn: &mut AsyncPgConnection,
        task_id: Uuid,
        changes: &TaskChangeset,
    ) -> QueryResult<Option<Task>> {
        use crate::schema::tasks::dsl::*;

        diesel::update(tasks.find(task_id))
            .set(changes)
            .get_result::<Task>(conn)
            .await
            .optional()
    }

    pub async fn delete(conn: &mut AsyncPgConnection, task_id: Uuid) -> QueryResult<bool> {
        use crate::schema::tasks::dsl::*;

        let deleted = diesel::delete(tasks.find(task_id)).execute(conn).await?;

        Ok(deleted > 0)
    }
}
