//! `PostgreSQL` repository implementation for checklist tasks.

use super::{models::TaskRow, schema::tasks};
use crate::task::{
    domain::{PersistedTaskData, Task, TaskId, TaskOrigin, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::trip::domain::TripId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let trip_id = task.trip_id();
        let row = to_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_insert_error(err, task_id, trip_id))?;
            Ok(())
        })
        .await
    }

    async fn store_all(&self, batch: &[Task]) -> TaskRepositoryResult<()> {
        let Some(first) = batch.first() else {
            return Ok(());
        };
        let first_id = first.id();
        let trip_id = first.trip_id();
        let rows: Vec<TaskRow> = batch.iter().map(to_row).collect();

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|transaction| {
                diesel::insert_into(tasks::table)
                    .values(&rows)
                    .execute(transaction)
                    .map_err(|err| map_insert_error(err, first_id, trip_id))?;
                Ok(())
            })
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_row(task);

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(tasks::table.filter(tasks::id.eq(row.id)))
                .set((
                    tasks::title.eq(&row.title),
                    tasks::deadline.eq(row.deadline),
                    tasks::completed.eq(row.completed),
                    tasks::comments.eq(&row.comments),
                    tasks::visible.eq(row.visible),
                    tasks::updated_at.eq(row.updated_at),
                ))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted_count = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted_count == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_for_trip(&self, trip_id: TripId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            tasks::table
                .filter(tasks::trip_id.eq(trip_id.into_inner()))
                .order(tasks::seq.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }

    async fn delete_generated_for_trip(&self, trip_id: TripId) -> TaskRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            diesel::delete(
                tasks::table
                    .filter(tasks::trip_id.eq(trip_id.into_inner()))
                    .filter(tasks::auto.eq(true)),
            )
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn replace_generated_for_trip(
        &self,
        trip_id: TripId,
        batch: &[Task],
    ) -> TaskRepositoryResult<usize> {
        let first_id = batch.first().map(Task::id);
        let rows: Vec<TaskRow> = batch.iter().map(to_row).collect();

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|transaction| {
                let removed = diesel::delete(
                    tasks::table
                        .filter(tasks::trip_id.eq(trip_id.into_inner()))
                        .filter(tasks::auto.eq(true)),
                )
                .execute(transaction)?;
                if let Some(task_id) = first_id {
                    diesel::insert_into(tasks::table)
                        .values(&rows)
                        .execute(transaction)
                        .map_err(|err| map_insert_error(err, task_id, trip_id))?;
                }
                Ok(removed)
            })
        })
        .await
    }

    async fn delete_all_for_trip(&self, trip_id: TripId) -> TaskRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            diesel::delete(tasks::table.filter(tasks::trip_id.eq(trip_id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

fn map_insert_error(err: DieselError, task_id: TaskId, trip_id: TripId) -> TaskRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            TaskRepositoryError::TripNotFound(trip_id)
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            TaskRepositoryError::DuplicateTask(task_id)
        }
        _ => TaskRepositoryError::persistence(err),
    }
}

fn to_row(task: &Task) -> TaskRow {
    TaskRow {
        id: task.id().into_inner(),
        trip_id: task.trip_id().into_inner(),
        title: task.title().as_str().to_owned(),
        deadline: task.deadline(),
        completed: task.is_completed(),
        comments: task.comments().map(str::to_owned),
        auto: task.origin().is_generated(),
        visible: task.is_visible(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        trip_id,
        title,
        deadline,
        completed,
        comments,
        auto,
        visible,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        trip_id: TripId::from_uuid(trip_id),
        title: TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?,
        deadline,
        completed,
        comments,
        origin: TaskOrigin::from_generated_flag(auto),
        visible,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
