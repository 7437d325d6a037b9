use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{Jsonb, Nullable, Text, Timestamptz, Uuid as DieselUuid};
use log::debug;
use uuid::Uuid;

use super::{TaskChanges, TaskFilter, TaskStore};
use crate::core::shared::utils::DbPool;
use crate::tasks::error::StoreError;
use crate::tasks::types::Task;

const FIND_SQL: &str = r#"
    SELECT doc FROM tasks
    WHERE ($1::text IS NULL OR doc->>'status' = $1)
      AND ($2::text IS NULL OR doc->>'priority' = $2)
      AND ($3::text IS NULL OR strpos(lower(doc->>'name'), lower($3)) > 0)
      AND ($4::timestamptz IS NULL OR (doc->>'dueDate')::timestamptz <= $4)
    ORDER BY seq
"#;

#[derive(QueryableByName)]
struct TaskDocumentRow {
    #[diesel(sql_type = Jsonb)]
    doc: serde_json::Value,
}

impl TaskDocumentRow {
    fn into_task(self) -> Result<Task, StoreError> {
        Ok(serde_json::from_value(self.doc)?)
    }
}

/// Tasks kept as JSONB documents in the `tasks` table.
#[derive(Clone)]
pub struct PgTaskStore {
    pool: DbPool,
}

impl std::fmt::Debug for PgTaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgTaskStore")
            .field("pool_size", &self.pool.state().connections)
            .finish()
    }
}

impl PgTaskStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn with_conn<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T, StoreError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| StoreError::Connection(e.to_string()))?;
            op(&mut conn)
        })
        .await
        .map_err(|e| StoreError::Connection(format!("store worker failed: {e}")))?
    }
}

fn load_one(conn: &mut PgConnection, sql: &str, id: Uuid) -> Result<Option<Task>, StoreError> {
    let rows: Vec<TaskDocumentRow> = diesel::sql_query(sql)
        .bind::<DieselUuid, _>(id)
        .load(conn)?;
    rows.into_iter().next().map(TaskDocumentRow::into_task).transpose()
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn insert(&self, task: Task) -> Result<Task, StoreError> {
        let doc = serde_json::to_value(&task)?;
        let id = task.id;
        self.with_conn(move |conn| {
            diesel::sql_query("INSERT INTO tasks (id, doc) VALUES ($1, $2)")
                .bind::<DieselUuid, _>(id)
                .bind::<Jsonb, _>(doc)
                .execute(conn)?;
            Ok(())
        })
        .await?;
        debug!("Inserted task {id}");
        Ok(task)
    }

    async fn find(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        let filter = filter.clone();
        self.with_conn(move |conn| {
            let rows: Vec<TaskDocumentRow> = diesel::sql_query(FIND_SQL)
                .bind::<Nullable<Text>, _>(filter.status)
                .bind::<Nullable<Text>, _>(filter.priority)
                .bind::<Nullable<Text>, _>(filter.name_contains)
                .bind::<Nullable<Timestamptz>, _>(filter.due_before)
                .load(conn)?;
            rows.into_iter().map(TaskDocumentRow::into_task).collect()
        })
        .await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        self.with_conn(move |conn| load_one(conn, "SELECT doc FROM tasks WHERE id = $1", id))
            .await
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        changes: TaskChanges,
    ) -> Result<Option<Task>, StoreError> {
        self.with_conn(move |conn| {
            conn.transaction::<_, StoreError, _>(|conn| {
                let Some(mut task) =
                    load_one(conn, "SELECT doc FROM tasks WHERE id = $1 FOR UPDATE", id)?
                else {
                    return Ok(None);
                };
                changes.apply(&mut task);
                let doc = serde_json::to_value(&task)?;
                diesel::sql_query("UPDATE tasks SET doc = $2 WHERE id = $1")
                    .bind::<DieselUuid, _>(id)
                    .bind::<Jsonb, _>(doc)
                    .execute(conn)?;
                Ok(Some(task))
            })
        })
        .await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        self.with_conn(move |conn| {
            load_one(conn, "DELETE FROM tasks WHERE id = $1 RETURNING doc", id)
        })
        .await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            diesel::sql_query("SELECT 1").execute(conn)?;
            Ok(())
        })
        .await
    }

    fn kind(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shared::utils::{create_conn, run_migrations};
    use chrono::{TimeZone, Utc};

    fn live_store() -> Option<PgTaskStore> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let pool = match create_conn(&url, 2) {
            Ok(pool) => pool,
            Err(e) => {
                println!("Skipping test - cannot connect to PostgreSQL: {e}");
                return None;
            }
        };
        run_migrations(&pool).ok()?;
        Some(PgTaskStore::new(pool))
    }

    #[test]
    fn test_find_sql_guards_every_parameter() {
        for placeholder in ["$1::text IS NULL", "$2::text IS NULL", "$3::text IS NULL"] {
            assert!(FIND_SQL.contains(placeholder));
        }
        assert!(FIND_SQL.contains("$4::timestamptz IS NULL"));
        assert!(FIND_SQL.contains("ORDER BY seq"));
    }

    #[tokio::test]
    async fn test_round_trip_against_live_database() {
        let Some(store) = live_store() else {
            println!("Skipping test - DATABASE_URL not set");
            return;
        };
        let marker = Uuid::new_v4().to_string();
        let task = Task {
            id: Uuid::new_v4(),
            name: format!("pg report {marker}"),
            description: Some("from the store tests".to_string()),
            due_date: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            priority: "High".to_string(),
            status: "Done".to_string(),
            comments: vec![],
        };

        store.insert(task.clone()).await.unwrap();
        assert_eq!(store.find_by_id(task.id).await.unwrap(), Some(task.clone()));

        let found = store
            .find(&TaskFilter {
                status: Some("Done".to_string()),
                name_contains: Some(marker.to_uppercase()),
                due_before: Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);

        let updated = store
            .update_by_id(
                task.id,
                TaskChanges {
                    priority: Some("Low".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.priority, "Low");
        assert_eq!(updated.status, "Done");

        assert!(store.delete_by_id(task.id).await.unwrap().is_some());
        assert!(store.find_by_id(task.id).await.unwrap().is_none());
    }
}
