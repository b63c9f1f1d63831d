use async_trait::async_trait;
use sqlx::{postgres::PgArguments, query::QueryScalar, PgPool, Postgres};
use tracing::debug;

use crate::error::DataError;
use crate::resource::{sql, EntitySchema, Record, SqlValue, Values};

#[cfg(test)]
pub mod memory;

/// Data-access seam used by every handler. Each call issues exactly one statement.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list(&self, schema: &EntitySchema, filter: Option<String>) -> Result<Vec<Record>, DataError>;
    async fn get(&self, schema: &EntitySchema, id: &str) -> Result<Record, DataError>;
    async fn insert(&self, schema: &EntitySchema, values: Values) -> Result<Record, DataError>;
    async fn update(&self, schema: &EntitySchema, id: &str, values: Values) -> Result<Record, DataError>;
    async fn delete(&self, schema: &EntitySchema, id: &str) -> Result<Record, DataError>;
}

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

type JsonQuery<'q> = QueryScalar<'q, Postgres, serde_json::Value, PgArguments>;

fn bind_value(query: JsonQuery<'_>, value: SqlValue) -> JsonQuery<'_> {
    match value {
        SqlValue::Text(v) => query.bind(v),
        SqlValue::Int(v) => query.bind(v),
        SqlValue::Numeric(v) => query.bind(v),
    }
}

/// Identifiers are integer keys; anything else names no row.
pub fn parse_id(id: &str) -> Result<i64, DataError> {
    id.trim().parse::<i64>().map_err(|_| DataError::NotFound)
}

fn into_record(value: serde_json::Value) -> Result<Record, DataError> {
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(DataError::Internal(format!("expected a JSON object row, got {other}"))),
    }
}

fn split(values: Values) -> (Vec<&'static str>, Vec<SqlValue>) {
    values.into_iter().unzip()
}

#[async_trait]
impl RecordStore for PgStore {
    async fn list(&self, schema: &EntitySchema, filter: Option<String>) -> Result<Vec<Record>, DataError> {
        let filter = filter.filter(|_| schema.filter_column.is_some());
        let statement = sql::select_list(schema, filter.is_some());
        debug!(table = schema.table, filtered = filter.is_some(), "list");

        let mut query = sqlx::query_scalar::<_, serde_json::Value>(&statement);
        if let Some(value) = filter {
            query = query.bind(value);
        }
        let rows = query.fetch_all(&self.db).await?;
        rows.into_iter().map(into_record).collect()
    }

    async fn get(&self, schema: &EntitySchema, id: &str) -> Result<Record, DataError> {
        let id = parse_id(id)?;
        let statement = sql::select_one(schema);
        let row = sqlx::query_scalar::<_, serde_json::Value>(&statement)
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or(DataError::NotFound)?;
        into_record(row)
    }

    async fn insert(&self, schema: &EntitySchema, values: Values) -> Result<Record, DataError> {
        let (columns, params) = split(values);
        let statement = sql::insert(schema, &columns);

        let mut query = sqlx::query_scalar::<_, serde_json::Value>(&statement);
        for value in params {
            query = bind_value(query, value);
        }
        into_record(query.fetch_one(&self.db).await?)
    }

    async fn update(&self, schema: &EntitySchema, id: &str, values: Values) -> Result<Record, DataError> {
        let id = parse_id(id)?;
        let (columns, params) = split(values);
        let statement = sql::update(schema, &columns);

        let mut query = sqlx::query_scalar::<_, serde_json::Value>(&statement);
        for value in params {
            query = bind_value(query, value);
        }
        let row = query
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or(DataError::NotFound)?;
        into_record(row)
    }

    async fn delete(&self, schema: &EntitySchema, id: &str) -> Result<Record, DataError> {
        let id = parse_id(id)?;
        let statement = sql::delete(schema);
        let row = sqlx::query_scalar::<_, serde_json::Value>(&statement)
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or(DataError::NotFound)?;
        into_record(row)
    }
}
