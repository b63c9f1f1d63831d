use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{parse_id, RecordStore};
use crate::error::DataError;
use crate::resource::{EntitySchema, Record, SqlValue, Values};

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: Vec<Record>,
}

/// In-process stand-in for Postgres: server-assigned ids, a strictly
/// increasing `created_at`, unique columns and the schema's projections.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<&'static str, Table>>,
    clock: Mutex<i64>,
    fail_with: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail as if the database were unreachable.
    pub fn break_connection(&self, reason: &str) {
        *self.fail_with.lock().unwrap() = Some(reason.to_string());
    }

    fn check_connection(&self) -> Result<(), DataError> {
        match self.fail_with.lock().unwrap().as_ref() {
            Some(reason) => Err(DataError::Internal(reason.clone())),
            None => Ok(()),
        }
    }

    fn tick(&self) -> i64 {
        let mut clock = self.clock.lock().unwrap();
        *clock += 1;
        *clock
    }
}

fn to_json(value: &SqlValue) -> Value {
    match value {
        SqlValue::Text(v) => v.clone().into(),
        SqlValue::Int(v) => (*v).into(),
        SqlValue::Numeric(v) => (*v).and_then(|d| d.to_string().parse::<f64>().ok()).into(),
    }
}

fn project(row: &Record, columns: &[&str]) -> Record {
    columns
        .iter()
        .map(|col| (col.to_string(), row.get(*col).cloned().unwrap_or(Value::Null)))
        .collect()
}

fn matches_id(row: &Record, id: i64) -> bool {
    row.get("id").and_then(Value::as_i64) == Some(id)
}

fn violates_unique(schema: &EntitySchema, rows: &[Record], candidate: &Record, skip_id: Option<i64>) -> bool {
    rows.iter()
        .filter(|row| skip_id.map_or(true, |id| !matches_id(row, id)))
        .any(|row| {
            schema.unique_columns.iter().any(|col| {
                let value = candidate.get(*col).unwrap_or(&Value::Null);
                !value.is_null() && row.get(*col) == Some(value)
            })
        })
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list(&self, schema: &EntitySchema, filter: Option<String>) -> Result<Vec<Record>, DataError> {
        self.check_connection()?;
        let tables = self.tables.lock().unwrap();
        let Some(table) = tables.get(schema.table) else {
            return Ok(Vec::new());
        };

        let mut rows: Vec<&Record> = table
            .rows
            .iter()
            .filter(|row| match (schema.filter_column, filter.as_deref()) {
                (Some(col), Some(wanted)) => row.get(col).and_then(Value::as_str) == Some(wanted),
                _ => true,
            })
            .collect();
        rows.sort_by_key(|row| std::cmp::Reverse(row["created_at"].as_i64().unwrap_or_default()));
        Ok(rows.into_iter().map(|row| project(row, &schema.list_columns)).collect())
    }

    async fn get(&self, schema: &EntitySchema, id: &str) -> Result<Record, DataError> {
        self.check_connection()?;
        let id = parse_id(id)?;
        let tables = self.tables.lock().unwrap();
        tables
            .get(schema.table)
            .and_then(|t| t.rows.iter().find(|row| matches_id(row, id)))
            .map(|row| project(row, &schema.read_columns))
            .ok_or(DataError::NotFound)
    }

    async fn insert(&self, schema: &EntitySchema, values: Values) -> Result<Record, DataError> {
        self.check_connection()?;
        let created_at = self.tick();
        let mut tables = self.tables.lock().unwrap();
        let table = tables.entry(schema.table).or_default();

        let mut row: Record = values
            .iter()
            .map(|(col, value)| (col.to_string(), to_json(value)))
            .collect();
        if violates_unique(schema, &table.rows, &row, None) {
            return Err(DataError::Conflict(format!("{}_unique", schema.table)));
        }

        table.next_id += 1;
        row.insert("id".into(), table.next_id.into());
        row.insert("created_at".into(), created_at.into());
        let projected = project(&row, &schema.create_returning);
        table.rows.push(row);
        Ok(projected)
    }

    async fn update(&self, schema: &EntitySchema, id: &str, values: Values) -> Result<Record, DataError> {
        self.check_connection()?;
        let id = parse_id(id)?;
        let mut tables = self.tables.lock().unwrap();
        let table = tables.entry(schema.table).or_default();
        let Some(index) = table.rows.iter().position(|row| matches_id(row, id)) else {
            return Err(DataError::NotFound);
        };

        let mut updated = table.rows[index].clone();
        for (col, value) in &values {
            updated.insert(col.to_string(), to_json(value));
        }
        if violates_unique(schema, &table.rows, &updated, Some(id)) {
            return Err(DataError::Conflict(format!("{}_unique", schema.table)));
        }

        let projected = project(&updated, &schema.update_returning);
        table.rows[index] = updated;
        Ok(projected)
    }

    async fn delete(&self, schema: &EntitySchema, id: &str) -> Result<Record, DataError> {
        self.check_connection()?;
        let id = parse_id(id)?;
        let mut tables = self.tables.lock().unwrap();
        let table = tables.entry(schema.table).or_default();
        let Some(index) = table.rows.iter().position(|row| matches_id(row, id)) else {
            return Err(DataError::NotFound);
        };
        let removed = table.rows.remove(index);
        Ok(project(&removed, &["id"]))
    }
}
