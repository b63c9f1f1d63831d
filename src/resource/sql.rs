//! Statement construction. Column and table names come from `EntitySchema`
//! constants; every caller-supplied value is a positional parameter. The
//! identifier is bound as an integer so lookups use the primary key index.

use super::schema::EntitySchema;

/// `jsonb_build_object('id', id, ...)` so each row decodes as one JSON object.
pub fn projection(columns: &[&str]) -> String {
    let pairs: Vec<String> = columns
        .iter()
        .map(|col| format!("'{col}', {col}"))
        .collect();
    format!("jsonb_build_object({})", pairs.join(", "))
}

pub fn select_list(schema: &EntitySchema, filtered: bool) -> String {
    let mut sql = format!(
        "SELECT {} FROM {}",
        projection(&schema.list_columns),
        schema.table
    );
    if let (true, Some(column)) = (filtered, schema.filter_column) {
        sql.push_str(&format!(" WHERE {column} = $1"));
    }
    sql.push_str(" ORDER BY created_at DESC");
    sql
}

pub fn select_one(schema: &EntitySchema) -> String {
    format!(
        "SELECT {} FROM {} WHERE id = $1",
        projection(&schema.read_columns),
        schema.table
    )
}

pub fn insert(schema: &EntitySchema, columns: &[&str]) -> String {
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${i}")).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        schema.table,
        columns.join(", "),
        placeholders.join(", "),
        projection(&schema.create_returning)
    )
}

/// The identifier is bound last, after the `SET` values.
pub fn update(schema: &EntitySchema, columns: &[&str]) -> String {
    let assignments: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{col} = ${}", i + 1))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE id = ${} RETURNING {}",
        schema.table,
        assignments.join(", "),
        columns.len() + 1,
        projection(&schema.update_returning)
    )
}

pub fn delete(schema: &EntitySchema) -> String {
    format!(
        "DELETE FROM {} WHERE id = $1 RETURNING {}",
        schema.table,
        projection(&["id"])
    )
}
