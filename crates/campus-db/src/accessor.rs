//! Generic table accessor.
//!
//! [`TableAccessor<T>`] runs the find/create/update/delete statements shared
//! by most entities. It is configured with a [`TableSpec`] (table name plus
//! column whitelists) and decodes rows into `T`. Column names are only ever
//! taken from the whitelist, values are always bound as parameters.
//!
//! Every method is generic over [`PgExecutor`], so the same accessor works on
//! the pool or inside a transaction (`&mut *tx`).

use std::marker::PhantomData;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{Arguments, FromRow, PgExecutor};
use tracing::debug;

/// Table name and column whitelists for one entity.
#[derive(Debug)]
pub struct TableSpec {
    pub name: &'static str,
    /// Columns accepted on insert and update.
    pub fields: &'static [&'static str],
    /// Columns accepted in lookups.
    pub searchable: &'static [&'static str],
}

impl TableSpec {
    pub fn is_field(&self, key: &str) -> bool {
        self.fields.iter().any(|field| *field == key)
    }

    pub fn is_searchable(&self, key: &str) -> bool {
        self.searchable.iter().any(|field| *field == key)
    }
}

/// A typed column value.
///
/// Postgres does not coerce a text parameter into `DATE` or `BIGINT`, so
/// values keep their SQL type all the way to the bind.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Null,
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Text(value.clone())
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl<T> From<Option<T>> for FieldValue
where
    T: Into<FieldValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccessorError {
    #[error("unknown field `{field}` for table `{table}`")]
    UnknownField { table: &'static str, field: String },
    #[error("no fields supplied for table `{0}`")]
    EmptyData(&'static str),
    #[error("failed to bind parameter: {0}")]
    Bind(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl AccessorError {
    /// The underlying driver error, when there is one.
    pub fn as_database(&self) -> Option<&sqlx::Error> {
        match self {
            AccessorError::Database(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self.as_database(),
            Some(sqlx::Error::Database(db_err)) if db_err.is_unique_violation()
        )
    }
}

/// A rendered statement and the values for its placeholders.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Statement {
    pub sql: String,
    pub values: Vec<FieldValue>,
}

impl Statement {
    /// Returns `$n` for the value, or a literal `NULL` so untyped nulls never
    /// reach the driver.
    fn placeholder(&mut self, value: &FieldValue) -> String {
        if *value == FieldValue::Null {
            return "NULL".to_string();
        }
        self.values.push(value.clone());
        format!("${}", self.values.len())
    }

    fn condition(&mut self, column: &str, value: &FieldValue) -> String {
        if *value == FieldValue::Null {
            format!("{} IS NULL", column)
        } else {
            format!("{} = {}", column, self.placeholder(value))
        }
    }

    fn arguments(&self) -> Result<PgArguments, AccessorError> {
        let mut args = PgArguments::default();
        for value in &self.values {
            let bound = match value {
                FieldValue::Int(v) => args.add(*v),
                FieldValue::Float(v) => args.add(*v),
                FieldValue::Text(v) => args.add(v.clone()),
                FieldValue::Bool(v) => args.add(*v),
                FieldValue::Date(v) => args.add(*v),
                FieldValue::Timestamp(v) => args.add(*v),
                FieldValue::Null => Ok(()),
            };
            bound.map_err(|e| AccessorError::Bind(e.to_string()))?;
        }
        Ok(args)
    }
}

/// `SELECT` filtered on the searchable subset of `criteria`.
///
/// Keys outside the whitelist are ignored; `None` when nothing usable is left.
pub(crate) fn select_statement(
    spec: &TableSpec,
    criteria: &[(&str, FieldValue)],
) -> Option<Statement> {
    let mut stmt = Statement::default();
    let conditions: Vec<String> = criteria
        .iter()
        .filter(|(key, _)| spec.is_searchable(key))
        .map(|(key, value)| stmt.condition(key, value))
        .collect();

    if conditions.is_empty() {
        return None;
    }

    stmt.sql = format!(
        "SELECT * FROM {} WHERE {} LIMIT 1",
        spec.name,
        conditions.join(" AND ")
    );
    Some(stmt)
}

pub(crate) fn insert_statement(
    spec: &TableSpec,
    data: &[(&str, FieldValue)],
) -> Result<Statement, AccessorError> {
    ensure_fields(spec, data)?;

    let mut stmt = Statement::default();
    let columns: Vec<&str> = data.iter().map(|(key, _)| *key).collect();
    let placeholders: Vec<String> = data
        .iter()
        .map(|(_, value)| stmt.placeholder(value))
        .collect();

    stmt.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
        spec.name,
        columns.join(", "),
        placeholders.join(", ")
    );
    Ok(stmt)
}

pub(crate) fn update_statement(
    spec: &TableSpec,
    id: &FieldValue,
    data: &[(&str, FieldValue)],
    where_field: &str,
) -> Result<Statement, AccessorError> {
    ensure_searchable(spec, where_field)?;
    ensure_fields(spec, data)?;

    let mut stmt = Statement::default();
    let assignments: Vec<String> = data
        .iter()
        .map(|(key, value)| format!("{} = {}", key, stmt.placeholder(value)))
        .collect();
    let condition = stmt.condition(where_field, id);

    stmt.sql = format!(
        "UPDATE {} SET {} WHERE {}",
        spec.name,
        assignments.join(", "),
        condition
    );
    Ok(stmt)
}

pub(crate) fn delete_statement(
    spec: &TableSpec,
    id: &FieldValue,
    where_field: &str,
) -> Result<Statement, AccessorError> {
    ensure_searchable(spec, where_field)?;

    let mut stmt = Statement::default();
    let condition = stmt.condition(where_field, id);
    stmt.sql = format!("DELETE FROM {} WHERE {}", spec.name, condition);
    Ok(stmt)
}

fn ensure_fields(spec: &TableSpec, data: &[(&str, FieldValue)]) -> Result<(), AccessorError> {
    if data.is_empty() {
        return Err(AccessorError::EmptyData(spec.name));
    }
    if let Some((field, _)) = data.iter().find(|(key, _)| !spec.is_field(key)) {
        return Err(AccessorError::UnknownField {
            table: spec.name,
            field: field.to_string(),
        });
    }
    Ok(())
}

fn ensure_searchable(spec: &TableSpec, key: &str) -> Result<(), AccessorError> {
    if spec.is_searchable(key) {
        Ok(())
    } else {
        Err(AccessorError::UnknownField {
            table: spec.name,
            field: key.to_string(),
        })
    }
}

/// Find/create/update/delete over one table, decoding rows into `T`.
pub struct TableAccessor<T> {
    spec: &'static TableSpec,
    _row: PhantomData<fn() -> T>,
}

impl<T> TableAccessor<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub const fn new(spec: &'static TableSpec) -> Self {
        Self {
            spec,
            _row: PhantomData,
        }
    }

    pub fn spec(&self) -> &'static TableSpec {
        self.spec
    }

    /// True when every key in `data` is a writable column of this table.
    pub fn validate_fields(&self, data: &[(&str, FieldValue)]) -> bool {
        data.iter().all(|(key, _)| self.spec.is_field(key))
    }

    /// First row matching all searchable `criteria`.
    pub async fn find_one<'e, E>(
        &self,
        executor: E,
        criteria: &[(&str, FieldValue)],
    ) -> Result<Option<T>, AccessorError>
    where
        E: PgExecutor<'e>,
    {
        let Some(stmt) = select_statement(self.spec, criteria) else {
            return Ok(None);
        };
        debug!(table = self.spec.name, sql = %stmt.sql, "find_one");

        let row = sqlx::query_as_with::<_, T, _>(&stmt.sql, stmt.arguments()?)
            .fetch_optional(executor)
            .await?;
        Ok(row)
    }

    pub async fn exists<'e, E>(
        &self,
        executor: E,
        criteria: &[(&str, FieldValue)],
    ) -> Result<bool, AccessorError>
    where
        E: PgExecutor<'e>,
    {
        Ok(self.find_one(executor, criteria).await?.is_some())
    }

    pub async fn find_all<'e, E>(&self, executor: E) -> Result<Vec<T>, AccessorError>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!("SELECT * FROM {}", self.spec.name);
        debug!(table = self.spec.name, sql = %sql, "find_all");

        let rows = sqlx::query_as::<_, T>(&sql).fetch_all(executor).await?;
        Ok(rows)
    }

    /// Inserts a row and returns it as stored.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        data: &[(&str, FieldValue)],
    ) -> Result<T, AccessorError>
    where
        E: PgExecutor<'e>,
    {
        let stmt = insert_statement(self.spec, data)?;
        debug!(table = self.spec.name, sql = %stmt.sql, "create");

        let row = sqlx::query_as_with::<_, T, _>(&stmt.sql, stmt.arguments()?)
            .fetch_one(executor)
            .await?;
        Ok(row)
    }

    /// Updates rows where `where_field = id`; returns the number of rows touched.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: impl Into<FieldValue>,
        data: &[(&str, FieldValue)],
        where_field: &str,
    ) -> Result<u64, AccessorError>
    where
        E: PgExecutor<'e>,
    {
        let stmt = update_statement(self.spec, &id.into(), data, where_field)?;
        debug!(table = self.spec.name, sql = %stmt.sql, "update");

        let result = sqlx::query_with(&stmt.sql, stmt.arguments()?)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Deletes rows where `where_field = id`; returns the number of rows removed.
    pub async fn delete<'e, E>(
        &self,
        executor: E,
        id: impl Into<FieldValue>,
        where_field: &str,
    ) -> Result<u64, AccessorError>
    where
        E: PgExecutor<'e>,
    {
        let stmt = delete_statement(self.spec, &id.into(), where_field)?;
        debug!(table = self.spec.name, sql = %stmt.sql, "delete");

        let result = sqlx::query_with(&stmt.sql, stmt.arguments()?)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
