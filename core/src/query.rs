//! Builds selection queries over the engine's resource/transaction facts.
//!
//! A `FlowQuery` is only a request description: SQL text plus bind values.
//! It never touches a connection and knows nothing about row decoding —
//! execution lives in store.rs.

use crate::error::{SweepError, SweepResult};
use rusqlite::types::{ToSql, ToSqlOutput};

/// An identifier value to match against the filter column.
///
/// Text and integer ids are both accepted; binding (rather than string
/// interpolation) handles the quoting difference between them.
#[derive(Debug, Clone, PartialEq)]
pub enum IdValue {
    Text(String),
    Int(i64),
}

impl ToSql for IdValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            IdValue::Text(s) => s.to_sql(),
            IdValue::Int(i) => i.to_sql(),
        }
    }
}

impl From<&str> for IdValue {
    fn from(s: &str) -> Self {
        IdValue::Text(s.to_string())
    }
}

impl From<String> for IdValue {
    fn from(s: String) -> Self {
        IdValue::Text(s)
    }
}

impl From<i64> for IdValue {
    fn from(i: i64) -> Self {
        IdValue::Int(i)
    }
}

/// Which joined fact relation the query selects from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowRelation {
    /// resources ⋈ transactions on resourceid; rows keyed by transfer time.
    Transactions,
    /// resources ⋈ inventories on resourceid; rows keyed by creation time.
    Inventories,
}

impl FlowRelation {
    fn from_clause(self) -> &'static str {
        match self {
            FlowRelation::Transactions => {
                "resources INNER JOIN transactions \
                 ON resources.resourceid = transactions.resourceid"
            }
            FlowRelation::Inventories => {
                "resources INNER JOIN inventories \
                 ON resources.resourceid = inventories.resourceid"
            }
        }
    }
}

/// A selection over one fact relation, restricted to rows whose filter
/// column equals any of the given identifiers.
///
/// The predicate is an OR chain with one equality test per identifier, in
/// input order. An IN-list would be equivalent for SQLite but would not
/// preserve the tested-in-input-order shape the rest of the harness relies
/// on, so the chain is kept explicit.
#[derive(Debug, Clone)]
pub struct FlowQuery {
    relation: FlowRelation,
    filter_column: String,
    ids: Vec<IdValue>,
    columns: Vec<String>,
}

impl FlowQuery {
    /// Fails with `EmptyIdSet` when `ids` is empty: there is no well-defined
    /// query for zero identifiers, and an empty result set is never silently
    /// substituted for one.
    pub fn new<I, V>(relation: FlowRelation, filter_column: &str, ids: I) -> SweepResult<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<IdValue>,
    {
        let ids: Vec<IdValue> = ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            return Err(SweepError::EmptyIdSet {
                column: filter_column.to_string(),
            });
        }
        Ok(Self {
            relation,
            filter_column: filter_column.to_string(),
            ids,
            columns: Vec::new(),
        })
    }

    /// Set the projected column expressions, replacing any previous set.
    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// The SQL text with one `?N` placeholder per identifier.
    pub fn sql(&self) -> String {
        let projection = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(", ")
        };
        let predicate = (1..=self.ids.len())
            .map(|n| format!("{} = ?{n}", self.filter_column))
            .collect::<Vec<_>>()
            .join(" OR ");
        format!(
            "SELECT {projection} FROM {} WHERE ({predicate})",
            self.relation.from_clause()
        )
    }

    /// Bind values in the same order as the placeholders in `sql()`.
    pub fn params(&self) -> Vec<&dyn ToSql> {
        self.ids.iter().map(|id| id as &dyn ToSql).collect()
    }
}
