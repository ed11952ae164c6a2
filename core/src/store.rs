//! Read side of the engine's SQLite result store.
//!
//! RULE: only store.rs talks to the database. Everything downstream works
//! on decoded rows — queries are described in query.rs and executed here.

use crate::{
    error::{SweepError, SweepResult},
    query::FlowQuery,
    timeseries::FlowEntry,
    types::{AgentId, Timestep},
};
use rusqlite::{params, Connection, OpenFlags};

/// Run-level metadata. Exactly one `info` row per result store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationMetadata {
    pub initial_year: i32,
    pub initial_month: u32,
    /// Number of discrete timesteps in the simulation horizon.
    pub duration: Timestep,
}

/// One inventory-snapshot row: (creation time, quantity, resource qualifier).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InventoryRow {
    pub time: i64,
    pub quantity: f64,
    pub qual_id: i64,
}

pub struct ResultStore {
    conn: Connection,
}

impl ResultStore {
    /// Open a finished run's output store read-only. Fails when the file
    /// does not exist or is not a database.
    pub fn open(path: &str) -> SweepResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI,
        )?;
        Ok(Self { conn })
    }

    /// Open an empty in-memory store (used by tests and fixtures).
    pub fn in_memory() -> SweepResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Create the reference subset of the engine's output schema.
    /// Real stores arrive with this already in place; fixtures call it.
    pub fn create_reference_schema(&self) -> SweepResult<()> {
        self.conn
            .execute_batch(include_str!("../../schema/reference.sql"))?;
        Ok(())
    }

    // ── Schema reader ──────────────────────────────────────────

    /// Read the single metadata row. Zero or multiple rows is a malformed
    /// store and aborts the scenario.
    pub fn metadata(&self) -> SweepResult<SimulationMetadata> {
        let mut stmt = self
            .conn
            .prepare("SELECT initialyear, initialmonth, duration FROM info")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(SimulationMetadata {
                    initial_year: row.get(0)?,
                    initial_month: row.get::<_, i64>(1)? as u32,
                    duration: row.get::<_, i64>(2)? as Timestep,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        match rows.as_slice() {
            [one] => Ok(*one),
            other => Err(SweepError::MetadataMissing { found: other.len() }),
        }
    }

    /// Ids of all agents whose prototype or spec label contains `label`
    /// as a case-insensitive substring, in registry order.
    ///
    /// instr(), not LIKE: archetype labels routinely carry underscores,
    /// which LIKE would treat as single-character wildcards.
    pub fn agents_matching(&self, label: &str) -> SweepResult<Vec<AgentId>> {
        let mut stmt = self.conn.prepare(
            "SELECT agentid FROM agententry
             WHERE instr(lower(prototype), lower(?1)) > 0
                OR instr(lower(spec),      lower(?1)) > 0
             ORDER BY rowid ASC",
        )?;
        let ids = stmt
            .query_map(params![label], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    // ── Query execution ────────────────────────────────────────

    /// Execute a query whose first two projected columns are (time, quantity).
    pub fn flow_entries(&self, query: &FlowQuery) -> SweepResult<Vec<FlowEntry>> {
        let mut stmt = self.conn.prepare(&query.sql())?;
        let rows = stmt
            .query_map(&query.params()[..], |row| {
                Ok(FlowEntry {
                    time: row.get(0)?,
                    quantity: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Execute a query whose projected columns are (time, quantity, qualid).
    pub fn inventory_rows(&self, query: &FlowQuery) -> SweepResult<Vec<InventoryRow>> {
        let mut stmt = self.conn.prepare(&query.sql())?;
        let rows = stmt
            .query_map(&query.params()[..], |row| {
                Ok(InventoryRow {
                    time: row.get(0)?,
                    quantity: row.get(1)?,
                    qual_id: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    // ── Fixture writers ────────────────────────────────────────
    // A real store is never written through this struct; these exist so
    // tests and demos can assemble synthetic runs against the reference
    // schema.

    pub fn insert_info(
        &self,
        initial_year: i32,
        initial_month: u32,
        duration: Timestep,
    ) -> SweepResult<()> {
        self.conn.execute(
            "INSERT INTO info (initialyear, initialmonth, duration) VALUES (?1, ?2, ?3)",
            params![initial_year, initial_month as i64, duration as i64],
        )?;
        Ok(())
    }

    pub fn insert_agent(
        &self,
        agent_id: &str,
        kind: &str,
        spec: &str,
        prototype: &str,
        enter_time: i64,
    ) -> SweepResult<()> {
        self.conn.execute(
            "INSERT INTO agententry (agentid, kind, spec, prototype, parentid, lifetime, entertime)
             VALUES (?1, ?2, ?3, ?4, NULL, -1, ?5)",
            params![agent_id, kind, spec, prototype, enter_time],
        )?;
        Ok(())
    }

    pub fn insert_resource(
        &self,
        resource_id: i64,
        time_created: i64,
        quantity: f64,
        qual_id: i64,
    ) -> SweepResult<()> {
        self.conn.execute(
            "INSERT INTO resources (resourceid, timecreated, quantity, qualid)
             VALUES (?1, ?2, ?3, ?4)",
            params![resource_id, time_created, quantity, qual_id],
        )?;
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn insert_transaction(
        &self,
        transaction_id: i64,
        sender_id: &str,
        receiver_id: &str,
        resource_id: i64,
        commodity: &str,
        time: i64,
    ) -> SweepResult<()> {
        self.conn.execute(
            "INSERT INTO transactions
                 (transactionid, senderid, receiverid, resourceid, commodity, time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                transaction_id,
                sender_id,
                receiver_id,
                resource_id,
                commodity,
                time
            ],
        )?;
        Ok(())
    }

    pub fn insert_inventory(&self, agent_id: &str, resource_id: i64) -> SweepResult<()> {
        self.conn.execute(
            "INSERT INTO inventories (agentid, resourceid) VALUES (?1, ?2)",
            params![agent_id, resource_id],
        )?;
        Ok(())
    }
}
