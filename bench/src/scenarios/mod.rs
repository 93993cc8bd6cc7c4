//! Benchmark scenarios module

use rand::Rng;
use rand::rngs::StdRng;
use slotbucket::{HashTable, HashtableResult, IntegerHashProvider};

/// Table type every scenario runs against
pub type BenchTable = HashTable<u64, u64, IntegerHashProvider>;

/// Scenario trait - defines a benchmark scenario
pub trait Scenario: Send + Sync {
    /// Populate a fresh table before the timed loop
    fn prepare(&self, table: &mut BenchTable) -> HashtableResult<()>;

    /// Execute one iteration of the scenario
    fn execute(&self, table: &mut BenchTable, rng: &mut StdRng) -> HashtableResult<()>;

    fn name(&self) -> &'static str;
}

fn fill(table: &mut BenchTable, rows: u64) -> HashtableResult<()> {
    table.reserve(rows as usize)?;
    for key in 0..rows {
        table.add(key, key)?;
    }
    Ok(())
}

/// Insert scenario - append fresh keys, clearing the table once it holds `rows`
pub struct Insert {
    rows: u64,
}

impl Insert {
    pub fn new(rows: u64) -> Self {
        Self { rows }
    }
}

impl Scenario for Insert {
    fn prepare(&self, _table: &mut BenchTable) -> HashtableResult<()> {
        Ok(())
    }

    fn execute(&self, table: &mut BenchTable, rng: &mut StdRng) -> HashtableResult<()> {
        if table.len() as u64 >= self.rows {
            table.clear();
        }
        let key = table.len() as u64;
        table.add(key, rng.r#gen())?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "insert"
    }
}

/// Point lookup scenario - single key lookup
pub struct PointLookup {
    rows: u64,
}

impl PointLookup {
    pub fn new(rows: u64) -> Self {
        Self { rows }
    }
}

impl Scenario for PointLookup {
    fn prepare(&self, table: &mut BenchTable) -> HashtableResult<()> {
        fill(table, self.rows)
    }

    fn execute(&self, table: &mut BenchTable, rng: &mut StdRng) -> HashtableResult<()> {
        let key = rng.gen_range(0..self.rows);
        table.get(&key)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "point_lookup"
    }
}

/// Read write scenario - lookup followed by an in-place update
pub struct ReadWrite {
    rows: u64,
}

impl ReadWrite {
    pub fn new(rows: u64) -> Self {
        Self { rows }
    }
}

impl Scenario for ReadWrite {
    fn prepare(&self, table: &mut BenchTable) -> HashtableResult<()> {
        fill(table, self.rows)
    }

    fn execute(&self, table: &mut BenchTable, rng: &mut StdRng) -> HashtableResult<()> {
        let key = rng.gen_range(0..self.rows);
        let value = *table.get(&key)?;
        table.set(&key, value.wrapping_add(1))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "read_write"
    }
}

/// Churn scenario - remove a random key and insert it again at the back
///
/// Exercises tombstones, holes and compaction.
pub struct Churn {
    rows: u64,
}

impl Churn {
    pub fn new(rows: u64) -> Self {
        Self { rows }
    }
}

impl Scenario for Churn {
    fn prepare(&self, table: &mut BenchTable) -> HashtableResult<()> {
        fill(table, self.rows)
    }

    fn execute(&self, table: &mut BenchTable, rng: &mut StdRng) -> HashtableResult<()> {
        let key = rng.gen_range(0..self.rows);
        let value = table.remove(&key)?;
        table.add(key, value)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "churn"
    }
}

/// Look up a scenario by its command-line name
pub fn by_name(name: &str, rows: u64) -> Option<Box<dyn Scenario>> {
    let scenario: Box<dyn Scenario> = match name {
        "insert" => Box::new(Insert::new(rows)),
        "point_lookup" => Box::new(PointLookup::new(rows)),
        "read_write" => Box::new(ReadWrite::new(rows)),
        "churn" => Box::new(Churn::new(rows)),
        _ => return None,
    };
    Some(scenario)
}
