use anyhow::Result;
use redb::{Database, ReadableDatabase, TableDefinition};
use std::sync::Arc;

/// Trait for redb-backed key-value tables.
///
/// Implementors only name their table and hand out the database; every
/// read and write runs in its own transaction and is committed before
/// returning, so callers observe synchronous write-through semantics.
pub trait SimpleStorage: Send + Sync {
    /// The table definition for this storage type.
    const TABLE: TableDefinition<'static, &'static str, &'static [u8]>;

    /// Get reference to the database.
    fn db(&self) -> &Arc<Database>;

    /// Store raw bytes under a key, replacing any previous value.
    fn put_raw(&self, key: &str, data: &[u8]) -> Result<()> {
        let write_txn = self.db().begin_write()?;
        {
            let mut table = write_txn.open_table(Self::TABLE)?;
            table.insert(key, data)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Get raw bytes by key.
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let read_txn = self.db().begin_read()?;
        let table = read_txn.open_table(Self::TABLE)?;
        Ok(table.get(key)?.map(|value| value.value().to_vec()))
    }

    /// Delete by key, returns true if it existed.
    fn delete(&self, key: &str) -> Result<bool> {
        let write_txn = self.db().begin_write()?;
        let existed = {
            let mut table = write_txn.open_table(Self::TABLE)?;
            table.remove(key)?.is_some()
        };
        write_txn.commit()?;
        Ok(existed)
    }
}

/// The narrow get/put/delete surface higher layers persist through.
///
/// Every [`SimpleStorage`] is a `KeyValueStore`. Other implementations
/// (in-memory maps, stores that fail on purpose) can be plugged in where a
/// redb table is not wanted.
pub trait KeyValueStore {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>>;

    fn put_raw(&self, key: &str, data: &[u8]) -> Result<()>;

    /// Delete by key, returns true if it existed.
    fn delete(&self, key: &str) -> Result<bool>;
}

impl<T: SimpleStorage> KeyValueStore for T {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        <T as SimpleStorage>::get_raw(self, key)
    }

    fn put_raw(&self, key: &str, data: &[u8]) -> Result<()> {
        <T as SimpleStorage>::put_raw(self, key, data)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        <T as SimpleStorage>::delete(self, key)
    }
}

/// Macro to generate a simple storage struct with common implementations.
#[macro_export]
macro_rules! define_simple_storage {
    ( $(#[$meta:meta])* $vis:vis struct $name:ident { table: $table_name:literal } ) => {
        const TABLE: redb::TableDefinition<'static, &'static str, &'static [u8]> =
            redb::TableDefinition::new($table_name);

        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            db: std::sync::Arc<redb::Database>,
        }

        impl $name {
            pub fn new(db: std::sync::Arc<redb::Database>) -> anyhow::Result<Self> {
                let write_txn = db.begin_write()?;
                write_txn.open_table(TABLE)?;
                write_txn.commit()?;

                Ok(Self { db })
            }

            pub fn put_raw(&self, key: &str, data: &[u8]) -> anyhow::Result<()> {
                <Self as $crate::SimpleStorage>::put_raw(self, key, data)
            }

            pub fn get_raw(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
                <Self as $crate::SimpleStorage>::get_raw(self, key)
            }

            pub fn delete(&self, key: &str) -> anyhow::Result<bool> {
                <Self as $crate::SimpleStorage>::delete(self, key)
            }
        }

        impl $crate::SimpleStorage for $name {
            const TABLE: redb::TableDefinition<'static, &'static str, &'static [u8]> = TABLE;

            fn db(&self) -> &std::sync::Arc<redb::Database> {
                &self.db
            }
        }
    };
}
