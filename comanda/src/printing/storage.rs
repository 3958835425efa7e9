//! redb-based cache for the last issued receipt
//!
//! One table, one key. Every save overwrites the slot, so this is a
//! reprint buffer and not a history log.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::models::{CachedReceipt, OrderReceipt};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument};

/// Last receipt table: key = slot name, value = JSON
const LAST_RECEIPT_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("last_receipt");

/// The only key ever written
const LAST_KEY: &str = "last";

#[derive(Debug, Error)]
pub enum ReceiptCacheError {
    #[error("Failed to open receipt cache: {0}")]
    Open(#[from] redb::DatabaseError),

    #[error("Failed to write receipt cache: {0}")]
    Write(#[source] redb::Error),

    #[error("Failed to read receipt cache: {0}")]
    Read(#[source] redb::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type ReceiptCacheResult<T> = Result<T, ReceiptCacheError>;

/// Last-receipt cache
#[derive(Clone)]
pub struct ReceiptCache {
    db: Arc<Database>,
}

impl ReceiptCache {
    /// Open or create the cache file
    pub fn open(path: impl AsRef<Path>) -> ReceiptCacheResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory cache (tests and dry runs)
    pub fn open_in_memory() -> ReceiptCacheResult<Self> {
        let db =
            Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> ReceiptCacheResult<Self> {
        let create = || -> Result<(), redb::Error> {
            let write_txn = db.begin_write()?;
            {
                let _ = write_txn.open_table(LAST_RECEIPT_TABLE)?;
            }
            write_txn.commit()?;
            Ok(())
        };
        create().map_err(ReceiptCacheError::Write)?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Save `receipt` as the last receipt, stamped with the current time
    #[instrument(skip_all, fields(order_number = receipt.order_number))]
    pub async fn save(&self, receipt: &OrderReceipt) -> ReceiptCacheResult<CachedReceipt> {
        let cached = CachedReceipt {
            receipt: receipt.clone(),
            saved_at: chrono::Utc::now().timestamp_millis(),
        };
        let value = serde_json::to_vec(&cached)?;

        let db = self.db.clone();
        tokio::task::spawn_blocking(move || write_slot(&db, &value)).await??;

        debug!(saved_at = cached.saved_at, "Last receipt saved");
        Ok(cached)
    }

    /// Get the last receipt, `None` if nothing was ever saved
    pub async fn get(&self) -> ReceiptCacheResult<Option<CachedReceipt>> {
        let db = self.db.clone();
        let bytes = tokio::task::spawn_blocking(move || read_slot(&db)).await??;

        match bytes {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Remove the last receipt, returns whether there was one
    pub async fn clear(&self) -> ReceiptCacheResult<bool> {
        let db = self.db.clone();
        let removed = tokio::task::spawn_blocking(move || clear_slot(&db)).await??;
        Ok(removed)
    }
}

fn write_slot(db: &Database, value: &[u8]) -> ReceiptCacheResult<()> {
    let write = || -> Result<(), redb::Error> {
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(LAST_RECEIPT_TABLE)?;
            table.insert(LAST_KEY, value)?;
        }
        write_txn.commit()?;
        Ok(())
    };
    write().map_err(ReceiptCacheError::Write)
}

fn read_slot(db: &Database) -> ReceiptCacheResult<Option<Vec<u8>>> {
    let read = || -> Result<Option<Vec<u8>>, redb::Error> {
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(LAST_RECEIPT_TABLE)?;
        let value = table.get(LAST_KEY)?.map(|guard| guard.value().to_vec());
        Ok(value)
    };
    read().map_err(ReceiptCacheError::Read)
}

fn clear_slot(db: &Database) -> ReceiptCacheResult<bool> {
    let remove = || -> Result<bool, redb::Error> {
        let write_txn = db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(LAST_RECEIPT_TABLE)?;
            table.remove(LAST_KEY)?.is_some()
        };
        write_txn.commit()?;
        Ok(removed)
    };
    remove().map_err(ReceiptCacheError::Write)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{ReceiptLine, ServiceType};

    fn create_test_receipt(order_number: i64) -> OrderReceipt {
        OrderReceipt {
            order_number,
            issued_at: "16/10/2026 12:00".to_string(),
            customer_name: "Carlos".to_string(),
            customer_contact: "11911112222".to_string(),
            address: None,
            address_reference: None,
            payment_method: "Cartão".to_string(),
            change_for: None,
            lines: vec![ReceiptLine {
                quantity: 3,
                name: "Pastel de carne".to_string(),
                note: Some("bem passado".to_string()),
            }],
            total: Decimal::new(2700, 2),
            delivery_fee: Decimal::ZERO,
            service_type: ServiceType::Pickup,
            table_label: None,
        }
    }

    #[tokio::test]
    async fn test_get_empty() {
        let cache = ReceiptCache::open_in_memory().unwrap();
        assert!(cache.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let cache = ReceiptCache::open_in_memory().unwrap();
        let receipt = create_test_receipt(42);

        let before = chrono::Utc::now().timestamp_millis();
        let saved = cache.save(&receipt).await.unwrap();

        let cached = cache.get().await.unwrap().unwrap();
        assert_eq!(cached.receipt, receipt);
        assert_eq!(cached.saved_at, saved.saved_at);
        assert!(cached.saved_at >= before);
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let cache = ReceiptCache::open_in_memory().unwrap();

        cache.save(&create_test_receipt(1)).await.unwrap();
        cache.save(&create_test_receipt(2)).await.unwrap();

        let cached = cache.get().await.unwrap().unwrap();
        assert_eq!(cached.receipt.order_number, 2);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = ReceiptCache::open_in_memory().unwrap();
        assert!(!cache.clear().await.unwrap());

        cache.save(&create_test_receipt(5)).await.unwrap();
        assert!(cache.clear().await.unwrap());
        assert!(cache.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_slot() {
        let cache = ReceiptCache::open_in_memory().unwrap();
        let other = cache.clone();

        cache.save(&create_test_receipt(9)).await.unwrap();
        assert_eq!(other.get().await.unwrap().unwrap().receipt.order_number, 9);
    }
}
