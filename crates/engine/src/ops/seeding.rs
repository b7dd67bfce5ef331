use sea_orm::{EntityTrait, TransactionTrait};

use crate::{EngineError, ResultEngine, Transaction, transactions};

use super::{Engine, with_tx};

/// Rows per `INSERT` statement, well below SQLite's bound-parameter limit.
const INSERT_CHUNK: usize = 100;

impl Engine {
    /// Replaces the whole record store with the configured dataset.
    ///
    /// Returns the number of stored records.
    pub async fn seed(&self) -> ResultEngine<u64> {
        let dataset = self
            .dataset
            .as_ref()
            .ok_or_else(|| EngineError::SeedFetch("no dataset source configured".to_string()))?;

        let raw = dataset.fetch().await?;
        let records = raw
            .into_iter()
            .map(Transaction::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;

        self.replace_transactions(&records).await
    }

    /// Deletes every stored record and inserts `records` in their place.
    ///
    /// Both steps run in one database transaction: concurrent readers see
    /// either the previous collection or the new one, never an empty store.
    pub async fn replace_transactions(&self, records: &[Transaction]) -> ResultEngine<u64> {
        tracing::info!("replacing record store with {} transactions", records.len());
        with_tx!(self, |db_tx| {
            let deleted = transactions::Entity::delete_many().exec(&db_tx).await?;
            tracing::debug!("deleted {} stale transactions", deleted.rows_affected);

            for chunk in records.chunks(INSERT_CHUNK) {
                transactions::Entity::insert_many(chunk.iter().map(transactions::ActiveModel::from))
                    .exec(&db_tx)
                    .await?;
            }
            Ok::<u64, EngineError>(records.len() as u64)
        })
    }
}
