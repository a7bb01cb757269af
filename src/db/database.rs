use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    allowlist::typedefs::{Address, Hash32, RecipientRecord},
    utils::misc::recipients_progress_bar,
};

use super::{
    airdrop::{AirdropRow, LoadSummary},
    constants::HASH_FUNCTION,
};

const CREATE_AIRDROP_SQL: &str = "
    INSERT INTO airdrops (label, root, hash_fn, token_address)
    VALUES ($1, $2, $3, $4)
    RETURNING id
";

const UPSERT_RECIPIENT_SQL: &str = "
    INSERT INTO airdrop_recipients (airdrop_id, address, amount, leaf, proof, reasons)
    VALUES ($1, $2, $3::numeric, $4, $5, $6)
    ON CONFLICT (airdrop_id, address) DO UPDATE
    SET amount  = EXCLUDED.amount,
        leaf    = EXCLUDED.leaf,
        proof   = EXCLUDED.proof,
        reasons = EXCLUDED.reasons
";

const SELECT_AIRDROP_SQL: &str = "
    SELECT id, label, root, created_at
    FROM airdrops
    WHERE id = $1
";

pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn connect(database_url: &str) -> eyre::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;

        sqlx::migrate!().run(&pool).await?;

        Ok(Self { pool })
    }

    /// Writes the airdrop row and all recipient rows in one transaction.
    /// Any statement failure returns early; the uncommitted transaction rolls
    /// back on drop, so nothing persists unless every row went in.
    pub async fn load_distribution(
        &self,
        label: &str,
        root: &Hash32,
        token_address: Option<&Address>,
        records: &[RecipientRecord],
    ) -> eyre::Result<LoadSummary> {
        let mut tx = self.pool.begin().await?;

        let airdrop_id: i64 = sqlx::query_scalar(CREATE_AIRDROP_SQL)
            .bind(label)
            .bind(root.as_bytes())
            .bind(HASH_FUNCTION)
            .bind(token_address.map(Address::as_bytes))
            .fetch_one(&mut *tx)
            .await?;

        let pb = recipients_progress_bar(records.len() as u64);

        for record in records {
            let proof: Vec<Vec<u8>> = record
                .proof
                .iter()
                .map(|hash| hash.as_bytes().to_vec())
                .collect();

            sqlx::query(UPSERT_RECIPIENT_SQL)
                .bind(airdrop_id)
                .bind(record.address.as_bytes())
                .bind(record.amount.as_str())
                .bind(record.leaf.as_bytes())
                .bind(&proof)
                .bind(&record.reasons)
                .execute(&mut *tx)
                .await?;

            pb.inc(1);
        }

        pb.finish_and_clear();

        tx.commit().await?;

        let airdrop = sqlx::query_as::<_, AirdropRow>(SELECT_AIRDROP_SQL)
            .bind(airdrop_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(LoadSummary {
            airdrop,
            recipients_written: records.len(),
        })
    }
}
