use chrono::{DateTime, Utc};
use sqlx::prelude::FromRow;

#[derive(Debug, FromRow)]
pub struct AirdropRow {
    pub id: i64,
    pub label: String,
    pub root: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct LoadSummary {
    pub airdrop: AirdropRow,
    pub recipients_written: usize,
}
