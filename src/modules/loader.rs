use crate::{
    allowlist::{
        schemas::Allowlist,
        typedefs::Address,
        validate::{shared_root, validate_document, ValidationError},
        verify::verify_records,
    },
    cli::Cli,
    config::Config,
    db::database::Database,
};

pub async fn load_allowlist(cli: &Cli, config: &Config) -> eyre::Result<()> {
    // Reject a bad token address before touching the document or the store
    let token_address = match cli.token_address.as_deref() {
        Some(raw) => Some(
            Address::from_hex(raw)
                .ok_or_else(|| ValidationError::MalformedTokenAddress(raw.to_owned()))?,
        ),
        None => None,
    };

    let allowlist = Allowlist::read_from_file(&cli.allowlist_path).await?;
    tracing::info!(
        "Read {} entries from {}",
        allowlist.len(),
        cli.allowlist_path.display()
    );

    let records = validate_document(&allowlist)?;
    let root = shared_root(&records)?;

    if cli.verify_proofs {
        verify_records(&records, &root)?;
        tracing::info!("All {} proofs resolve to {root}", records.len());
    }

    let db = Database::connect(&config.database_url).await?;
    let summary = db
        .load_distribution(&cli.label, &root, token_address.as_ref(), &records)
        .await?;

    tracing::info!(
        "Airdrop created: id={}, label={}, root=0x{}, created_at={}",
        summary.airdrop.id,
        summary.airdrop.label,
        hex::encode(&summary.airdrop.root),
        summary.airdrop.created_at,
    );
    tracing::info!("Recipients inserted/updated: {}", summary.recipients_written);

    Ok(())
}
