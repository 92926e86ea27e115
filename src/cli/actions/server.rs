use crate::registro;
use anyhow::{Context, Result};
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the DSN is malformed or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    // Reject malformed DSNs before touching the pool
    let dsn = Url::parse(&args.dsn).context("invalid database connection string")?;

    registro::new(args.port, dsn.to_string()).await?;

    Ok(())
}
