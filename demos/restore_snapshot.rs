//! Restore the latest snapshot of a repository into a target directory.
//!
//! Run:
//! `cargo run --example restore_snapshot -- <repository> <target>`
//!
//! Env vars: `ZEROBYTE_URL`, `ZEROBYTE_USERNAME`, `ZEROBYTE_PASSWORD`.

use zerobyte_client::models::RestoreRequest;
use zerobyte_client::{ErrorKind, ZerobyteClient};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let (Some(repository), Some(target)) = (args.next(), args.next()) else {
        return Err("usage: restore_snapshot <repository> <target>".into());
    };

    let client = ZerobyteClient::connect(
        std::env::var("ZEROBYTE_URL")?,
        std::env::var("ZEROBYTE_USERNAME")?,
        std::env::var("ZEROBYTE_PASSWORD")?,
    )?;

    let snapshots = match client.snapshots().list(&repository, None) {
        Ok(snapshots) => snapshots,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            return Err(format!("repository '{repository}' does not exist").into());
        }
        Err(error) => return Err(error.into()),
    };
    let Some(latest) = snapshots.as_array().and_then(|list| list.last()) else {
        println!("no snapshots in '{repository}'");
        return Ok(());
    };

    let response = client.snapshots().restore(
        &repository,
        &RestoreRequest {
            target,
            snapshot_id: latest["short_id"].as_str().map(str::to_owned),
            ..RestoreRequest::default()
        },
    )?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
