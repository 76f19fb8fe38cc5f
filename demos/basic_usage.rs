//! Log in and print an overview of the server.
//!
//! Run:
//! `cargo run --example basic_usage`
//!
//! Env vars:
//! - `ZEROBYTE_URL` (defaults to `http://localhost:4096`)
//! - `ZEROBYTE_USERNAME`, `ZEROBYTE_PASSWORD`

use zerobyte_client::ZerobyteClient;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let url = std::env::var("ZEROBYTE_URL").unwrap_or_else(|_| "http://localhost:4096".to_owned());
    let username = std::env::var("ZEROBYTE_USERNAME")?;
    let password = std::env::var("ZEROBYTE_PASSWORD")?;

    let client = ZerobyteClient::connect(url, username, password)?;

    let info = client.system().info()?;
    println!("server: {}", serde_json::to_string_pretty(&info)?);

    for volume in client.volumes().list()?.as_array().into_iter().flatten() {
        println!("volume {}: {}", volume["id"], volume["name"]);
        if let Some(id) = volume["id"].as_u64() {
            for repository in client.repositories().list(Some(id))? {
                println!("  repository {}", repository["name"]);
            }
        }
    }

    client.logout()?;
    Ok(())
}
