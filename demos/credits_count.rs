use std::io;

use branchio::{BranchClient, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let identity = std::env::var("BRANCH_IDENTITY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "BRANCH_IDENTITY environment variable is required",
        )
    })?;

    let client = BranchClient::new(Config::from_env()?);
    let credits = client.credits().count(&identity).await?;
    println!("credits for {identity}: {credits}");

    Ok(())
}
