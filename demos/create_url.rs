use branchio::{BranchClient, Config, Params};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let channel = std::env::var("BRANCH_CHANNEL").unwrap_or_else(|_| "demo".to_owned());

    let client = BranchClient::new(Config::from_env()?);
    let params = Params::new()
        .with("channel", channel)
        .with("feature", "share")
        .with("tags", vec!["demo", "rust"]);

    let response = client.url().create(params).await?;
    println!("url: {}", response["url"]);

    Ok(())
}
