use branchio::{BranchClient, BranchError, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = BranchClient::new(Config::from_env()?);

    match client.app().current().await {
        Ok(app) => println!("{app:#}"),
        Err(BranchError::Api(err)) => {
            eprintln!("status {}: {:?}", err.status_code(), err.errors());
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
