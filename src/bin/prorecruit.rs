use anyhow::Result;
use prorecruit::cli::start;

#[tokio::main]
async fn main() -> Result<()> {
    let action = start()?;
    action.execute().await
}
