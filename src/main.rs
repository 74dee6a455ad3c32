use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    ewt_gen::cli::run().await
}
