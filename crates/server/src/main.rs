#[tokio::main]
async fn main() -> anyhow::Result<()> {
    briefly_server::start().await
}
