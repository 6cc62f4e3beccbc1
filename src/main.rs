#[tokio::main]
async fn main() -> anyhow::Result<()> {
    prompt_animator::run().await
}
