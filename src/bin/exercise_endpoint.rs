use anyhow::Result;

use coldtrack::config::TEST_API_URL;
use coldtrack::exerciser::Exerciser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    Exerciser::new(TEST_API_URL)?.run().await;

    Ok(())
}
