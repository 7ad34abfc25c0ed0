use anyhow::Result;
use tracing::info;

use coldtrack::{api, config, logging};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let addr = config::api_listen_addr();
    let (addr, server) = warp::serve(api::routes(api::new_store())).try_bind_ephemeral(addr)?;

    info!("temperature api listening on http://{}", addr);
    server.await;

    Ok(())
}
