use teaser_server::{Server, bootstrap};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (cfg, _log) = bootstrap("server")?;
    Server::builder().config(cfg).build().await?.run().await
}
