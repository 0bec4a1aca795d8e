use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = todo_server::config::load().context("configuration is malformed")?;
    todo_server::logging::init(&cfg.log)?;
    todo_server::serve(cfg).await
}
