use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cfg = credroute::config::Config::parse();
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(credroute::run(cfg))
}
