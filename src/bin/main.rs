//! Binary entrypoint for the felix tool

#[tokio::main]
async fn main() {
    if let Err(e) = felix_client::cli::run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
