use tracing::error;

#[tokio::main]
async fn main() {
    if let Err(err) = college_site::run().await {
        error!(error = %err, "college site failed");
        std::process::exit(1);
    }
}
