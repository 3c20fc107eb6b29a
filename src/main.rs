#[tokio::main]
async fn main() {
    if let Err(e) = meditrack_lib::run().await {
        eprintln!("meditrack: {e}");
        std::process::exit(1);
    }
}
