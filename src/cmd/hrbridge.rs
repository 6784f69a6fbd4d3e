#[tokio::main]
async fn main() {
    if let Err(e) = hrbridge::app::main::run_app().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
