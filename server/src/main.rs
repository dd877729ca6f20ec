#[tokio::main]
async fn main() {
    findmy_server::start_server().await;
}
