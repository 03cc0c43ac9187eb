#[tokio::main]
async fn main() {
    ordering_backend::run().await;
}
