#[actix_web::main]
async fn main() {
    if let Err(e) = inventory_api::run().await {
        log::error!("Server terminated: {:#}", e);
        std::process::exit(1);
    }
}
