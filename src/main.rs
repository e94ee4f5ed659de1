#[actix_web::main]
async fn main() -> std::io::Result<()> {
    hafecs_office_server::run().await
}
