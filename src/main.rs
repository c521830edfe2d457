#[actix_web::main]
async fn main() -> Result<(), storycase_lib::domain::error::AppError> {
    storycase_lib::run().await
}
