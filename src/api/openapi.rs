//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, borrow, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookloan API",
        version = "1.0.0",
        description = "Library Lending Service REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Borrow
        borrow::list_borrow_logs,
        borrow::borrow_book,
        borrow::return_book,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::BookSummary,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::book::BookQuery,
            // Borrow
            crate::models::borrow_log::BorrowLog,
            crate::models::borrow_log::BorrowLogDetails,
            crate::models::borrow_log::BorrowRequest,
            crate::models::borrow_log::ReturnRequest,
            crate::models::borrow_log::BorrowLogQuery,
            borrow::BorrowResponse,
            borrow::ReturnResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog management"),
        (name = "borrow", description = "Borrow and return operations")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
