use service_core::error::AppError;

/// Any path outside the routing table.
pub async fn not_found() -> AppError {
    AppError::NotFound("Not found.".to_string())
}

/// A known path hit with a method it does not serve.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed("Method not allowed.".to_string())
}
