#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;
    use serde_json::Value;

    use crate::error::{AppError, AppResult, OptionExt};

    async fn body_of(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_error_envelope() {
        let (status, body) = body_of(AppError::NotFound("User not found".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({"error": "User not found"}));

        let (status, body) = body_of(AppError::BadRequest("Invalid input".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid input");

        let (status, body) = body_of(AppError::Database("disk I/O error".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "disk I/O error");

        let (status, body) = body_of(AppError::MethodNotAllowed).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let (status, body) = body_of(AppError::Internal(anyhow::anyhow!("secret connection string"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("An internal server error occurred"));
        assert!(!message.contains("secret"));
    }

    #[test]
    fn test_app_error_display() {
        assert_eq!(AppError::NotFound("Product not found".into()).to_string(), "Product not found");
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("boom")).to_string(),
            "Internal error: boom"
        );
    }

    #[test]
    fn test_from_sqlx_error() {
        match AppError::from(sqlx::Error::RowNotFound) {
            AppError::NotFound(msg) => assert_eq!(msg, "Record not found"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
        match AppError::from(sqlx::Error::PoolClosed) {
            AppError::Database(msg) => assert!(!msg.is_empty()),
            other => panic!("Expected Database, got {:?}", other),
        }
    }

    #[test]
    fn test_option_ext() {
        let some: Option<i32> = Some(42);
        assert_eq!(some.ok_or_not_found("Thing").unwrap(), 42);

        let none: Option<i32> = None;
        let result: AppResult<i32> = none.ok_or_not_found("Category");
        match result {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Category not found"),
            _ => panic!("Expected NotFound"),
        }
    }
}
