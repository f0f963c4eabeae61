//! Access gate for admin-scoped routes.
//!
//! Applied as a `route_layer` on the admin router so every admin endpoint goes through
//! the same checks, in this order:
//!
//! | Situation                          | Outcome |
//! |------------------------------------|---------|
//! | no authenticated principal         | 401 `Unauthenticated` |
//! | principal is not an admin          | 403 `Access denied. Admin privileges required.` |
//! | admin id unknown                   | 401 `Unauthenticated` |
//! | admin account deactivated          | 403 `Account is deactivated` |
//! | active admin                       | request proceeds, [`AdminAccount`] in extensions |

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::core::error::AppError;
use crate::features::auth::directory::AdminDirectory;
use crate::features::auth::model::{AdminAccount, Principal};

pub const MSG_UNAUTHENTICATED: &str = "Unauthenticated";
pub const MSG_ADMIN_REQUIRED: &str = "Access denied. Admin privileges required.";
pub const MSG_ACCOUNT_DEACTIVATED: &str = "Account is deactivated";

pub async fn admin_gate(
    State(directory): State<Arc<dyn AdminDirectory>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let principal = req
        .extensions()
        .get::<Principal>()
        .cloned()
        .ok_or_else(|| AppError::Unauthorized(MSG_UNAUTHENTICATED.to_string()))?;

    if !principal.is_admin() {
        return Err(AppError::Forbidden(MSG_ADMIN_REQUIRED.to_string()));
    }

    let admin: AdminAccount = directory
        .find_admin(principal.id)
        .await?
        .ok_or_else(|| AppError::Unauthorized(MSG_UNAUTHENTICATED.to_string()))?;

    if !admin.is_active {
        tracing::info!(admin_id = admin.id, "Rejected request from deactivated admin");
        return Err(AppError::Forbidden(MSG_ACCOUNT_DEACTIVATED.to_string()));
    }

    req.extensions_mut().insert(admin);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::middleware::{log_forbidden_responses, FORBIDDEN_LOG_MESSAGE};
    use crate::shared::test_helpers::{capture_logs, with_principal, InMemoryAdminDirectory};
    use axum::{http::StatusCode, middleware::from_fn_with_state, routing::get, Json, Router};
    use axum_test::TestServer;
    use serde_json::{json, Value};

    async fn whoami(admin: AdminAccount) -> Json<Value> {
        Json(json!({ "admin_id": admin.id }))
    }

    fn server(principal: Option<Principal>) -> TestServer {
        let directory: Arc<dyn AdminDirectory> = Arc::new(
            InMemoryAdminDirectory::default()
                .with_admin(1, true)
                .with_admin(2, false),
        );

        let admin = Router::new()
            .route("/api/admin/whoami", get(whoami))
            .route_layer(from_fn_with_state(directory, admin_gate));

        let app = Router::new()
            .merge(admin)
            .layer(axum::middleware::from_fn(log_forbidden_responses));

        TestServer::new(with_principal(app, principal)).unwrap()
    }

    #[tokio::test]
    async fn test_no_principal_is_401() {
        let (logs, _guard) = capture_logs();
        let response = server(None).get("/api/admin/whoami").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["message"], MSG_UNAUTHENTICATED);
        assert_eq!(logs.count(FORBIDDEN_LOG_MESSAGE), 0);
    }

    #[tokio::test]
    async fn test_customer_is_403_and_logged_once() {
        let (logs, _guard) = capture_logs();
        let response = server(Some(Principal::customer(1)))
            .get("/api/admin/whoami")
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
        assert_eq!(response.json::<Value>()["message"], MSG_ADMIN_REQUIRED);

        let lines = logs.lines_containing(FORBIDDEN_LOG_MESSAGE);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("/api/admin/whoami"));
        assert!(lines[0].contains("method=GET"));
        assert!(lines[0].contains("user_id=1"));
    }

    #[tokio::test]
    async fn test_deactivated_admin_is_403_and_logged_once() {
        let (logs, _guard) = capture_logs();
        let response = server(Some(Principal::admin(2)))
            .get("/api/admin/whoami")
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
        assert_eq!(response.json::<Value>()["message"], MSG_ACCOUNT_DEACTIVATED);

        let lines = logs.lines_containing(FORBIDDEN_LOG_MESSAGE);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("/api/admin/whoami"));
        assert!(lines[0].contains("method=GET"));
    }

    #[tokio::test]
    async fn test_unknown_admin_is_401() {
        let response = server(Some(Principal::admin(99)))
            .get("/api/admin/whoami")
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["message"], MSG_UNAUTHENTICATED);
    }

    #[tokio::test]
    async fn test_active_admin_reaches_handler() {
        let (logs, _guard) = capture_logs();
        let response = server(Some(Principal::admin(1)))
            .get("/api/admin/whoami")
            .await;

        response.assert_status(StatusCode::OK);
        assert_eq!(response.json::<Value>()["admin_id"], 1);
        assert_eq!(logs.count(FORBIDDEN_LOG_MESSAGE), 0);
    }
}
