//! Authentication handlers.

use actix_web::{HttpResponse, web};
use serde_json::json;

use weblog_core::domain::Redirect;
use weblog_shared::ApiResponse;
use weblog_shared::dto::{
    CreatedResponse, LoginRequest, LoginResponse, RedirectResponse, RegisterRequest, UserResponse,
};

use crate::middleware::auth::RequestSession;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // The password is never echoed back.
    let id = state
        .auth
        .register(&req.username, &req.password)
        .await
        .map_err(|e| AppError::from(e).with_form(json!({ "username": req.username })))?;

    Ok(HttpResponse::Created().json(CreatedResponse {
        id,
        redirect: Some(Redirect::Login.path().to_string()),
    }))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let outcome = state.auth.login(&req.username, &req.password).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        token: outcome.token.to_string(),
        token_type: "Bearer".to_string(),
        redirect: outcome.redirect.path().to_string(),
    }))
}

/// POST /api/auth/logout
pub async fn logout(
    state: web::Data<AppState>,
    RequestSession(mut session): RequestSession,
) -> HttpResponse {
    let redirect = state.auth.logout(&mut session).await;

    HttpResponse::Ok().json(RedirectResponse {
        redirect: redirect.path().to_string(),
    })
}

/// GET /api/auth/me - Protected route
pub async fn me(
    state: web::Data<AppState>,
    RequestSession(session): RequestSession,
) -> AppResult<HttpResponse> {
    let user = state.auth.require_user(&session).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(UserResponse {
        id: user.id,
        username: user.username,
        role: user.role,
    })))
}
