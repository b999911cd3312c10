//! Post handlers: public feed, dashboard and authoring.

use actix_web::{HttpResponse, web};
use serde_json::json;

use weblog_core::domain::TaggedPost;
use weblog_shared::ApiResponse;
use weblog_shared::dto::{CreatePostRequest, CreatedResponse, PostResponse};

use crate::middleware::auth::RequestSession;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(tagged: TaggedPost) -> PostResponse {
    let categories = tagged
        .category_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let post = tagged.post;

    PostResponse {
        id: post.id,
        title: post.title,
        image: post.image,
        desc: post.desc,
        date_created: post.date_created.to_rfc3339(),
        author_id: post.author_id,
        categories,
    }
}

fn to_responses(posts: Vec<TaggedPost>) -> Vec<PostResponse> {
    posts.into_iter().map(to_response).collect()
}

/// GET /api/posts
pub async fn feed(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.feed().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_responses(posts))))
}

/// GET /api/dashboard - Protected route
pub async fn dashboard(
    state: web::Data<AppState>,
    RequestSession(session): RequestSession,
) -> AppResult<HttpResponse> {
    let posts = state.posts.dashboard(&session).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_responses(posts))))
}

/// POST /api/posts - Protected route
pub async fn create(
    state: web::Data<AppState>,
    RequestSession(session): RequestSession,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let id = state
        .posts
        .create_post(&session, &req.title, &req.tags, &req.content)
        .await
        .map_err(|e| {
            AppError::from(e).with_form(json!({
                "title": req.title,
                "tags": req.tags,
                "content": req.content,
            }))
        })?;

    Ok(HttpResponse::Created().json(CreatedResponse { id, redirect: None }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use weblog_core::domain::{Category, Post};

    #[test]
    fn test_post_response_carries_category_names() {
        let tagged = TaggedPost {
            post: Post {
                id: 7,
                title: "Welcome".to_string(),
                image: None,
                desc: "Welcome to my weblog".to_string(),
                date_created: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
                author_id: 1,
            },
            categories: vec![
                Category { id: 1, name: "war".to_string() },
                Category { id: 2, name: "education".to_string() },
            ],
        };

        let response = to_response(tagged);

        assert_eq!(response.id, 7);
        assert_eq!(response.categories, vec!["war", "education"]);
        assert_eq!(response.date_created, "2024-01-02T03:04:05+00:00");
    }
}
