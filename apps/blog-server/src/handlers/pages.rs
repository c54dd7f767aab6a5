//! Public read views: home, published post list, post detail.

use actix_web::{HttpRequest, HttpResponse, web};
use blog_core::domain::Post;
use blog_shared::{PostDetail, PostSummary};
use chrono::Utc;
use tera::Context;

use crate::middleware::error::{AppError, AppResult};
use crate::render::{HOME, POST_DETAIL, POST_LIST};
use crate::state::AppState;

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn summary(post: Post) -> PostSummary {
    PostSummary {
        id: post.id,
        title: post.title,
        content: post.content,
        published_date: post.published_date,
    }
}

/// GET /
pub async fn home(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let body = state.renderer.render(HOME, &Context::new())?;
    Ok(html(body))
}

/// GET /posts/
pub async fn post_list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let now = Utc::now();
    let posts: Vec<PostSummary> = state
        .store
        .list_published(now)
        .await?
        .into_iter()
        .map(summary)
        .collect();

    tracing::debug!(count = posts.len(), "Rendering published posts");

    let mut context = Context::new();
    context.insert("posts", &posts);
    let body = state.renderer.render(POST_LIST, &context)?;
    Ok(html(body))
}

/// GET /post/{id}/
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = state.store.get(post_id).await?;
    let author = state.store.author_of(&post).await?;

    let detail = PostDetail {
        author: author.display_name().to_owned(),
        title: post.title,
        content: post.content,
        published_date: post.published_date,
    };

    let mut context = Context::new();
    context.insert("post", &detail);
    let body = state.renderer.render(POST_DETAIL, &context)?;
    Ok(html(body))
}

/// Fallback for paths without a route.
pub async fn not_found(req: HttpRequest) -> AppResult<HttpResponse> {
    Err(AppError::NotFound(format!("no such page: {}", req.path())))
}
