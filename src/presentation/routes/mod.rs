// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::crawling_use_case::CrawlingUseCase;
use crate::domain::repositories::{
    crawler_repository::CrawlerRepository, file_repository::FileRepository,
    team_repository::TeamRepository,
};
use crate::presentation::handlers::crawling_handler;
use crate::presentation::middleware::auth_middleware::{auth_middleware, AuthState};
use axum::{extract::Extension, middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 参数
///
/// * `use_case` - 爬取用例
/// * `auth_state` - 认证中间件状态
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes<CR, FR, TR>(
    use_case: Arc<CrawlingUseCase<CR, FR, TR>>,
    auth_state: AuthState,
) -> Router
where
    CR: CrawlerRepository + 'static,
    FR: FileRepository + 'static,
    TR: TeamRepository + 'static,
{
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let protected_routes = Router::new()
        .route(
            "/api/crawlers/{crawler_id}/crawling",
            get(crawling_handler::start_crawling::<CR, FR, TR>),
        )
        .route_layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .layer(Extension(use_case));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
