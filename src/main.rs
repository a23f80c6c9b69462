// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clubconnect::application::use_cases::crawling_use_case::CrawlingUseCase;
use clubconnect::config::settings::Settings;
use clubconnect::engines::create_fetcher;
use clubconnect::infrastructure::database::connection;
use clubconnect::infrastructure::repositories::crawler_repo_impl::CrawlerRepositoryImpl;
use clubconnect::infrastructure::repositories::file_repo_impl::FileRepositoryImpl;
use clubconnect::infrastructure::repositories::team_repo_impl::TeamRepositoryImpl;
use clubconnect::infrastructure::services::openai_file_service::OpenAiFileService;
use clubconnect::infrastructure::storage::create_storage_repository;
use clubconnect::presentation::middleware::auth_middleware::AuthState;
use clubconnect::presentation::routes;
use clubconnect::utils::telemetry;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting clubconnect...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // Initialize Prometheus Metrics
    clubconnect::infrastructure::metrics::init_metrics(&settings.metrics);

    // 3. Connect to database and run migrations
    let db = Arc::new(connection::connect_and_migrate(&settings.database).await?);
    info!("Database connection established");

    // 4. Initialize Components
    let crawler_repo = Arc::new(CrawlerRepositoryImpl::new(db.clone()));
    let file_repo = Arc::new(FileRepositoryImpl::new(db.clone()));
    let team_repo = Arc::new(TeamRepositoryImpl::new(db.clone()));

    let storage = create_storage_repository(&settings.storage).await?;
    info!(storage_type = %settings.storage.storage_type, "Blob storage initialized");

    let fetcher = create_fetcher(&settings.crawler)?;
    info!(engine = fetcher.name(), "Content fetcher initialized");

    let registry = Arc::new(OpenAiFileService::new(&settings.knowledge)?);

    let use_case = Arc::new(CrawlingUseCase::new(
        crawler_repo,
        file_repo,
        team_repo,
        fetcher,
        storage,
        registry,
    ));

    // 5. Start HTTP server
    let mut app = routes::routes(use_case, AuthState { db: db.clone() });
    if settings.storage.storage_type == "local" {
        let path = settings
            .storage
            .local_path
            .clone()
            .unwrap_or_else(|| "./storage".to_string());
        app = app.nest_service("/blobs", ServeDir::new(path));
    }

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
