// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use chrono::Utc;
use clubconnect::application::use_cases::crawling_use_case::CrawlingUseCase;
use clubconnect::config::settings::{CrawlerSettings, DatabaseSettings, FetchMode, KnowledgeSettings};
use clubconnect::domain::models::crawler::Crawler;
use clubconnect::domain::models::knowledge_file::KnowledgeFile;
use clubconnect::domain::repositories::crawler_repository::CrawlerRepository;
use clubconnect::domain::repositories::file_repository::FileRepository;
use clubconnect::engines::create_fetcher;
use clubconnect::infrastructure::database::connection;
use clubconnect::infrastructure::database::entities::{api_key, team};
use clubconnect::infrastructure::repositories::crawler_repo_impl::CrawlerRepositoryImpl;
use clubconnect::infrastructure::repositories::file_repo_impl::FileRepositoryImpl;
use clubconnect::infrastructure::repositories::team_repo_impl::TeamRepositoryImpl;
use clubconnect::infrastructure::services::openai_file_service::OpenAiFileService;
use clubconnect::infrastructure::storage::InMemoryStorage;
use clubconnect::presentation::middleware::auth_middleware::AuthState;
use clubconnect::presentation::routes;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::sync::Arc;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 测试用的 OpenAI 文件ID
pub const UPLOADED_FILE_ID: &str = "file-test-123";

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<DatabaseConnection>,
    pub storage: Arc<InMemoryStorage>,
    pub file_repo: Arc<FileRepositoryImpl>,
    pub crawler_repo: Arc<CrawlerRepositoryImpl>,
    /// 被爬取的网站
    pub site: MockServer,
    /// 文件上传 API
    pub files_api: MockServer,
    /// 默认团队（FREE 计划，已配置 OpenAI 密钥）
    pub team_id: Uuid,
    pub api_key: String,
}

pub async fn create_test_app() -> TestApp {
    let db = connection::connect_and_migrate(&DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: Some(1),
        min_connections: Some(1),
        connect_timeout: None,
        idle_timeout: None,
    })
    .await
    .expect("Failed to set up test database");
    let db = Arc::new(db);

    let site = MockServer::start().await;
    let files_api = MockServer::start().await;

    let crawler_repo = Arc::new(CrawlerRepositoryImpl::new(db.clone()));
    let file_repo = Arc::new(FileRepositoryImpl::new(db.clone()));
    let team_repo = Arc::new(TeamRepositoryImpl::new(db.clone()));
    let storage = Arc::new(InMemoryStorage::new());

    // The mock site listens on loopback
    let fetcher = create_fetcher(&CrawlerSettings {
        fetch_mode: FetchMode::Direct,
        reader_base_url: "https://r.jina.ai".to_string(),
        reader_api_key: None,
        user_agent: "clubconnect-integration".to_string(),
        request_timeout_secs: 5,
        allow_private_hosts: true,
    })
    .expect("Failed to create fetcher");

    let registry = Arc::new(
        OpenAiFileService::new(&KnowledgeSettings {
            api_base_url: format!("{}/v1", files_api.uri()),
        })
        .expect("Failed to create file service"),
    );

    let use_case = Arc::new(CrawlingUseCase::new(
        crawler_repo.clone(),
        file_repo.clone(),
        team_repo,
        fetcher,
        storage.clone(),
        registry,
    ));

    let app = routes::routes(use_case, AuthState { db: db.clone() });
    let server = TestServer::new(app).expect("Failed to start test server");

    let (team_id, api_key) = seed_team(&db, "FREE", Some("sk-test")).await;

    TestApp {
        server,
        db,
        storage,
        file_repo,
        crawler_repo,
        site,
        files_api,
        team_id,
        api_key,
    }
}

/// 创建团队及其 API 密钥
pub async fn seed_team(
    db: &DatabaseConnection,
    plan: &str,
    openai_api_key: Option<&str>,
) -> (Uuid, String) {
    let team_id = Uuid::new_v4();
    let key = format!("cc-{}", Uuid::new_v4());

    team::ActiveModel {
        id: Set(team_id),
        name: Set(format!("team-{}", team_id)),
        plan: Set(plan.to_string()),
        plan_period_end: Set(Some((Utc::now() + chrono::Duration::days(30)).into())),
        openai_api_key: Set(openai_api_key.map(str::to_string)),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await
    .expect("Failed to insert team");

    api_key::ActiveModel {
        id: Set(Uuid::new_v4()),
        team_id: Set(team_id),
        key: Set(key.clone()),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await
    .expect("Failed to insert api key");

    (team_id, key)
}

impl TestApp {
    /// 保存一个指向模拟站点的爬虫配置
    pub async fn seed_crawler(
        &self,
        team_id: Uuid,
        seed_path: &str,
        url_match: &str,
        max_pages: i32,
    ) -> Crawler {
        let mut crawler = Crawler::new(
            team_id,
            "Harbor Club Docs",
            format!("{}{}", self.site.uri(), seed_path),
            url_match,
        );
        crawler.max_pages_to_crawl = max_pages;
        self.crawler_repo
            .create(&crawler)
            .await
            .expect("Failed to insert crawler")
    }

    /// 写入一条已有的知识文件记录（用于配额测试）
    pub async fn seed_file(&self, team_id: Uuid) -> KnowledgeFile {
        let file = KnowledgeFile {
            id: Uuid::new_v4(),
            team_id,
            crawler_id: None,
            name: "existing.json".to_string(),
            blob_url: "memory://existing.json".to_string(),
            external_file_id: "file-existing".to_string(),
            created_at: Utc::now(),
        };
        self.file_repo
            .create(&file)
            .await
            .expect("Failed to insert file")
    }

    /// 在模拟站点上挂载一个 HTML 页面
    pub async fn mount_page(&self, page_path: &str, html: String) {
        Mock::given(method("GET"))
            .and(path(page_path))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(html, "text/html; charset=utf-8"),
            )
            .mount(&self.site)
            .await;
    }

    /// 挂载文件上传 API 的成功响应
    pub async fn mount_files_api(&self) {
        Mock::given(method("POST"))
            .and(path("/v1/files"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": UPLOADED_FILE_ID,
                "object": "file",
                "purpose": "assistants"
            })))
            .mount(&self.files_api)
            .await;
    }

    pub async fn site_requests(&self) -> usize {
        self.site
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or(0)
    }

    pub async fn upload_requests(&self) -> usize {
        self.files_api
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or(0)
    }

    pub fn crawling_path(&self, crawler_id: impl std::fmt::Display) -> String {
        format!("/api/crawlers/{}/crawling", crawler_id)
    }
}

/// 生成带标题、正文和链接的页面
pub fn html_page(title: &str, body: &str, links: &[String]) -> String {
    let anchors: String = links
        .iter()
        .map(|l| format!(r#"<li><a href="{}">{}</a></li>"#, l, l))
        .collect();
    format!(
        "<html><head><title>{}</title></head><body><main>{}</main><ul>{}</ul></body></html>",
        title, body, anchors
    )
}
