// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, html_page, seed_team, UPLOADED_FILE_ID};
use axum::http::StatusCode;
use clubconnect::domain::models::crawler::Crawler;
use clubconnect::domain::models::page::CrawlOutput;
use clubconnect::domain::repositories::crawler_repository::CrawlerRepository;
use clubconnect::domain::repositories::file_repository::FileRepository;
use clubconnect::domain::repositories::storage_repository::StorageRepository;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

/// 完整流程：爬取、存储、上传并写入文件记录
#[tokio::test]
async fn crawling_creates_knowledge_file() {
    let app = create_test_app().await;
    let base = app.site.uri();

    app.mount_page(
        "/docs",
        html_page(
            "Docs",
            "Welcome to the club",
            &[
                format!("{}/docs/courts", base),
                format!("{}/blog/news", base),
                "/docs/hours".to_string(),
                "mailto:desk@club.test".to_string(),
            ],
        ),
    )
    .await;
    app.mount_page("/docs/courts", html_page("Courts", "Six clay courts", &[]))
        .await;
    app.mount_page(
        "/docs/hours",
        html_page("Hours", "Open 7am to 10pm", &[format!("{}/docs", base)]),
    )
    .await;
    app.mount_page("/blog/news", html_page("News", "Not crawled", &[]))
        .await;
    app.mount_files_api().await;

    let crawler = app.seed_crawler(app.team_id, "/docs", "/docs", 10).await;

    let response = app
        .server
        .get(&app.crawling_path(crawler.id))
        .authorization_bearer(&app.api_key)
        .await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert!(response.text().is_empty());

    let files = app.file_repo.find_by_team(app.team_id).await.unwrap();
    assert_eq!(files.len(), 1);
    let file = &files[0];
    assert_eq!(file.crawler_id, Some(crawler.id));
    assert_eq!(file.external_file_id, UPLOADED_FILE_ID);
    assert!(file.name.starts_with("harbor-club-docs-"));
    assert!(file.name.ends_with(".json"));

    let key = format!("{}/{}", app.team_id, file.name);
    assert_eq!(file.blob_url, format!("memory://{}", key));
    let blob = app.storage.get(&key).await.unwrap().expect("blob stored");
    let output = CrawlOutput::from_json_slice(&blob).unwrap();

    let urls: Vec<String> = output.pages.iter().map(|p| p.url.clone()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/docs", base),
            format!("{}/docs/courts", base),
            format!("{}/docs/hours", base),
        ]
    );
    assert_eq!(output.pages[1].title, "Courts");
    assert!(output.pages[2].text.contains("Open 7am to 10pm"));
    assert_eq!(app.upload_requests().await, 1);
}

/// 页面预算限制整次爬取的页面数
#[tokio::test]
async fn crawling_respects_page_budget() {
    let app = create_test_app().await;
    let base = app.site.uri();

    let links: Vec<String> = (1..=4).map(|i| format!("{}/p/{}", base, i)).collect();
    app.mount_page("/p", html_page("Index", "index", &links)).await;
    for i in 1..=4 {
        app.mount_page(&format!("/p/{}", i), html_page("Leaf", "leaf", &[]))
            .await;
    }
    app.mount_files_api().await;

    let crawler = app.seed_crawler(app.team_id, "/p", "/p", 2).await;

    let response = app
        .server
        .get(&app.crawling_path(crawler.id))
        .authorization_bearer(&app.api_key)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let files = app.file_repo.find_by_team(app.team_id).await.unwrap();
    let key = format!("{}/{}", app.team_id, files[0].name);
    let blob = app.storage.get(&key).await.unwrap().unwrap();
    let output = CrawlOutput::from_json_slice(&blob).unwrap();

    assert_eq!(output.len(), 2);
    assert_eq!(app.site_requests().await, 2);
}

/// 配额用尽时返回 402 且不发出任何抓取请求
#[tokio::test]
async fn crawling_over_quota_returns_402() {
    let app = create_test_app().await;
    app.mount_page("/docs", html_page("Docs", "content", &[])).await;

    app.seed_file(app.team_id).await;
    let crawler = app.seed_crawler(app.team_id, "/docs", "/docs", 5).await;

    let response = app
        .server
        .get(&app.crawling_path(crawler.id))
        .authorization_bearer(&app.api_key)
        .await;

    assert_eq!(response.status_code(), StatusCode::PAYMENT_REQUIRED);
    assert_eq!(response.text(), "Requires Higher Plan");
    assert_eq!(app.site_requests().await, 0);
}

/// 付费计划允许更多文件
#[tokio::test]
async fn crawling_on_paid_plan_allows_more_files() {
    let app = create_test_app().await;
    app.mount_page("/docs", html_page("Docs", "content", &[])).await;
    app.mount_files_api().await;

    let (team_id, key) = seed_team(&app.db, "WEB", Some("sk-web")).await;
    app.seed_file(team_id).await;
    app.seed_file(team_id).await;
    let crawler = app.seed_crawler(team_id, "/docs", "/docs", 5).await;

    let response = app
        .server
        .get(&app.crawling_path(crawler.id))
        .authorization_bearer(&key)
        .await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(app.file_repo.count_by_team(team_id).await.unwrap(), 3);
}

/// 其他团队的爬虫配置返回 403
#[tokio::test]
async fn crawling_other_teams_crawler_returns_403() {
    let app = create_test_app().await;
    let (other_team, _) = seed_team(&app.db, "FREE", Some("sk-other")).await;
    let crawler = app.seed_crawler(other_team, "/docs", "/docs", 5).await;

    let response = app
        .server
        .get(&app.crawling_path(crawler.id))
        .authorization_bearer(&app.api_key)
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(app.site_requests().await, 0);
}

/// 未知爬虫返回 404
#[tokio::test]
async fn crawling_unknown_crawler_returns_404() {
    let app = create_test_app().await;

    let response = app
        .server
        .get(&app.crawling_path(Uuid::new_v4()))
        .authorization_bearer(&app.api_key)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

/// 非 UUID 的爬虫ID返回 422
#[tokio::test]
async fn crawling_malformed_id_returns_422() {
    let app = create_test_app().await;

    let response = app
        .server
        .get(&app.crawling_path("not-a-uuid"))
        .authorization_bearer(&app.api_key)
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("invalid crawler id"));
}

/// 缺少认证返回 401
#[tokio::test]
async fn crawling_without_auth_returns_401() {
    let app = create_test_app().await;
    let crawler = app.seed_crawler(app.team_id, "/docs", "/docs", 5).await;

    let response = app.server.get(&app.crawling_path(crawler.id)).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .get(&app.crawling_path(crawler.id))
        .authorization_bearer("cc-unknown")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

/// 团队未配置 OpenAI 密钥返回 400
#[tokio::test]
async fn crawling_without_openai_key_returns_400() {
    let app = create_test_app().await;
    let (team_id, key) = seed_team(&app.db, "FREE", None).await;
    let crawler = app.seed_crawler(team_id, "/docs", "/docs", 5).await;

    let response = app
        .server
        .get(&app.crawling_path(crawler.id))
        .authorization_bearer(&key)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "Missing OpenAI API key");
    assert_eq!(app.site_requests().await, 0);
}

/// 没有文本内容时返回 500，不写入任何东西
#[tokio::test]
async fn crawling_empty_content_returns_500() {
    let app = create_test_app().await;
    app.mount_page("/docs", "<html><body>   </body></html>".to_string())
        .await;
    app.mount_files_api().await;
    let crawler = app.seed_crawler(app.team_id, "/docs", "/docs", 5).await;

    let response = app
        .server
        .get(&app.crawling_path(crawler.id))
        .authorization_bearer(&app.api_key)
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.file_repo.count_by_team(app.team_id).await.unwrap(), 0);
    assert!(app.storage.is_empty().await);
    assert_eq!(app.upload_requests().await, 0);
}

/// 页面有文本但选择器没有命中时同样视为没有内容
#[tokio::test]
async fn crawling_selector_without_matches_returns_500() {
    let app = create_test_app().await;
    app.mount_page("/docs", html_page("Docs", "Court hours are 7am to 10pm", &[]))
        .await;
    app.mount_files_api().await;

    let mut crawler = Crawler::new(
        app.team_id,
        "Harbor Club Docs",
        format!("{}/docs", app.site.uri()),
        "/docs",
    );
    crawler.selector = "article".to_string();
    let crawler = app.crawler_repo.create(&crawler).await.unwrap();

    let response = app
        .server
        .get(&app.crawling_path(crawler.id))
        .authorization_bearer(&app.api_key)
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.site_requests().await, 1);
    assert_eq!(app.file_repo.count_by_team(app.team_id).await.unwrap(), 0);
    assert!(app.storage.is_empty().await);
    assert_eq!(app.upload_requests().await, 0);
}

/// 无法解析的选择器返回 500，且不发出任何抓取请求
#[tokio::test]
async fn crawling_unparseable_selector_returns_500() {
    let app = create_test_app().await;
    app.mount_page("/docs", html_page("Docs", "Court hours", &[]))
        .await;

    let mut crawler = Crawler::new(
        app.team_id,
        "Harbor Club Docs",
        format!("{}/docs", app.site.uri()),
        "/docs",
    );
    crawler.selector = "div[".to_string();
    let crawler = app.crawler_repo.create(&crawler).await.unwrap();

    let response = app
        .server
        .get(&app.crawling_path(crawler.id))
        .authorization_bearer(&app.api_key)
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.site_requests().await, 0);
    assert_eq!(app.file_repo.count_by_team(app.team_id).await.unwrap(), 0);
}

/// 所有页面都抓取失败等同于没有内容
#[tokio::test]
async fn crawling_unreachable_site_returns_500() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.site)
        .await;
    let crawler = app.seed_crawler(app.team_id, "/docs", "/docs", 5).await;

    let response = app
        .server
        .get(&app.crawling_path(crawler.id))
        .authorization_bearer(&app.api_key)
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.file_repo.count_by_team(app.team_id).await.unwrap(), 0);
}

/// 文件上传失败时不写入文件记录
#[tokio::test]
async fn crawling_upload_failure_returns_500() {
    let app = create_test_app().await;
    app.mount_page("/docs", html_page("Docs", "content", &[])).await;
    Mock::given(method("POST"))
        .and(path("/v1/files"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&app.files_api)
        .await;
    let crawler = app.seed_crawler(app.team_id, "/docs", "/docs", 5).await;

    let response = app
        .server
        .get(&app.crawling_path(crawler.id))
        .authorization_bearer(&app.api_key)
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.file_repo.count_by_team(app.team_id).await.unwrap(), 0);
}
