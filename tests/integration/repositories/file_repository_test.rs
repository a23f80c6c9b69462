// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{create_test_app, seed_team};
use clubconnect::domain::repositories::crawler_repository::CrawlerRepository;
use clubconnect::domain::repositories::file_repository::FileRepository;
use uuid::Uuid;

#[tokio::test]
async fn file_count_is_scoped_to_team() {
    let app = create_test_app().await;
    let (other_team, _) = seed_team(&app.db, "WEB", None).await;

    app.seed_file(app.team_id).await;
    app.seed_file(other_team).await;
    app.seed_file(other_team).await;

    assert_eq!(app.file_repo.count_by_team(app.team_id).await.unwrap(), 1);
    assert_eq!(app.file_repo.count_by_team(other_team).await.unwrap(), 2);
    assert_eq!(app.file_repo.count_by_team(Uuid::new_v4()).await.unwrap(), 0);
}

#[tokio::test]
async fn crawler_round_trips_through_database() {
    let app = create_test_app().await;
    let crawler = app.seed_crawler(app.team_id, "/a,/b", "/", 7).await;

    let loaded = app
        .crawler_repo
        .find_by_id(crawler.id)
        .await
        .unwrap()
        .expect("crawler exists");

    assert_eq!(loaded.team_id, app.team_id);
    assert_eq!(loaded.crawl_url, crawler.crawl_url);
    assert_eq!(loaded.selector, "body");
    assert_eq!(loaded.max_pages_to_crawl, 7);
    assert!(app
        .crawler_repo
        .find_by_id(Uuid::new_v4())
        .await
        .unwrap()
        .is_none());
}
