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

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::use_cases::crawling_use_case::{CrawlingUseCase, CrawlingUseCaseError},
    domain::repositories::{
        crawler_repository::CrawlerRepository, file_repository::FileRepository,
        team_repository::TeamRepository,
    },
};

/// 按已保存的爬虫配置执行爬取并生成知识文件
///
/// 成功返回 204 且没有响应体
pub async fn start_crawling<CR, FR, TR>(
    Extension(use_case): Extension<Arc<CrawlingUseCase<CR, FR, TR>>>,
    Extension(team_id): Extension<Uuid>,
    Path(crawler_id): Path<String>,
) -> Response
where
    CR: CrawlerRepository + 'static,
    FR: FileRepository + 'static,
    TR: TeamRepository + 'static,
{
    let crawler_id = match Uuid::parse_str(&crawler_id) {
        Ok(id) => id,
        Err(e) => {
            return CrawlingUseCaseError::Validation(format!("invalid crawler id: {}", e))
                .into_response()
        }
    };

    match use_case.run(team_id, crawler_id).await {
        Ok(file) => {
            info!(%team_id, %crawler_id, file = %file.name, "Crawl completed");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            let status = StatusCode::from(&e);
            if status.is_server_error() {
                error!(%team_id, %crawler_id, error = %e, "Crawl failed");
            } else {
                warn!(%team_id, %crawler_id, error = %e, "Crawl rejected");
            }
            e.into_response()
        }
    }
}
