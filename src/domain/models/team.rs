// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 团队（租户）实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// 团队唯一标识符
    pub id: Uuid,
    /// 团队名称
    pub name: String,
    /// 订阅计划名称
    pub plan: String,
    /// 当前订阅周期结束时间
    pub plan_period_end: Option<DateTime<Utc>>,
    /// 用于知识文件上传的 API 密钥
    #[serde(skip_serializing)]
    pub openai_api_key: Option<String>,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 更新时间
    pub updated_at: DateTime<Utc>,
}

impl Team {
    /// 计算当前生效的订阅计划
    ///
    /// 付费计划在周期结束后还有一天宽限期；过期、缺少周期结束时间
    /// 或无法识别的计划一律按 FREE 处理。
    pub fn effective_plan(&self, now: DateTime<Utc>) -> SubscriptionPlan {
        let plan = self.plan.parse().unwrap_or(SubscriptionPlan::Free);
        if plan == SubscriptionPlan::Free {
            return plan;
        }

        match self.plan_period_end {
            Some(end) if end + Duration::days(1) > now => plan,
            _ => SubscriptionPlan::Free,
        }
    }

    /// 获取非空的知识库 API 密钥
    pub fn knowledge_api_key(&self) -> Option<&str> {
        self.openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// 订阅计划
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriptionPlan {
    Free,
    Web,
    ManagedWeb,
    WebAndPhone,
    ManagedWebAndPhone,
}

impl SubscriptionPlan {
    /// 计划允许的最大知识文件数
    pub fn max_files(&self) -> u64 {
        match self {
            SubscriptionPlan::Free => 1,
            SubscriptionPlan::Web => 3,
            SubscriptionPlan::ManagedWeb => 4,
            SubscriptionPlan::WebAndPhone => 6,
            SubscriptionPlan::ManagedWebAndPhone => 6,
        }
    }

    /// 计划名称
    pub fn name(&self) -> &'static str {
        match self {
            SubscriptionPlan::Free => "FREE",
            SubscriptionPlan::Web => "WEB",
            SubscriptionPlan::ManagedWeb => "MANAGED WEB",
            SubscriptionPlan::WebAndPhone => "WEB & PHONE",
            SubscriptionPlan::ManagedWebAndPhone => "MANAGED W&P",
        }
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SubscriptionPlan {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FREE" => Ok(SubscriptionPlan::Free),
            "WEB" => Ok(SubscriptionPlan::Web),
            "MANAGED WEB" => Ok(SubscriptionPlan::ManagedWeb),
            "WEB & PHONE" => Ok(SubscriptionPlan::WebAndPhone),
            "MANAGED W&P" => Ok(SubscriptionPlan::ManagedWebAndPhone),
            _ => Err(()),
        }
    }
}
