// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::EngineError;
use std::net::IpAddr;
use tokio::net::lookup_host;
use url::Url;

/// 校验 URL 是否为 http(s) 地址并返回解析结果
pub fn parse_http_url(url_str: &str) -> Result<Url, EngineError> {
    let url = Url::parse(url_str)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(EngineError::Blocked(format!(
            "unsupported scheme: {}",
            other
        ))),
    }
}

/// 验证 URL 是否安全 (防止 SSRF)
///
/// 检查解析后的 IP 是否为私有地址或环回地址
pub async fn validate_url(url_str: &str) -> Result<Url, EngineError> {
    let url = parse_http_url(url_str)?;
    let host = url
        .host_str()
        .ok_or_else(|| EngineError::Blocked("missing host".to_string()))?;

    // 如果是 localhost，直接拒绝
    if host == "localhost" {
        return Err(EngineError::Blocked("localhost is not allowed".to_string()));
    }

    // IPv6 字面量在 host_str 中带方括号
    let host = host.trim_start_matches('[').trim_end_matches(']');
    let port = url.port_or_known_default().unwrap_or(80);

    let addrs = lookup_host((host, port))
        .await
        .map_err(|e| EngineError::Other(format!("DNS lookup failed for {}: {}", host, e)))?;

    // 检查所有解析出的 IP
    for addr in addrs {
        if is_private_ip(addr.ip()) {
            return Err(EngineError::Blocked(format!(
                "private IP access is not allowed: {}",
                addr.ip()
            )));
        }
    }

    Ok(url)
}

fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => {
            ipv4.is_private()
                || ipv4.is_loopback()
                || ipv4.is_link_local()
                || ipv4.is_multicast()
                || ipv4.is_unspecified()
        }
        IpAddr::V6(ipv6) => {
            // Unique Local Address (fc00::/7), Link-local (fe80::/10)
            ipv6.is_loopback()
                || ipv6.is_multicast()
                || ipv6.is_unspecified()
                || (ipv6.segments()[0] & 0xfe00) == 0xfc00
                || (ipv6.segments()[0] & 0xffc0) == 0xfe80
        }
    }
}
