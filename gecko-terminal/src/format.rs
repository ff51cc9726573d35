//! Markdown report for a GeckoTerminal token.

use chrono::{DateTime, Utc};

use crate::gecko::{HolderDistribution, LaunchpadDetails, TokenInfo};

const NOT_AVAILABLE: &str = "N/A";
const NONE: &str = "无";

pub fn format_token_info(info: &TokenInfo) -> String {
    let mut lines = vec!["💎 **代币详细信息**".to_string(), String::new()];

    lines.push("**基本信息:**".to_string());
    lines.push(format!("🏷️ 名称: {}", text_or(info.name.as_deref(), NOT_AVAILABLE)));
    lines.push(format!("🔤 符号: {}", text_or(info.symbol.as_deref(), NOT_AVAILABLE)));
    lines.push(format!("📍 地址: `{}`", text_or(Some(info.address.as_str()), NOT_AVAILABLE)));
    lines.push(format!("🔢 精度: {}", info.decimals.map_or(NOT_AVAILABLE.to_string(), |d| d.to_string())));
    lines.push(String::new());

    let details = info.gt_score_details.clone().unwrap_or_default();
    lines.push("**评分指标:**".to_string());
    lines.push(format!("⭐ GT评分: {}", info.gt_score.map_or(NOT_AVAILABLE.to_string(), |s| format!("{:.2}", s))));
    lines.push("📊 评分详情:".to_string());
    lines.push(format!("  • 流动性: {}", number(details.pool)));
    lines.push(format!("  • 交易: {}", number(details.transaction)));
    lines.push(format!("  • 创建: {}", number(details.creation)));
    lines.push(format!("  • 信息: {}", number(details.info)));
    lines.push(String::new());

    let holders = info.holders.clone().unwrap_or_default();
    let distribution: HolderDistribution = holders.distribution_percentage.unwrap_or_default();
    lines.push("**持有者信息:**".to_string());
    lines.push(format!(
        "👥 持有者数量: {}",
        holders.count.map_or(NOT_AVAILABLE.to_string(), group_thousands)
    ));
    lines.push("📈 分布情况:".to_string());
    lines.push(format!("  • 前10%: {}", percent(distribution.top_10)));
    lines.push(format!("  • 11-20%: {}", percent(distribution.from_11_to_20)));
    lines.push(format!("  • 21-40%: {}", percent(distribution.from_21_to_40)));
    lines.push(format!("  • 其他: {}", percent(distribution.rest)));
    lines.push(String::new());

    lines.push("**安全设置:**".to_string());
    lines.push(format!("🔒 Mint权限: {}", info.mint_authority));
    lines.push(format!("🧊 Freeze权限: {}", info.freeze_authority));
    lines.push(format!("🚨 蜜罐检测: {}", info.is_honeypot));
    lines.push(String::new());

    lines.push("**分类标签:**".to_string());
    if info.categories.is_empty() {
        lines.push("📂 无分类".to_string());
    } else {
        lines.push(format!("📂 {}", info.categories.join(", ")));
    }
    lines.push(String::new());

    if let Some(launchpad) = &info.launchpad_details {
        lines.extend(launchpad_lines(launchpad));
        lines.push(String::new());
    }

    lines.push("**社交媒体:**".to_string());
    lines.push(format!("💬 Discord: {}", text_or(info.discord_url.as_deref(), NONE)));
    lines.push(format!("📱 Telegram: {}", text_or(info.telegram_handle.as_deref(), NONE)));
    lines.push(format!("🐦 Twitter: {}", text_or(info.twitter_handle.as_deref(), NONE)));
    lines.push(String::new());

    lines.push(format!("📝 描述: {}", text_or(info.description.as_deref(), NONE)));

    lines.join("\n")
}

fn launchpad_lines(launchpad: &LaunchpadDetails) -> Vec<String> {
    let completed = launchpad.completed.unwrap_or(false);
    let mut lines = vec![
        "**启动台信息:**".to_string(),
        format!("🎓 毕业进度: {}", percent(launchpad.graduation_percentage)),
        format!("✅ 已完成: {}", if completed { "是" } else { "否" }),
    ];
    if completed {
        let at = launchpad
            .completed_at
            .as_deref()
            .map(format_timestamp)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        lines.push(format!("📅 完成时间: {}", at));
    }
    if let Some(pool) = launchpad
        .migrated_destination_pool_address
        .as_deref()
        .filter(|p| !p.is_empty())
    {
        lines.push(format!("🔀 迁移池: `{}`", pool));
    }
    lines
}

fn text_or<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(placeholder)
}

fn number(value: Option<f64>) -> String {
    value.map_or(NOT_AVAILABLE.to_string(), |v| v.to_string())
}

fn percent(value: Option<f64>) -> String {
    value.map_or(NOT_AVAILABLE.to_string(), |v| format!("{}%", v))
}

fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gecko::{GtScoreDetails, Holders, TriState};

    fn wrapped_sol() -> TokenInfo {
        TokenInfo {
            address: "So11111111111111111111111111111111111111112".to_string(),
            name: Some("Wrapped SOL".to_string()),
            symbol: Some("SOL".to_string()),
            decimals: Some(9),
            gt_score: Some(92.6606),
            gt_score_details: Some(GtScoreDetails {
                pool: Some(87.5),
                transaction: Some(100.0),
                creation: Some(50.0),
                info: Some(60.0),
            }),
            holders: Some(Holders {
                count: Some(1_234_567),
                distribution_percentage: Some(HolderDistribution {
                    top_10: Some(45.25),
                    from_11_to_20: Some(6.1),
                    from_21_to_40: Some(5.5),
                    rest: Some(43.15),
                }),
                last_updated: None,
            }),
            categories: vec!["Solana Ecosystem".to_string()],
            mint_authority: TriState::No,
            freeze_authority: TriState::No,
            is_honeypot: TriState::Unknown,
            twitter_handle: Some("solana".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn report_sections() {
        let text = format_token_info(&wrapped_sol());
        assert!(text.starts_with("💎 **代币详细信息**"));
        assert!(text.contains("🏷️ 名称: Wrapped SOL"));
        assert!(text.contains("📍 地址: `So11111111111111111111111111111111111111112`"));
        assert!(text.contains("⭐ GT评分: 92.66"));
        assert!(text.contains("  • 流动性: 87.5"));
        assert!(text.contains("  • 交易: 100"));
        assert!(text.contains("👥 持有者数量: 1,234,567"));
        assert!(text.contains("  • 前10%: 45.25%"));
        assert!(text.contains("🔒 Mint权限: 否"));
        assert!(text.contains("🚨 蜜罐检测: 未知"));
        assert!(text.contains("📂 Solana Ecosystem"));
        assert!(text.contains("💬 Discord: 无"));
        assert!(text.contains("🐦 Twitter: solana"));
        assert!(text.ends_with("📝 描述: 无"));
        assert!(!text.contains("启动台信息"));
    }

    #[test]
    fn missing_numbers_use_placeholder() {
        let text = format_token_info(&TokenInfo::default());
        assert!(text.contains("🔢 精度: N/A"));
        assert!(text.contains("⭐ GT评分: N/A"));
        assert!(text.contains("👥 持有者数量: N/A"));
        assert!(text.contains("  • 其他: N/A"));
        assert!(text.contains("📂 无分类"));
    }

    #[test]
    fn completed_launchpad_shows_completion_time() {
        let info = TokenInfo {
            launchpad_details: Some(LaunchpadDetails {
                graduation_percentage: Some(100.0),
                completed: Some(true),
                completed_at: Some("2024-10-25T08:30:00Z".to_string()),
                migrated_destination_pool_address: None,
            }),
            ..wrapped_sol()
        };
        let text = format_token_info(&info);
        assert!(text.contains("🎓 毕业进度: 100%"));
        assert!(text.contains("✅ 已完成: 是"));
        assert!(text.contains("📅 完成时间: 2024-10-25 08:30:00 UTC"));
    }

    #[test]
    fn pending_launchpad_has_no_completion_time() {
        let info = TokenInfo {
            launchpad_details: Some(LaunchpadDetails {
                graduation_percentage: Some(42.5),
                completed: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        };
        let text = format_token_info(&info);
        assert!(text.contains("✅ 已完成: 否"));
        assert!(!text.contains("完成时间"));
    }
}
