//! Markdown chat replies for currency lookups and news.

use chrono::{TimeZone, Utc};

use crate::api::{Currency, NewsCategory, NewsItem};

const TITLE_FALLBACK_CHARS: usize = 50;

pub fn format_token(currency: &Currency) -> String {
    format!(
        "💎 代币信息：\n**{}** ({})\n🆔 ID: {}",
        currency.full_name,
        currency.currency_name.to_uppercase(),
        currency.currency_id
    )
}

pub fn format_not_found(query: &str, suggestions: &[&Currency]) -> String {
    let mut output = format!("❌ 没有找到 \"{}\" 对应的代币信息。", query);
    if !suggestions.is_empty() {
        output.push_str("\n\n💡 您是不是想找：\n");
        for suggestion in suggestions {
            output.push_str(&format!(
                "- **{}** ({})\n",
                suggestion.full_name,
                suggestion.currency_name.to_uppercase()
            ));
        }
    }
    output
}

pub fn format_news_not_found(query: &str) -> String {
    format!("❌ 没有找到 \"{}\" 对应的代币，无法获取新闻。", query)
}

pub fn format_no_news(currency: &Currency) -> String {
    format!(
        "📰 暂时没有找到 {} ({}) 的相关新闻。",
        currency.full_name, currency.currency_name
    )
}

/// News as a Markdown table. Items without an English entry are skipped.
pub fn format_news(news: &[NewsItem], currency: &Currency) -> String {
    let rows: Vec<String> = news
        .iter()
        .filter_map(news_cells)
        .enumerate()
        .map(|(i, cells)| format!("| {} | {} |", i + 1, cells.join(" | ")))
        .collect();

    if rows.is_empty() {
        return format_no_news(currency);
    }

    let mut output = format!(
        "📈 {} ({}) 最新资讯：\n\n",
        currency.full_name,
        currency.currency_name.to_uppercase()
    );
    output.push_str("| # | 标题 | 日期 | 分类 | 作者 | 标签 | 链接 |\n");
    output.push_str("| --- | --- | --- | --- | --- | --- | --- |\n");
    for row in rows {
        output.push_str(&row);
        output.push('\n');
    }
    output
}

fn news_cells(item: &NewsItem) -> Option<[String; 6]> {
    let english = item.english()?;

    let title = english
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
        .or_else(|| {
            english
                .content
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .map(|c| format!("{}...", c.chars().take(TITLE_FALLBACK_CHARS).collect::<String>()))
        })
        .unwrap_or_else(|| "无标题".to_string());

    let author = item
        .author
        .as_deref()
        .filter(|a| !a.is_empty())
        .map(escape_cell)
        .unwrap_or_else(|| "-".to_string());

    let tags = if item.tags.is_empty() {
        "-".to_string()
    } else {
        escape_cell(&item.tags.join(", "))
    };

    let link = if item.source_link.is_empty() {
        "-".to_string()
    } else {
        format!("[查看原文]({})", item.source_link.replace(' ', "%20").replace('|', "%7C").replace(')', "%29"))
    };

    Some([
        format!("**{}**", escape_cell(&title)),
        format_date(item.release_time),
        NewsCategory::from_code(item.category).label().to_string(),
        author,
        tags,
        link,
    ])
}

fn format_date(epoch_millis: i64) -> String {
    Utc.timestamp_millis_opt(epoch_millis)
        .single()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Makes free text safe inside a single table cell.
pub fn escape_cell(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '|' | '*' | '_' | '`' | '[' | ']' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\r' => {}
            '\n' => escaped.push(' '),
            _ => escaped.push(c),
        }
    }
    escaped.trim().to_string()
}
