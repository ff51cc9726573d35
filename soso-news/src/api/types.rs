use common::de::{lenient_u64, null_default, string_list, string_or_number};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    #[serde(deserialize_with = "string_or_number")]
    pub currency_id: String,
    /// Ticker-like short name, e.g. `btc`.
    pub currency_name: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatchedCurrency {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalizedContent {
    #[serde(default, deserialize_with = "null_default")]
    pub language: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub source_link: String,
    /// Epoch milliseconds.
    #[serde(default, deserialize_with = "null_default")]
    pub release_time: i64,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub category: i64,
    #[serde(default)]
    pub feature_image: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub matched_currencies: Vec<MatchedCurrency>,
    #[serde(default, deserialize_with = "string_list")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub multilanguage_content: Vec<LocalizedContent>,
}

impl NewsItem {
    pub fn english(&self) -> Option<&LocalizedContent> {
        self.multilanguage_content.iter().find(|c| c.language == "en")
    }
}

/// Closed category table used by the news feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsCategory {
    News,
    Research,
    Institution,
    Insights,
    MacroNews,
    MacroResearch,
    Tweet,
    PriceAlert,
    OnChain,
    Other,
}

impl NewsCategory {
    pub const DEFAULT_FILTER: &'static str = "1,2,3,4,5,6,7,9,10";

    pub fn from_code(code: i64) -> Self {
        match code {
            1 => NewsCategory::News,
            2 => NewsCategory::Research,
            3 => NewsCategory::Institution,
            4 => NewsCategory::Insights,
            5 => NewsCategory::MacroNews,
            6 => NewsCategory::MacroResearch,
            7 => NewsCategory::Tweet,
            9 => NewsCategory::PriceAlert,
            10 => NewsCategory::OnChain,
            _ => NewsCategory::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NewsCategory::News => "新闻",
            NewsCategory::Research => "研究报告",
            NewsCategory::Institution => "机构动态",
            NewsCategory::Insights => "市场洞察",
            NewsCategory::MacroNews => "宏观新闻",
            NewsCategory::MacroResearch => "宏观研究",
            NewsCategory::Tweet => "官方推文",
            NewsCategory::PriceAlert => "价格预警",
            NewsCategory::OnChain => "链上数据",
            NewsCategory::Other => "其他",
        }
    }
}

/// `{code, msg, data}` wrapper returned by every SoSoValue endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPage {
    #[serde(default)]
    pub list: Vec<NewsItem>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub page_num: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub page_size: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_pages: Option<u64>,
}
