//! Keyword gates deciding whether a message should trigger an action.

use lazy_static::lazy_static;
use regex::Regex;

const SEARCH_KEYWORDS: &[&str] = &[
    "id", "标识", "查询", "搜索", "找", "lookup", "search", "find", "bitcoin", "btc", "ethereum", "eth", "solana",
    "sol", "dogecoin", "doge",
];

const NEWS_KEYWORDS: &[&str] = &[
    "新闻", "资讯", "消息", "动态", "最新", "news", "update", "latest", "what", "how", "怎么样", "如何", "什么",
    "最新情况",
];

const TOKEN_KEYWORDS: &[&str] = &[
    "bitcoin", "btc", "ethereum", "eth", "solana", "sol", "dogecoin", "doge", "ada", "cardano", "dot", "polkadot",
    "bnb", "binance", "usdt", "tether",
];

lazy_static! {
    static ref SYMBOL_LIKE: Regex = Regex::new(r"(?i)[a-z]{2,10}").unwrap();
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Token ID lookup: a search keyword or anything that looks like a symbol.
pub fn is_search_intent(text: &str) -> bool {
    let text = text.to_lowercase();
    contains_any(&text, SEARCH_KEYWORDS) || SYMBOL_LIKE.is_match(&text)
}

/// News request: a news keyword or a well-known token name.
pub fn is_news_intent(text: &str) -> bool {
    let text = text.to_lowercase();
    contains_any(&text, NEWS_KEYWORDS) || contains_any(&text, TOKEN_KEYWORDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_intent_accepts_symbols_and_keywords() {
        assert!(is_search_intent("Bitcoin 的代币ID是多少？"));
        assert!(is_search_intent("查询"));
        assert!(is_search_intent("PEPE"));
        assert!(!is_search_intent("你好"));
        assert!(!is_search_intent("123 ?"));
    }

    #[test]
    fn news_intent_needs_news_word_or_known_token() {
        assert!(is_news_intent("Bitcoin 有什么最新新闻？"));
        assert!(is_news_intent("SOL 最近怎么样？"));
        assert!(is_news_intent("Any update on cardano"));
        assert!(!is_news_intent("你好"));
        assert!(!is_news_intent("PEPE"));
    }
}
