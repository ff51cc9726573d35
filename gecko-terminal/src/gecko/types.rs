use std::fmt;

use common::de::{lenient_f64, lenient_u64, string_list};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct TokenInfoResponse {
    pub data: TokenData,
}

#[derive(Debug, Deserialize)]
pub struct TokenData {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub attributes: TokenInfo,
}

/// Security flag reported by GeckoTerminal as `"yes"`, `"no"` or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriState {
    Yes,
    No,
    #[default]
    Unknown,
}

impl TriState {
    pub fn label(self) -> &'static str {
        match self {
            TriState::Yes => "是",
            TriState::No => "否",
            TriState::Unknown => "未知",
        }
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for TriState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(true) => TriState::Yes,
            Value::Bool(false) => TriState::No,
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "yes" | "true" => TriState::Yes,
                "no" | "false" => TriState::No,
                _ => TriState::Unknown,
            },
            _ => TriState::Unknown,
        })
    }
}

impl Serialize for TriState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            TriState::Yes => serializer.serialize_str("yes"),
            TriState::No => serializer.serialize_str("no"),
            TriState::Unknown => serializer.serialize_none(),
        }
    }
}

/// GT score components, each 0-100.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GtScoreDetails {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pool: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub transaction: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub creation: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub info: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HolderDistribution {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub top_10: Option<f64>,
    #[serde(rename = "11_20", default, deserialize_with = "lenient_f64")]
    pub from_11_to_20: Option<f64>,
    #[serde(rename = "21_40", default, deserialize_with = "lenient_f64")]
    pub from_21_to_40: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rest: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Holders {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub count: Option<u64>,
    #[serde(default)]
    pub distribution_percentage: Option<HolderDistribution>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LaunchpadDetails {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub graduation_percentage: Option<f64>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub migrated_destination_pool_address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TokenInfo {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub decimals: Option<u64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub coingecko_coin_id: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub websites: Vec<String>,
    #[serde(default)]
    pub discord_url: Option<String>,
    #[serde(default)]
    pub telegram_handle: Option<String>,
    #[serde(default)]
    pub twitter_handle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub gt_score: Option<f64>,
    #[serde(default)]
    pub gt_score_details: Option<GtScoreDetails>,
    #[serde(default, deserialize_with = "string_list")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub gt_category_ids: Vec<String>,
    #[serde(default)]
    pub holders: Option<Holders>,
    #[serde(default)]
    pub mint_authority: TriState,
    #[serde(default)]
    pub freeze_authority: TriState,
    #[serde(default)]
    pub is_honeypot: TriState,
    #[serde(default)]
    pub launchpad_details: Option<LaunchpadDetails>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tri_state_accepts_strings_bools_and_null() {
        let parse = |v: Value| serde_json::from_value::<TriState>(v).unwrap();
        assert_eq!(parse(json!("yes")), TriState::Yes);
        assert_eq!(parse(json!("NO")), TriState::No);
        assert_eq!(parse(json!(true)), TriState::Yes);
        assert_eq!(parse(json!(false)), TriState::No);
        assert_eq!(parse(json!(null)), TriState::Unknown);
        assert_eq!(parse(json!("maybe")), TriState::Unknown);
    }

    #[test]
    fn full_payload_deserializes() {
        let response: TokenInfoResponse = serde_json::from_value(json!({
            "data": {
                "id": "solana_So11111111111111111111111111111111111111112",
                "type": "token",
                "attributes": {
                    "address": "So11111111111111111111111111111111111111112",
                    "name": "Wrapped SOL",
                    "symbol": "SOL",
                    "decimals": 9,
                    "websites": [],
                    "gt_score": 92.66,
                    "gt_score_details": { "pool": 87.5, "transaction": 100, "creation": 50, "info": 60 },
                    "categories": ["Solana Ecosystem"],
                    "gt_category_ids": ["solana-ecosystem"],
                    "holders": {
                        "count": 1234567,
                        "distribution_percentage": { "top_10": "45.25", "11_20": "6.1", "21_40": "5.5", "rest": "43.15" },
                        "last_updated": "2024-10-25T00:00:00Z"
                    },
                    "mint_authority": "no",
                    "freeze_authority": "no",
                    "is_honeypot": "no"
                }
            }
        }))
        .unwrap();

        let info = response.data.attributes;
        assert_eq!(response.data.kind, "token");
        assert_eq!(info.decimals, Some(9));
        assert_eq!(info.gt_score_details.unwrap().transaction, Some(100.0));
        let holders = info.holders.unwrap();
        assert_eq!(holders.count, Some(1_234_567));
        assert_eq!(holders.distribution_percentage.unwrap().from_11_to_20, Some(6.1));
        assert_eq!(info.mint_authority, TriState::No);
        assert!(info.launchpad_details.is_none());
    }

    #[test]
    fn unknown_flags_serialize_as_null() {
        let info = TokenInfo {
            is_honeypot: TriState::Yes,
            ..Default::default()
        };
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["is_honeypot"], "yes");
        assert!(value["mint_authority"].is_null());
    }
}
