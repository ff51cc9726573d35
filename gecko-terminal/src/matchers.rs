use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // base58 alphabet, Solana address length
    static ref SOLANA_ADDRESS: Regex = Regex::new(r"[1-9A-HJ-NP-Za-km-z]{43,44}").unwrap();
}

/// First Solana-looking address in `text`, case preserved.
pub fn find_solana_address(text: &str) -> Option<&str> {
    SOLANA_ADDRESS
        .find(text)
        .map(|m| m.as_str().trim())
        .filter(|address| !address.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_address_inside_sentence() {
        assert_eq!(
            find_solana_address("查询代币信息：So11111111111111111111111111111111111111112"),
            Some("So11111111111111111111111111111111111111112")
        );
        assert_eq!(
            find_solana_address("Can you get info for token address HGafL7qFRtS6zYyUMn1jJc3z67itxZYd55D94mfupump?"),
            Some("HGafL7qFRtS6zYyUMn1jJc3z67itxZYd55D94mfupump")
        );
    }

    #[test]
    fn mixed_case_address_survives() {
        let address = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";
        assert_eq!(find_solana_address(&format!("info {address}")), Some(address));
    }

    #[test]
    fn short_or_non_base58_text_is_ignored() {
        assert_eq!(find_solana_address("BTC price please"), None);
        assert_eq!(find_solana_address("0OIl0OIl0OIl0OIl0OIl0OIl0OIl0OIl0OIl0OIl0OIl"), None);
    }
}
