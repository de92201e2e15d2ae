//! Token registry for Solana mainnet

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use crate::shared::types::TokenInfo;

/// Symbol used when a token is missing from the registry
pub const UNKNOWN_SYMBOL: &str = "Unknown";

/// Decimal precision used when a token is missing from the registry
pub const UNKNOWN_DECIMALS: u8 = 0;

/// (symbol, mint, decimals, coingecko id)
const KNOWN_TOKENS: &[(&str, &str, u8, &str)] = &[
    ("SOL", "So11111111111111111111111111111111111111112", 9, "solana"),
    ("USDC", "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", 6, "usd-coin"),
    ("USDT", "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB", 6, "tether"),
    ("ORCA", "orcaEKTdK7LKz57vaAYr9QeNsVEPfiu6QeMU1kektZE", 6, "orca"),
    ("RAY", "4k3Dyjzvzp8eMZWUXbBCjEvwSkkk59S5iCNLY3QrkX6R", 6, "raydium"),
    ("SRM", "SRMuApVNdxXokk5GT7XD5cUUgXMBCoAz2LHeuAoKWRt", 6, "serum"),
    ("BTC", "9n4nbM75f5Ui33ZbPYXn59EwSgE8CGsHtAeTH5YFeJ9E", 6, "bitcoin"),
];

/// Read-only token lookup keyed by both symbol and mint address
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    tokens: HashMap<String, Arc<TokenInfo>>,
}

impl TokenRegistry {
    pub fn new(tokens: Vec<TokenInfo>) -> Self {
        let mut map = HashMap::with_capacity(tokens.len() * 2);
        for token in tokens {
            let token = Arc::new(token);
            map.insert(token.symbol.clone(), Arc::clone(&token));
            map.insert(token.address.clone(), token);
        }
        Self { tokens: map }
    }

    /// Registry with the built-in mainnet token table
    pub fn mainnet() -> Self {
        Self::new(
            KNOWN_TOKENS
                .iter()
                .map(|(symbol, address, decimals, feed_id)| TokenInfo {
                    symbol: symbol.to_string(),
                    address: address.to_string(),
                    decimals: *decimals,
                    price_feed_id: Some(feed_id.to_string()),
                })
                .collect(),
        )
    }

    /// Process-wide mainnet registry, built on first use
    pub fn global() -> Arc<TokenRegistry> {
        static GLOBAL: OnceLock<Arc<TokenRegistry>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(TokenRegistry::mainnet())))
    }

    pub fn lookup(&self, id_or_symbol: &str) -> Option<&TokenInfo> {
        self.tokens.get(id_or_symbol).map(|t| t.as_ref())
    }

    /// Symbol, or `Unknown` for unregistered tokens
    pub fn symbol_or_unknown(&self, id_or_symbol: &str) -> String {
        self.lookup(id_or_symbol)
            .map(|t| t.symbol.clone())
            .unwrap_or_else(|| UNKNOWN_SYMBOL.to_string())
    }

    /// Decimals, or 0 for unregistered tokens
    pub fn decimals_or_default(&self, id_or_symbol: &str) -> u8 {
        self.lookup(id_or_symbol)
            .map(|t| t.decimals)
            .unwrap_or(UNKNOWN_DECIMALS)
    }

    /// Distinct registered tokens, however many keys point at each
    pub fn len(&self) -> usize {
        self.tokens
            .values()
            .map(Arc::as_ptr)
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_symbol_and_address() {
        let registry = TokenRegistry::mainnet();

        let by_symbol = registry.lookup("USDC").unwrap();
        let by_address = registry
            .lookup("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v")
            .unwrap();

        assert_eq!(by_symbol, by_address);
        assert_eq!(by_symbol.decimals, 6);
        assert_eq!(by_symbol.price_feed_id.as_deref(), Some("usd-coin"));
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn test_unknown_token_fallbacks() {
        let registry = TokenRegistry::mainnet();
        let mint = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";

        assert!(registry.lookup(mint).is_none());
        assert_eq!(registry.symbol_or_unknown(mint), "Unknown");
        assert_eq!(registry.decimals_or_default(mint), 0);
    }

    fn token(symbol: &str, address: &str) -> TokenInfo {
        TokenInfo {
            symbol: symbol.to_string(),
            address: address.to_string(),
            decimals: 6,
            price_feed_id: None,
        }
    }

    #[test]
    fn test_len_counts_tokens_not_keys() {
        // second token's symbol shadows the first token's address key
        let registry = TokenRegistry::new(vec![
            token("AAA", "mint-one"),
            token("mint-one", "mint-two"),
        ]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.lookup("AAA").unwrap().address, "mint-one");
        assert_eq!(registry.lookup("mint-one").unwrap().address, "mint-two");
        assert!(!registry.is_empty());
        assert!(TokenRegistry::new(Vec::new()).is_empty());
    }
}
