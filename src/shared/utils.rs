//! Utility functions and helpers

/// Convert a raw on-chain amount to human units
pub fn to_ui_amount(amount: u64, decimals: u8) -> f64 {
    amount as f64 / 10_f64.powi(decimals as i32)
}

/// Build an opportunity id from the protocol tag and the pair symbols.
/// Symbols are lowercased and sorted so both pair orientations share an id.
pub fn opportunity_id(protocol: &str, symbol_a: &str, symbol_b: &str) -> String {
    let mut symbols = [symbol_a.to_lowercase(), symbol_b.to_lowercase()];
    symbols.sort();
    format!("{}-{}-{}", protocol, symbols[0], symbols[1])
}

/// Human pair label, pool order preserved
pub fn asset_label(symbol_a: &str, symbol_b: &str) -> String {
    format!("{}/{}", symbol_a, symbol_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_ui_amount() {
        assert_eq!(to_ui_amount(1_500_000_000, 9), 1.5);
        assert_eq!(to_ui_amount(2_500_000, 6), 2.5);
        assert_eq!(to_ui_amount(42, 0), 42.0);
    }

    #[test]
    fn test_opportunity_id_is_order_independent() {
        assert_eq!(opportunity_id("raydium", "SOL", "USDC"), "raydium-sol-usdc");
        assert_eq!(opportunity_id("raydium", "USDC", "SOL"), "raydium-sol-usdc");
        assert_eq!(asset_label("USDC", "SOL"), "USDC/SOL");
    }
}
