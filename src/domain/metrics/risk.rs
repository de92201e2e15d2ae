//! Risk score and impermanent-loss estimates

use crate::shared::errors::CollectorError;

pub const MIN_RISK_SCORE: i32 = 1;
pub const MAX_RISK_SCORE: i32 = 10;

/// Bounds applied to the range-based impermanent-loss proxy
pub const PROXY_IL_FLOOR: f64 = 0.1;
pub const PROXY_IL_CEILING: f64 = 0.9;

const DAYS_PER_YEAR: f64 = 365.0;

pub fn clamp_risk_score(score: i32) -> u8 {
    score.clamp(MIN_RISK_SCORE, MAX_RISK_SCORE) as u8
}

/// Relative width of a price range: `(max - min) / mid`.
/// Zero when either bound is missing or zero, or the midpoint is not positive.
pub fn range_volatility(price_min: Option<f64>, price_max: Option<f64>) -> f64 {
    match (price_min, price_max) {
        (Some(min), Some(max)) if min != 0.0 && max != 0.0 => {
            let mid = (max + min) / 2.0;
            if mid > 0.0 && mid.is_finite() {
                (max - min) / mid
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

/// Impermanent-loss proxy from range volatility, bounded to [0.1, 0.9]
pub fn proxy_impermanent_loss(volatility: f64) -> f64 {
    (volatility * 2.0).clamp(PROXY_IL_FLOOR, PROXY_IL_CEILING)
}

/// Score from TVL tier and range volatility, starting at 3
pub fn tvl_volatility_risk_score(tvl: f64, volatility: f64) -> u8 {
    let mut score = 3;

    if tvl < 1_000_000.0 {
        score += 2;
    } else if tvl < 5_000_000.0 {
        score += 1;
    } else if tvl > 50_000_000.0 {
        score -= 1;
    }

    if volatility > 0.5 {
        score += 2;
    } else if volatility > 0.3 {
        score += 1;
    }

    clamp_risk_score(score)
}

/// Score from TVL tier only
pub fn tvl_tier_risk_score(tvl: f64) -> u8 {
    let score = if tvl < 1_000_000.0 {
        5
    } else if tvl > 50_000_000.0 {
        2
    } else {
        3
    };
    clamp_risk_score(score)
}

/// Annualized volatility of the A/B price ratio, capped at 1.0.
///
/// Uses daily log-returns of the ratio and the sample standard deviation.
/// Series of different lengths are rejected, never truncated.
pub fn historical_impermanent_loss(
    prices_a: &[f64],
    prices_b: &[f64],
) -> Result<f64, CollectorError> {
    if prices_a.len() != prices_b.len() {
        return Err(CollectorError::DataIntegrity(format!(
            "Mismatch in historical price data lengths: {} vs {}",
            prices_a.len(),
            prices_b.len()
        )));
    }

    let ratios = prices_a
        .iter()
        .zip(prices_b)
        .map(|(a, b)| {
            let ratio = a / b;
            if ratio.is_finite() && ratio > 0.0 {
                Ok(ratio)
            } else {
                Err(CollectorError::DataIntegrity(format!(
                    "Invalid historical price pair: {} / {}",
                    a, b
                )))
            }
        })
        .collect::<Result<Vec<f64>, _>>()?;

    let log_returns: Vec<f64> = ratios.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
    if log_returns.len() < 2 {
        return Ok(0.0);
    }

    let n = log_returns.len() as f64;
    let mean = log_returns.iter().sum::<f64>() / n;
    let variance = log_returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let annualized = variance.sqrt() * DAYS_PER_YEAR.sqrt();

    Ok(annualized.clamp(0.0, 1.0))
}
