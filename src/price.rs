//! Currency formatting and the discount decision for a listing's prices.
//!
//! Prices arrive as free-form strings. A price that is missing, blank, not a finite number or
//! larger in magnitude than [`MAX_AMOUNT`] is treated as absent: a bad current price produces no
//! price text at all, and a bad original price never produces a discount.

use num_format::{Locale, ToFormattedString};
use serde::Serialize;

/// The struck-through original price next to the emphasized current price. Only produced when
/// the original price is strictly greater than the current price.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DiscountBlock {
    /// The formatted original price.
    pub original: String,
    /// The formatted current price.
    pub current: String,
}

impl DiscountBlock {
    /// Markup for the block.
    pub fn to_html(&self) -> String {
        format!(
            r#"<span class="original-price">{}</span><span class="current-price">{}</span>"#,
            self.original,
            self.current,
        )
    }
}

/// Result of formatting a pair of prices.
#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct PriceDisplay {
    /// Present when the listing is discounted.
    pub discount: Option<DiscountBlock>,
    /// Appended to the description. Empty when there is no current price.
    pub description_suffix: String,
}

impl PriceDisplay {
    /// The description text shown for `base_description` with these prices.
    pub fn describe(&self, base_description: &str) -> String {
        format!("{base_description}{}", self.description_suffix)
    }
}

/// The largest amount, in either direction, that is formatted exactly.
pub const MAX_AMOUNT: f64 = 1e38;

/// Parses a price. Returns `None` for blank, malformed or non-finite input and for amounts
/// beyond [`MAX_AMOUNT`].
pub fn parse_amount(price: &str) -> Option<f64> {
    let price = price.trim();
    
    if price.is_empty() {
        return None;
    }
    
    price.parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && amount.abs() <= MAX_AMOUNT)
}

/// Formats an amount as whole US dollars, e.g. `$1,200`. Halves round away from zero. Amounts
/// beyond [`MAX_AMOUNT`] are formatted as [`MAX_AMOUNT`].
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let dollars = (rounded.abs().min(MAX_AMOUNT) as u128).to_formatted_string(&Locale::en);
    
    if rounded.is_sign_negative() {
        format!("-${dollars}")
    } else {
        format!("${dollars}")
    }
}

/// Formats the current and original prices of a listing.
///
/// Both prices must always be formatted together: whether a discount is shown depends on both.
pub fn format_prices(
    current: Option<&str>,
    original: Option<&str>,
) -> PriceDisplay {
    let Some(current) = current.and_then(parse_amount) else {
        return PriceDisplay::default();
    };
    let formatted_current = format_currency(current);
    let discount = original
        .and_then(parse_amount)
        .filter(|original| *original > current)
        .map(|original| DiscountBlock {
            original: format_currency(original),
            current: formatted_current.clone(),
        });
    
    PriceDisplay {
        discount,
        description_suffix: format!(" - {formatted_current}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn formats_whole_dollars_with_grouping() {
        assert_eq!(format_currency(1200.0), "$1,200");
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.5), "$1,000");
        assert_eq!(format_currency(1234567.49), "$1,234,567");
        assert_eq!(format_currency(-1200.0), "-$1,200");
    }
    
    #[test]
    fn current_price_only() {
        let display = format_prices(Some("1200"), None);
        
        assert_eq!(display.discount, None);
        assert_eq!(display.description_suffix, " - $1,200");
        assert_eq!(display.describe("A kettle"), "A kettle - $1,200");
    }
    
    #[test]
    fn discounted_price() {
        let display = format_prices(Some("1200"), Some("1500"));
        
        assert_eq!(display.discount, Some(DiscountBlock {
            original: String::from("$1,500"),
            current: String::from("$1,200"),
        }));
        assert_eq!(display.description_suffix, " - $1,200");
    }
    
    #[test]
    fn original_not_greater_than_current_is_not_a_discount() {
        for original in ["1200", "1000", "1199.99"] {
            assert_eq!(format_prices(Some("1200"), Some(original)), format_prices(Some("1200"), None));
        }
    }
    
    #[test]
    fn compares_unrounded_amounts() {
        // both format to $1,200 but the original is still greater
        let display = format_prices(Some("1199.6"), Some("1200.4"));
        
        assert!(display.discount.is_some());
    }
    
    #[test]
    fn missing_current_price_formats_nothing() {
        assert_eq!(format_prices(None, Some("1500")), PriceDisplay::default());
        assert_eq!(format_prices(Some(""), None), PriceDisplay::default());
        assert_eq!(PriceDisplay::default().describe("A kettle"), "A kettle");
    }
    
    #[test]
    fn malformed_prices_fall_back_without_discount() {
        assert_eq!(format_prices(Some("cheap"), Some("1500")), PriceDisplay::default());
        assert_eq!(format_prices(Some("NaN"), None), PriceDisplay::default());
        assert_eq!(format_prices(Some("inf"), None), PriceDisplay::default());
        
        let display = format_prices(Some("1200"), Some("a lot"));
        
        assert_eq!(display.discount, None);
        assert_eq!(display.description_suffix, " - $1,200");
    }
    
    #[test]
    fn amounts_beyond_limit_are_malformed() {
        assert_eq!(parse_amount("1e38"), Some(MAX_AMOUNT));
        assert_eq!(parse_amount("1e39"), None);
        assert_eq!(parse_amount("-1e39"), None);
        assert_eq!(format_prices(Some("1e39"), None), PriceDisplay::default());
        assert_eq!(format_prices(Some("1200"), Some("1e39")).discount, None);
        assert_eq!(format_currency(f64::MAX), format_currency(MAX_AMOUNT));
        assert_eq!(format_currency(f64::MIN), format!("-{}", format_currency(MAX_AMOUNT)));
    }
    
    #[test]
    fn renders_discount_markup() {
        let block = DiscountBlock {
            original: String::from("$1,500"),
            current: String::from("$1,200"),
        };
        
        assert_eq!(
            block.to_html(),
            r#"<span class="original-price">$1,500</span><span class="current-price">$1,200</span>"#,
        );
    }
}
