use rust_decimal::Decimal;

use crate::entities::PRICE_DECIMAL_PLACES;

pub type PriceValue = Decimal;

/// Turns blank input into `None` and trims everything else.
pub fn normalize_text(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub fn has_text(value: &Option<String>) -> bool {
    value.as_deref().map_or(false, |value| !value.trim().is_empty())
}

pub fn only_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

pub fn round_price(price: PriceValue) -> PriceValue {
    price.round_dp(PRICE_DECIMAL_PLACES)
}

pub fn sum_prices(prices: &[PriceValue]) -> PriceValue {
    prices.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    #[allow(non_snake_case)]
    fn normalize_text__blank_string__should_return_none() {
        assert_eq!(normalize_text(Some(String::from("   "))), None);
        assert_eq!(normalize_text(None), None);
    }

    #[test]
    #[allow(non_snake_case)]
    fn normalize_text__padded_string__should_return_trimmed_string() {
        assert_eq!(
            normalize_text(Some(String::from("  Lenina "))),
            Some(String::from("Lenina"))
        );
    }

    #[test]
    #[allow(non_snake_case)]
    fn only_digits__formatted_phone__should_keep_digits_only() {
        assert_eq!(only_digits("+7 (999) 123-45-67"), "79991234567");
    }

    #[test]
    #[allow(non_snake_case)]
    fn round_price__long_fraction__should_round_to_two_places() {
        assert_eq!(round_price(dec!(10.005)), dec!(10.00));
        assert_eq!(round_price(dec!(10.015)), dec!(10.02));
    }
}
