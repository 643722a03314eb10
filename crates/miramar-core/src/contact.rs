//! Click-to-chat deep links used in place of a checkout.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::products::Product;

const WHATSAPP_BASE: &str = "https://wa.me";

/// Characters left unescaped by ECMAScript `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds `https://wa.me/{phone}?text={message}`.
///
/// Non-digit characters are dropped from `phone` (`"+56 9 1234"` → `"5691234"`),
/// which is the only form the link accepts.
#[must_use]
pub fn whatsapp_link(phone: &str, message: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    let text = utf8_percent_encode(message, COMPONENT);
    format!("{WHATSAPP_BASE}/{digits}?text={text}")
}

/// Opening message for a purchase conversation about `product`.
#[must_use]
pub fn purchase_message(product: &Product) -> String {
    match product.primary_price() {
        Some(price) => format!(
            "Hola, me interesa el producto: {} - ${}",
            product.name,
            price.effective_price().normalize()
        ),
        None => format!("Hola, me interesa el producto: {}", product.name),
    }
}

/// Deep link that opens a purchase conversation about `product`.
#[must_use]
pub fn purchase_link(phone: &str, product: &Product) -> String {
    whatsapp_link(phone, &purchase_message(product))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::products::Price;

    fn product(prices: Vec<Price>) -> Product {
        Product {
            id: 1,
            name: "Zapatillas running".to_string(),
            slug: "zapatillas-running".to_string(),
            description: String::new(),
            image: None,
            categories: vec![],
            prices,
        }
    }

    #[test]
    fn whatsapp_link_encodes_message_like_encode_uri_component() {
        let link = whatsapp_link("1234567890", "Hola, ¿precio? (M) $10 & envío");
        assert_eq!(
            link,
            "https://wa.me/1234567890?text=Hola%2C%20%C2%BFprecio%3F%20(M)%20%2410%20%26%20env%C3%ADo"
        );
    }

    #[test]
    fn whatsapp_link_keeps_only_phone_digits() {
        let link = whatsapp_link("+56 9 1234-5678", "x");
        assert_eq!(link, "https://wa.me/56912345678?text=x");
    }

    #[test]
    fn purchase_message_uses_discount_price_when_on_sale() {
        let p = product(vec![Price {
            id: 1,
            size: "Único".to_string(),
            price: Decimal::new(8999, 2),
            discount_price: Some(Decimal::new(6999, 2)),
        }]);
        assert_eq!(
            purchase_message(&p),
            "Hola, me interesa el producto: Zapatillas running - $69.99"
        );
    }

    #[test]
    fn purchase_message_trims_trailing_zeros() {
        let p = product(vec![Price::single(Decimal::new(2500, 2), None)]);
        assert_eq!(
            purchase_message(&p),
            "Hola, me interesa el producto: Zapatillas running - $25"
        );
    }

    #[test]
    fn purchase_message_without_prices_omits_amount() {
        let p = product(vec![]);
        assert_eq!(
            purchase_message(&p),
            "Hola, me interesa el producto: Zapatillas running"
        );
    }

    #[test]
    fn purchase_link_wraps_message() {
        let p = product(vec![Price::single(Decimal::from(10), None)]);
        assert!(purchase_link("123", &p).starts_with("https://wa.me/123?text=Hola%2C%20me%20interesa"));
    }
}
