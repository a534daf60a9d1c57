//! Conversion of upstream listing records into the canonical product shape.
//!
//! Pure functions, no side effects.

use rust_decimal::Decimal;

use lookbook_core::Product;

use super::wire::ListingProduct;

/// Convert one upstream listing record into a [`Product`].
///
/// A malformed or missing price becomes `0` rather than an error; the
/// upstream image URL comes without a scheme and gets an `https://` prefix.
pub fn convert_listing_product(record: ListingProduct) -> Product {
    let (price_value, price_text) = record
        .price
        .and_then(|p| p.current)
        .map_or((None, String::new()), |c| (c.value, c.text));

    Product {
        id: Some(record.id),
        name: record.name,
        price_value: price_value
            .and_then(Decimal::from_f64_retain)
            .unwrap_or_default(),
        price_text,
        image_url: ensure_https(record.image_url.unwrap_or_default()),
        source_link: None,
    }
}

/// Prefix a scheme-less URL with `https://`.
///
/// URLs that already carry a scheme pass through unchanged; an empty string
/// stays empty.
fn ensure_https(url: String) -> String {
    if url.is_empty() || url.starts_with("https://") || url.starts_with("http://") {
        url
    } else {
        format!("https://{url}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::wire::{CurrentPrice, ListingPrice};
    use super::*;

    fn record(image_url: Option<&str>, price: Option<ListingPrice>) -> ListingProduct {
        ListingProduct {
            id: 1_234,
            name: "Linen shirt".to_string(),
            price,
            image_url: image_url.map(str::to_owned),
        }
    }

    #[test]
    fn test_convert_prefixes_bare_image_url() {
        let product = convert_listing_product(record(Some("img.example.com/x.jpg"), None));
        assert_eq!(product.image_url, "https://img.example.com/x.jpg");
    }

    #[test]
    fn test_convert_keeps_existing_scheme() {
        let product =
            convert_listing_product(record(Some("https://img.example.com/x.jpg"), None));
        assert_eq!(product.image_url, "https://img.example.com/x.jpg");
    }

    #[test]
    fn test_convert_maps_price_fields() {
        let price = ListingPrice {
            current: Some(CurrentPrice {
                value: Some(21.99),
                text: "21,99 €".to_string(),
            }),
        };
        let product = convert_listing_product(record(Some("img.example.com/x.jpg"), Some(price)));
        assert_eq!(product.price_value, "21.99".parse::<Decimal>().unwrap());
        assert_eq!(product.price_text, "21,99 €");
        assert_eq!(product.id, Some(1_234));
        assert_eq!(product.name, "Linen shirt");
        assert!(product.source_link.is_none());
    }

    #[test]
    fn test_convert_missing_price_falls_back_to_zero() {
        let product = convert_listing_product(record(Some("img.example.com/x.jpg"), None));
        assert_eq!(product.price_value, Decimal::ZERO);
        assert_eq!(product.price_text, "");
    }

    #[test]
    fn test_convert_price_without_value_falls_back_to_zero() {
        let price = ListingPrice {
            current: Some(CurrentPrice {
                value: None,
                text: "sold out".to_string(),
            }),
        };
        let product = convert_listing_product(record(None, Some(price)));
        assert_eq!(product.price_value, Decimal::ZERO);
        assert_eq!(product.price_text, "sold out");
        assert_eq!(product.image_url, "");
    }
}
