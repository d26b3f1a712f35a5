//! # Cart Service Wire Types
//!
//! JSON bodies exchanged with the cart service, and the decode step that
//! turns a fetched body into [`CartLine`]s.
//!
//! ```text
//! GET  /api/cart           -> { "items": [{ "id", "title", "price", "amount" }] }
//! POST /api/cart           <- { "bookId", "amount" }
//! GET  /api/cart/checkout  -> (body ignored)
//! ```

use crate::error::DecodeError;
use crate::line::{CartLine, ProductId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Body of `GET /api/cart`
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCart {
    pub items: Vec<RemoteItem>,
}

/// One item as the service describes it
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteItem {
    pub id: ProductId,
    pub title: String,
    pub price: String,
    pub amount: u32,
}

impl From<RemoteItem> for CartLine {
    fn from(item: RemoteItem) -> Self {
        CartLine {
            id: item.id,
            name: item.title,
            price: item.price,
            quantity: item.amount,
        }
    }
}

impl RemoteCart {
    /// Decode a response body, failing on any shape mismatch
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Map items to lines, preserving order.
    ///
    /// Rejects a cart that lists the same product ID twice.
    pub fn into_lines(self) -> Result<Vec<CartLine>, DecodeError> {
        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if !seen.insert(item.id) {
                return Err(DecodeError::new(format!(
                    "duplicate cart line for product {}",
                    item.id
                )));
            }
        }
        Ok(self.items.into_iter().map(CartLine::from).collect())
    }
}

/// Decode a `GET /api/cart` body straight into lines
pub fn decode_lines(body: &[u8]) -> Result<Vec<CartLine>, DecodeError> {
    RemoteCart::decode(body)?.into_lines()
}

/// Body of `POST /api/cart`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateRequest {
    #[serde(rename = "bookId")]
    pub book_id: ProductId,
    /// Passed through unexamined; the service decides delta vs absolute
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_single_item() {
        let body = br#"{"items":[{"id":1,"title":"Go","price":"9.99","amount":2}]}"#;
        let lines = decode_lines(body).unwrap();

        assert_eq!(lines, vec![CartLine::new(1, "Go", "9.99", 2)]);
    }

    #[test]
    fn test_decode_preserves_order_and_ignores_extra_fields() {
        let body = json!({
            "items": [
                { "id": 9, "title": "Zig", "price": "12.00", "amount": 1, "cover": "zig.png" },
                { "id": 3, "title": "Ada", "price": "5.50", "amount": 4 }
            ],
            "total": "33.50"
        });
        let lines = decode_lines(body.to_string().as_bytes()).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].id, 9);
        assert_eq!(lines[1].name, "Ada");
        assert_eq!(lines[1].quantity, 4);
    }

    #[test]
    fn test_decode_empty_cart() {
        assert!(decode_lines(br#"{"items":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_shape_mismatch() {
        // missing items
        assert!(decode_lines(br#"{"lines":[]}"#).is_err());
        // numeric price
        let body = br#"{"items":[{"id":1,"title":"Go","price":9.99,"amount":2}]}"#;
        assert!(decode_lines(body).is_err());
        // negative amount
        let body = br#"{"items":[{"id":1,"title":"Go","price":"9.99","amount":-1}]}"#;
        assert!(decode_lines(body).is_err());
        // not json
        assert!(decode_lines(b"<html>").is_err());
    }

    #[test]
    fn test_decode_accepts_zero_amount() {
        // the service is authoritative; a zero quantity passes through as reported
        let body = br#"{"items":[{"id":4,"title":"C","price":"3.00","amount":0}]}"#;
        let lines = decode_lines(body).unwrap();

        assert_eq!(lines, vec![CartLine::new(4, "C", "3.00", 0)]);
    }

    #[test]
    fn test_decode_rejects_duplicate_ids() {
        let body = br#"{"items":[
            {"id":1,"title":"Go","price":"9.99","amount":1},
            {"id":1,"title":"Go","price":"9.99","amount":3}
        ]}"#;
        let err = decode_lines(body).unwrap_err();
        assert!(err.message.contains("duplicate"));
    }

    #[test]
    fn test_update_request_field_names() {
        let body = serde_json::to_value(UpdateRequest {
            book_id: 42,
            amount: -1,
        })
        .unwrap();
        assert_eq!(body, json!({ "bookId": 42, "amount": -1 }));
    }
}
