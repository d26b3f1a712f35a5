//! Plain-text rendering of a cart snapshot.

use cart_core::CartState;
use std::fmt::Write;

/// Render lines, item count and any recorded error
pub fn render(state: &CartState) -> String {
    let mut out = String::new();

    if state.is_empty() {
        out.push_str("Cart is empty\n");
    } else {
        let name_width = state
            .lines
            .iter()
            .map(|line| line.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("NAME".len());

        let _ = writeln!(
            out,
            "{:>6}  {:<name_width$}  {:>10}  {:>4}",
            "ID", "NAME", "PRICE", "QTY"
        );
        for line in &state.lines {
            let _ = writeln!(
                out,
                "{:>6}  {:<name_width$}  {:>10}  {:>4}",
                line.id, line.name, line.price, line.quantity
            );
        }
        let _ = writeln!(out, "{} item(s)", state.item_count());
    }

    if let Some(message) = state.error_message() {
        let _ = writeln!(out, "error: {message}");
    }

    out
}
