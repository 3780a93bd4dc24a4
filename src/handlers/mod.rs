//! HTTP handlers for restaurants, pizzas and restaurant pizzas.

pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

use axum::response::Html;

/// GET /
pub async fn index() -> Html<&'static str> {
    Html("<h1>Code challenge</h1>")
}

/// Integer path id, or None for anything a `<int:id>` route would not match.
pub(crate) fn parse_id(id_str: &str) -> Option<i32> {
    id_str.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::parse_id;

    #[test]
    fn parse_id_accepts_integers_only() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("-1"), Some(-1));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("1.5"), None);
        assert_eq!(parse_id("99999999999"), None);
    }
}
