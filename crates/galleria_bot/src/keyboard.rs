//! Category picker keyboard.

use galleria_core::Categories;

const CATEGORY_PREFIX: &str = "cat_";

/// Category buttons as `(label, callback_data)` pairs, two per row.
pub fn category_rows(categories: &Categories) -> Vec<Vec<(String, String)>> {
    let buttons: Vec<(String, String)> = categories
        .iter()
        .enumerate()
        .map(|(i, label)| (label.to_string(), format!("{CATEGORY_PREFIX}{i}")))
        .collect();
    buttons.chunks(2).map(<[_]>::to_vec).collect()
}

/// Parse `cat_<index>` callback data.
pub fn parse_category_callback(data: &str) -> Option<usize> {
    data.strip_prefix(CATEGORY_PREFIX)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_buttons_per_row() {
        let cats = Categories::parse("A,B,C");
        let rows = category_rows(&cats);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            vec![
                ("A".to_string(), "cat_0".to_string()),
                ("B".to_string(), "cat_1".to_string())
            ]
        );
        assert_eq!(rows[1], vec![("C".to_string(), "cat_2".to_string())]);
    }

    #[test]
    fn default_categories_fill_three_rows() {
        assert_eq!(category_rows(&Categories::default()).len(), 3);
    }

    #[test]
    fn parses_callback_data() {
        assert_eq!(parse_category_callback("cat_4"), Some(4));
        assert_eq!(parse_category_callback("cat_"), None);
        assert_eq!(parse_category_callback("cat_x"), None);
        assert_eq!(parse_category_callback("q:1"), None);
    }
}
