//! Category taxonomy and display colors.
//!
//! The table is the single source of truth for the closed category set: the
//! classifier prompt lists exactly these labels, in this order.

/// Known categories and their display colors (hex RGB).
pub const CATEGORY_COLORS: &[(&str, &str)] = &[
    ("billing inquiries", "#FFB6C1"),
    ("technical support", "#87CEEB"),
    ("order tracking", "#90EE90"),
    ("product information", "#FFD700"),
    ("general questions", "#D3D3D3"),
];

/// Color used for any label outside the table.
pub const DEFAULT_COLOR: &str = "#FFFFFF";

/// Iterate the known category labels in table order.
pub fn known_categories() -> impl Iterator<Item = &'static str> {
    CATEGORY_COLORS.iter().map(|(label, _)| *label)
}

/// Look up the display color for a label. Exact match only.
pub fn color_for(label: &str) -> &'static str {
    CATEGORY_COLORS
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_COLOR)
}

/// Parse `#RRGGBB` into components.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_category_has_its_documented_color() {
        let expected = [
            ("billing inquiries", "#FFB6C1"),
            ("technical support", "#87CEEB"),
            ("order tracking", "#90EE90"),
            ("product information", "#FFD700"),
            ("general questions", "#D3D3D3"),
        ];
        assert_eq!(CATEGORY_COLORS.len(), expected.len());
        for (label, color) in expected {
            assert_eq!(color_for(label), color, "color for {label}");
        }
    }

    #[test]
    fn unknown_labels_get_default_color() {
        for label in [
            "shipping complaint",
            "",
            "Order Tracking",
            "order tracking.",
            " billing inquiries",
            "refunds",
        ] {
            assert_eq!(color_for(label), DEFAULT_COLOR, "label {label:?}");
        }
    }

    #[test]
    fn known_categories_in_table_order() {
        let labels: Vec<_> = known_categories().collect();
        assert_eq!(labels.first(), Some(&"billing inquiries"));
        assert_eq!(labels.last(), Some(&"general questions"));
        assert!(labels.iter().all(|l| *l == l.to_lowercase()));
    }

    #[test]
    fn every_table_color_parses() {
        for (_, color) in CATEGORY_COLORS {
            assert!(hex_to_rgb(color).is_some(), "{color}");
        }
        assert_eq!(hex_to_rgb(DEFAULT_COLOR), Some((255, 255, 255)));
        assert_eq!(hex_to_rgb("#90EE90"), Some((0x90, 0xEE, 0x90)));
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert_eq!(hex_to_rgb("90EE90"), None);
        assert_eq!(hex_to_rgb("#90EE9"), None);
        assert_eq!(hex_to_rgb("#GGGGGG"), None);
    }
}
