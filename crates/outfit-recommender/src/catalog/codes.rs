use std::collections::HashMap;
use std::sync::OnceLock;

pub const NOT_AVAILABLE: &str = "NA";

pub const STYLE_NAMES: &[&str] = &[
    "Formal",
    "Casual",
    "Trendy",
    "Bohemian",
    "Minimalist",
    "Streetwear",
    "Elegant",
];

pub const BODY_SHAPE_NAMES: &[&str] = &[
    "Hourglass",
    "Triangle",
    "Inverted Triangle",
    "Rectangle",
    "Oval",
];

pub const SEASON_NAMES: &[&str] = &[
    "summer", "winter", "spring", "fall", "autumn", "rainy", "dry", "hot", "cold",
];

pub const OCCASION_NAMES: &[&str] = &[
    "wedding",
    "party",
    "interview",
    "work",
    "office",
    "business",
    "meeting",
    "holiday",
    "vacation",
    "date",
    "sport",
    "gym",
    "ceremony",
    "graduation",
    "picnic",
];

const YES_NO: &[&str] = &["No", "Yes", NOT_AVAILABLE];
const FABRICS: &[&str] = &[
    "denim",
    "cotton",
    "leather",
    "furry",
    "knitted",
    "chiffon",
    "other",
    NOT_AVAILABLE,
];
const PATTERNS: &[&str] = &[
    "Floral",
    "Graphic",
    "Striped",
    "Pure Color",
    "Lattice",
    "Other",
    "Color Block",
    NOT_AVAILABLE,
];

/// Dataset columns in decode order; a label's index is its numeric code.
pub const ATTRIBUTE_CODES: &[(&str, &[&str])] = &[
    (
        "sleeve_length",
        &[
            "Sleeveless",
            "Short Sleeve",
            "Medium Sleeve",
            "Long Sleeve",
            "Not Long Sleeve",
            NOT_AVAILABLE,
        ],
    ),
    (
        "lower_length",
        &[
            "Three-Point",
            "Medium Short",
            "Three-Quarter",
            "Long",
            NOT_AVAILABLE,
        ],
    ),
    ("socks", &["No", "Socks", "Leggings", NOT_AVAILABLE]),
    ("hat", YES_NO),
    (
        "glasses",
        &[
            "No",
            "Eyeglasses",
            "Sunglasses",
            "Glasses in Hand or Clothes",
            NOT_AVAILABLE,
        ],
    ),
    ("neckwear", YES_NO),
    ("wrist_wear", YES_NO),
    ("ring", YES_NO),
    (
        "waist_acc",
        &["No", "Belt", "Clothing", "Hidden", NOT_AVAILABLE],
    ),
    (
        "neckline",
        &[
            "V-shape",
            "Square",
            "Round",
            "Standing",
            "Lapel",
            "Suspenders",
            NOT_AVAILABLE,
        ],
    ),
    ("outer", &["Cardigan", "No", NOT_AVAILABLE]),
    ("covers_navel", YES_NO),
    ("fabric_upper", FABRICS),
    ("fabric_lower", FABRICS),
    ("fabric_outer", FABRICS),
    ("pattern_upper", PATTERNS),
    ("pattern_lower", PATTERNS),
    ("pattern_outer", PATTERNS),
];

static CODE_MAP: OnceLock<HashMap<&'static str, &'static [&'static str]>> = OnceLock::new();

fn code_map() -> &'static HashMap<&'static str, &'static [&'static str]> {
    CODE_MAP.get_or_init(|| ATTRIBUTE_CODES.iter().copied().collect())
}

/// Decodes a raw dataset code; unknown attributes, codes, or blanks yield `NA`.
pub fn decode(attribute: &str, code: &str) -> &'static str {
    let Some(labels) = code_map().get(attribute) else {
        return NOT_AVAILABLE;
    };

    code.trim()
        .parse::<usize>()
        .ok()
        .and_then(|index| labels.get(index).copied())
        .unwrap_or(NOT_AVAILABLE)
}

pub fn attribute_names() -> impl Iterator<Item = &'static str> {
    ATTRIBUTE_CODES.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_codes() {
        assert_eq!(decode("sleeve_length", "0"), "Sleeveless");
        assert_eq!(decode("sleeve_length", " 3 "), "Long Sleeve");
        assert_eq!(decode("fabric_outer", "5"), "chiffon");
        assert_eq!(decode("pattern_upper", "6"), "Color Block");
        assert_eq!(decode("outer", "0"), "Cardigan");
    }

    #[test]
    fn unknown_codes_decode_to_na() {
        assert_eq!(decode("sleeve_length", "9"), NOT_AVAILABLE);
        assert_eq!(decode("sleeve_length", ""), NOT_AVAILABLE);
        assert_eq!(decode("sleeve_length", "short"), NOT_AVAILABLE);
        assert_eq!(decode("unknown_attribute", "0"), NOT_AVAILABLE);
    }

    #[test]
    fn every_attribute_ends_with_na() {
        assert_eq!(attribute_names().count(), 18);
        for (_, labels) in ATTRIBUTE_CODES {
            assert_eq!(labels.last().copied(), Some(NOT_AVAILABLE));
        }
    }
}
