use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Gender bucket inferred from the dataset's image label prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Unisex,
}

impl Gender {
    /// Infers gender from an image label such as `MEN-Denim-id_00000080-01_7_additional`.
    pub fn from_image_label(label: &str) -> Self {
        let lowered = label.trim().to_ascii_lowercase();
        if lowered.starts_with("men") {
            Self::Male
        } else if lowered.starts_with("women") {
            Self::Female
        } else {
            Self::Unisex
        }
    }

    /// Parses user input; accepts the dataset's `men`/`women` spelling as well.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" | "men" | "man" => Some(Self::Male),
            "female" | "women" | "woman" => Some(Self::Female),
            "unisex" => Some(Self::Unisex),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unisex => "unisex",
        }
    }
}

/// One labeled outfit from the dataset with its decoded attribute values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outfit {
    pub attributes: BTreeMap<String, String>,
    pub image_label: String,
    pub image_url: String,
    pub gender: Gender,
}

impl Outfit {
    pub fn new(
        attributes: BTreeMap<String, String>,
        image_label: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        let image_label = image_label.into();
        let gender = Gender::from_image_label(&image_label);
        Self {
            attributes,
            image_label,
            image_url: image_url.into(),
            gender,
        }
    }

    /// Builds an unlabeled outfit from attribute pairs; used for ad-hoc scoring.
    pub fn from_attributes<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let attributes = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self::new(attributes, "", "")
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Attribute value to category affinity lookup built from a scoring sheet.
///
/// Every lookup that misses yields `0.0`; the table never reports absence as an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreTable {
    entries: HashMap<String, HashMap<String, HashMap<String, f64>>>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        attribute: impl Into<String>,
        value: impl Into<String>,
        category: impl Into<String>,
        affinity: f64,
    ) {
        self.entries
            .entry(attribute.into())
            .or_default()
            .entry(value.into())
            .or_default()
            .insert(category.into(), affinity);
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(
        mut self,
        attribute: impl Into<String>,
        value: impl Into<String>,
        category: impl Into<String>,
        affinity: f64,
    ) -> Self {
        self.insert(attribute, value, category, affinity);
        self
    }

    pub fn knows_attribute(&self, attribute: &str) -> bool {
        self.entries.contains_key(attribute)
    }

    pub fn affinity(&self, attribute: &str, value: &str, category: &str) -> f64 {
        self.entries
            .get(attribute)
            .and_then(|values| values.get(value))
            .and_then(|categories| categories.get(category))
            .copied()
            .unwrap_or(0.0)
    }

    /// Number of distinct (attribute, value) rows.
    pub fn row_count(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-attribute contribution for one category, rounded to two decimals.
pub type ScoreBreakdown = BTreeMap<String, f64>;

/// Output of a single ranking pass for one surviving outfit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub outfit: Outfit,
    pub combined_score: f64,
    pub style_score: f64,
    pub bodyshape_score: f64,
    pub season_score: f64,
    pub occasion_score: f64,
    pub feature_bonus: f64,
    pub style: String,
    pub body_shape: String,
    pub season: Option<String>,
    pub occasion: Option<String>,
    pub features: BTreeMap<String, String>,
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
