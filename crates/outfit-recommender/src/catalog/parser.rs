use std::collections::BTreeMap;
use std::io::Read;

use csv::StringRecord;

use super::codes;
use super::CatalogError;
use crate::domain::{Outfit, ScoreTable};

const CLASSIFICATION_COLUMN: &str = "Classification";
const ATTRIBUTE_NAME_COLUMN: &str = "Attribute Name";
const IMAGE_LABEL_COLUMN: &str = "image_label";
const IMAGE_URL_COLUMN: &str = "image_url";

/// Header lookup tolerant of BOMs and stray whitespace in sheet exports.
struct Columns {
    names: Vec<String>,
}

impl Columns {
    fn new(headers: &StringRecord) -> Self {
        Self {
            names: headers.iter().map(normalize_header).collect(),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|header| header == name)
    }

    fn require(&self, name: &str) -> Result<usize, CatalogError> {
        self.position(name)
            .ok_or_else(|| CatalogError::MissingColumn(name.to_string()))
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

fn reader_for<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

/// Non-numeric, blank, or non-finite cells count as zero affinity.
fn parse_affinity(cell: Option<&str>) -> f64 {
    cell.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

pub(crate) fn parse_score_table<R, S>(reader: R, categories: &[S]) -> Result<ScoreTable, CatalogError>
where
    R: Read,
    S: AsRef<str>,
{
    let mut csv_reader = reader_for(reader);
    let columns = Columns::new(csv_reader.headers()?);
    let classification = columns.require(CLASSIFICATION_COLUMN)?;
    let attribute_name = columns.require(ATTRIBUTE_NAME_COLUMN)?;
    let category_columns: Vec<(&str, Option<usize>)> = categories
        .iter()
        .map(|category| {
            let category = category.as_ref();
            (category, columns.position(category))
        })
        .collect();

    let mut table = ScoreTable::new();
    for record in csv_reader.records() {
        let row = record?;
        let attribute = row.get(classification).unwrap_or_default();
        let value = row.get(attribute_name).unwrap_or_default();
        if attribute.is_empty() {
            continue;
        }

        for (category, index) in &category_columns {
            let affinity = parse_affinity(index.and_then(|index| row.get(index)));
            table.insert(attribute, value, *category, affinity);
        }
    }

    Ok(table)
}

pub(crate) fn parse_outfits<R: Read>(reader: R) -> Result<Vec<Outfit>, CatalogError> {
    let mut csv_reader = reader_for(reader);
    let columns = Columns::new(csv_reader.headers()?);
    let attribute_columns: Vec<(&'static str, Option<usize>)> = codes::attribute_names()
        .map(|name| (name, columns.position(name)))
        .collect();
    let image_label = columns.position(IMAGE_LABEL_COLUMN);
    let image_url = columns.position(IMAGE_URL_COLUMN);

    let mut outfits = Vec::new();
    for record in csv_reader.records() {
        let row = record?;
        let attributes: BTreeMap<String, String> = attribute_columns
            .iter()
            .map(|(name, index)| {
                let label = index
                    .and_then(|index| row.get(index))
                    .map(|code| codes::decode(name, code))
                    .unwrap_or(codes::NOT_AVAILABLE);
                (name.to_string(), label.to_string())
            })
            .collect();

        let cell = |index: Option<usize>| {
            index
                .and_then(|index| row.get(index))
                .unwrap_or_default()
                .to_string()
        };

        outfits.push(Outfit::new(attributes, cell(image_label), cell(image_url)));
    }

    Ok(outfits)
}
