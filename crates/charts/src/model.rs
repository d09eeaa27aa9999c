//! Chart data model
//!
//! A dataset is an ordered list of records. Record order is the band order
//! for categorical charts; line and area layouts sort by key themselves.

use chrono::NaiveDate;
use indexmap::IndexSet;
use interaction::OrderedKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of a record: a category label, a number, or a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Number(f64),
    Date(NaiveDate),
    Label(String),
}

impl Key {
    /// Position on a continuous axis; labels have none
    pub fn axis_value(&self) -> Option<f64> {
        match self {
            Key::Number(n) => Some(*n),
            Key::Date(d) => Some(d.axis_value()),
            Key::Label(_) => None,
        }
    }

    /// Text used for band slots and axis labels
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Number(n) => write!(f, "{n}"),
            Key::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Key::Label(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(label: &str) -> Self {
        Key::Label(label.to_string())
    }
}

impl From<String> for Key {
    fn from(label: String) -> Self {
        Key::Label(label)
    }
}

impl From<f64> for Key {
    fn from(n: f64) -> Self {
        Key::Number(n)
    }
}

impl From<NaiveDate> for Key {
    fn from(date: NaiveDate) -> Self {
        Key::Date(date)
    }
}

/// One record of a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datum {
    pub key: Key,
    /// One entry per series; `None` marks a missing value
    pub values: Vec<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_group: Option<String>,
    /// Secondary category, used for heatmap rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Size value for sized circles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

impl Datum {
    pub fn new(key: impl Into<Key>, values: Vec<Option<f64>>) -> Self {
        Self {
            key: key.into(),
            values,
            color_group: None,
            category: None,
            size: None,
        }
    }

    /// A record with a single series value
    pub fn single(key: impl Into<Key>, value: f64) -> Self {
        Self::new(key, vec![Some(value)])
    }

    pub fn with_color_group(mut self, group: impl Into<String>) -> Self {
        self.color_group = Some(group.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Value of the first series
    pub fn value(&self) -> Option<f64> {
        self.values.first().copied().flatten()
    }

    /// Value of series `index`
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }
}

/// Ordered records plus the names of their series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Series names, one per entry of each record's `values`
    pub series: Vec<String>,
    pub records: Vec<Datum>,
}

impl Dataset {
    pub fn new<I, S>(series: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            series: series.into_iter().map(Into::into).collect(),
            records: Vec::new(),
        }
    }

    /// A dataset with one unnamed series
    pub fn single_series() -> Self {
        Self::new(["value"])
    }

    pub fn with_record(mut self, record: Datum) -> Self {
        self.records.push(record);
        self
    }

    pub fn push(&mut self, record: Datum) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Datum> {
        self.records.get(index)
    }

    /// Number of series (at least one)
    pub fn series_count(&self) -> usize {
        self.series.len().max(1)
    }

    /// Key labels in record order
    pub fn key_labels(&self) -> Vec<String> {
        self.records.iter().map(|r| r.key.label()).collect()
    }

    /// Distinct colour groups in first-seen order
    pub fn color_groups(&self) -> IndexSet<String> {
        self.records
            .iter()
            .filter_map(|r| r.color_group.clone())
            .collect()
    }

    /// Distinct secondary categories in first-seen order
    pub fn categories(&self) -> IndexSet<String> {
        self.records.iter().filter_map(|r| r.category.clone()).collect()
    }

    /// Index of the first record whose key label is `label`
    pub fn index_of_label(&self, label: &str) -> Option<usize> {
        self.records.iter().position(|r| r.key.label() == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_axis_value() {
        assert_eq!(Key::from(3.5).axis_value(), Some(3.5));
        assert_eq!(Key::from("A").axis_value(), None);
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(
            Key::from(date).axis_value().unwrap() - Key::from(date.pred_opt().unwrap()).axis_value().unwrap(),
            1.0
        );
    }

    #[test]
    fn test_key_from_json() {
        let keys: Vec<Key> = serde_json::from_str(r#"[4, "2024-03-01", "North"]"#).unwrap();
        assert_eq!(keys[0], Key::Number(4.0));
        assert_eq!(keys[1], Key::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert_eq!(keys[2], Key::Label("North".to_string()));
    }

    #[test]
    fn test_datum_values() {
        let datum = Datum::new("A", vec![None, Some(2.0)]).with_color_group("g");
        assert_eq!(datum.value(), None);
        assert_eq!(datum.value_at(1), Some(2.0));
        assert_eq!(datum.value_at(5), None);
        assert_eq!(datum.color_group.as_deref(), Some("g"));
    }

    #[test]
    fn test_dataset_groups_in_order() {
        let dataset = Dataset::single_series()
            .with_record(Datum::single("a", 1.0).with_color_group("south"))
            .with_record(Datum::single("b", 2.0).with_color_group("north"))
            .with_record(Datum::single("c", 3.0).with_color_group("south"));
        let color_groups = dataset.color_groups();
        let groups: Vec<&str> = color_groups.iter().map(|s| s.as_str()).collect();
        assert_eq!(groups, vec!["south", "north"]);
        assert_eq!(dataset.index_of_label("c"), Some(2));
        assert_eq!(dataset.key_labels(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_dataset_from_json() {
        let json = r#"{
            "series": ["2023", "2024"],
            "records": [
                {"key": "A", "values": [1, null], "colorGroup": "x"},
                {"key": "B", "values": [2, 3]}
            ]
        }"#;
        let dataset: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records[0].values, vec![Some(1.0), None]);
        assert_eq!(dataset.series_count(), 2);
    }
}
