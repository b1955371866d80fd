//! List Filtering & Sorting
//!
//! Pure in-memory search/filter/sort over fetched collections.
//! Every list page builds a `ListQuery` from its controls and runs it
//! through `apply` inside a memo.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Sort direction toggled by clicking a column header
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Active sort: one key plus a direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub key: &'static str,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(key: &'static str) -> Self {
        Self { key, direction: SortDirection::Asc }
    }

    pub fn desc(key: &'static str) -> Self {
        Self { key, direction: SortDirection::Desc }
    }

    /// Header click: same key flips direction, new key starts ascending
    pub fn toggle(current: Option<SortSpec>, key: &'static str) -> SortSpec {
        match current {
            Some(spec) if spec.key == key => SortSpec { key, direction: spec.direction.flipped() },
            _ => SortSpec::asc(key),
        }
    }
}

/// Comparable value extracted from a record for sorting
#[derive(Clone, Debug, PartialEq)]
pub enum SortKey {
    Text(String),
    Number(f64),
    /// Unix timestamp (seconds)
    Date(i64),
    Missing,
}

impl SortKey {
    pub fn text(value: &str) -> Self {
        SortKey::Text(value.to_lowercase())
    }

    pub fn date(value: Option<&str>) -> Self {
        value.and_then(parse_timestamp).map(SortKey::Date).unwrap_or(SortKey::Missing)
    }

    pub fn opt_text(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.trim().is_empty() => SortKey::text(v),
            _ => SortKey::Missing,
        }
    }

    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (SortKey::Missing, SortKey::Missing) => Ordering::Equal,
            // Missing values sink to the end of an ascending list
            (SortKey::Missing, _) => Ordering::Greater,
            (_, SortKey::Missing) => Ordering::Less,
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::Date(_) => 1,
            SortKey::Text(_) => 2,
            SortKey::Missing => 3,
        }
    }
}

/// Records that can be searched, filtered and sorted by list pages
pub trait Listable {
    /// Fields covered by the free-text search box
    fn search_fields(&self) -> Vec<&str>;

    /// Value compared by an exact-match dropdown filter
    fn filter_value(&self, key: &str) -> Option<String>;

    fn sort_key(&self, key: &str) -> SortKey;
}

/// Search + filters + sort for one list view
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListQuery {
    pub search: String,
    pub filters: Vec<(&'static str, String)>,
    pub sort: Option<SortSpec>,
}

impl ListQuery {
    pub fn new(search: impl Into<String>) -> Self {
        Self { search: search.into(), ..Default::default() }
    }

    /// Add an equality filter; empty values mean "all" and are ignored
    pub fn filter(mut self, key: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.filters.push((key, value));
        }
        self
    }

    pub fn sorted(mut self, sort: Option<SortSpec>) -> Self {
        self.sort = sort;
        self
    }

    pub fn matches<T: Listable>(&self, item: &T) -> bool {
        matches_search(item, &self.search)
            && self
                .filters
                .iter()
                .all(|(key, wanted)| item.filter_value(key).as_deref() == Some(wanted.as_str()))
    }
}

/// Case-insensitive substring match over the record's search fields
pub fn matches_search<T: Listable>(item: &T, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Filter then sort. Descending order is the exact reverse of ascending.
pub fn apply<T: Listable + Clone>(items: &[T], query: &ListQuery) -> Vec<T> {
    let mut result: Vec<T> = items.iter().filter(|item| query.matches(*item)).cloned().collect();
    if let Some(spec) = query.sort {
        sort_items(&mut result, spec);
    }
    result
}

pub fn sort_items<T: Listable>(items: &mut [T], spec: SortSpec) {
    items.sort_by(|a, b| a.sort_key(spec.key).compare(&b.sort_key(spec.key)));
    if spec.direction == SortDirection::Desc {
        items.reverse();
    }
}

/// Distinct non-empty values of a filter field, for populating dropdowns
pub fn distinct_values<T: Listable>(items: &[T], key: &str) -> Vec<String> {
    let mut values: Vec<String> = items
        .iter()
        .filter_map(|item| item.filter_value(key))
        .filter(|v| !v.is_empty())
        .collect();
    values.sort_by_key(|v| v.to_lowercase());
    values.dedup();
    values
}

/// Parse the date formats the API emits: RFC 3339, naive datetime, or plain date
pub fn parse_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc().timestamp());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc().timestamp());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
}

/// Short display form (YYYY-MM-DD) of an API date string
pub fn format_date(value: Option<&str>) -> String {
    match value.and_then(parse_timestamp).and_then(|ts| DateTime::from_timestamp(ts, 0)) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => value.unwrap_or("—").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: u32,
        name: String,
        city: String,
        status: String,
        kind: String,
        amount: f64,
        date: Option<String>,
    }

    impl Listable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name.as_str(), self.city.as_str()]
        }

        fn filter_value(&self, key: &str) -> Option<String> {
            match key {
                "status" => Some(self.status.clone()),
                "kind" => Some(self.kind.clone()),
                _ => None,
            }
        }

        fn sort_key(&self, key: &str) -> SortKey {
            match key {
                "name" => SortKey::text(&self.name),
                "amount" => SortKey::Number(self.amount),
                "date" => SortKey::date(self.date.as_deref()),
                _ => SortKey::Missing,
            }
        }
    }

    fn row(id: u32, name: &str, city: &str, status: &str, kind: &str, amount: f64, date: Option<&str>) -> Row {
        Row {
            id,
            name: name.to_string(),
            city: city.to_string(),
            status: status.to_string(),
            kind: kind.to_string(),
            amount,
            date: date.map(str::to_string),
        }
    }

    fn sample() -> Vec<Row> {
        vec![
            row(1, "Acme Plaza", "Denver", "active", "commercial", 1200.0, Some("2024-01-05")),
            row(2, "birch lane", "Boulder", "inactive", "residential", 80.5, Some("2023-12-01")),
            row(3, "Cedar Court", "denver", "active", "residential", 450.0, None),
            row(4, "Depot North", "Aurora", "lead", "commercial", 450.0, Some("2024-03-10T08:00:00Z")),
            row(5, "elm street", "Golden", "active", "commercial", 0.0, Some("2024-02-01 12:00:00")),
        ]
    }

    fn ids(rows: &[Row]) -> Vec<u32> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_subset() {
        let items = sample();
        let result = apply(&items, &ListQuery::new("DENVER"));
        assert_eq!(ids(&result), vec![1, 3]);
        for r in &result {
            assert!(items.contains(r));
            assert!(r.search_fields().iter().any(|f| f.to_lowercase().contains("denver")));
        }
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let items = sample();
        assert_eq!(apply(&items, &ListQuery::new("   ")).len(), items.len());
    }

    #[test]
    fn test_empty_filter_value_means_all() {
        let query = ListQuery::new("").filter("status", "");
        assert!(query.filters.is_empty());
        assert_eq!(apply(&sample(), &query).len(), 5);
    }

    #[test]
    fn test_combined_filters_are_intersection() {
        let items = sample();
        let by_status = apply(&items, &ListQuery::new("").filter("status", "active"));
        let by_kind = apply(&items, &ListQuery::new("").filter("kind", "commercial"));
        let both = apply(&items, &ListQuery::new("").filter("status", "active").filter("kind", "commercial"));

        let expected: Vec<u32> = ids(&by_status).into_iter().filter(|id| ids(&by_kind).contains(id)).collect();
        assert_eq!(ids(&both), expected);
        assert_eq!(ids(&both), vec![1, 5]);
    }

    #[test]
    fn test_unknown_filter_key_matches_nothing() {
        let result = apply(&sample(), &ListQuery::new("").filter("region", "west"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_text_sort_ignores_case() {
        let result = apply(&sample(), &ListQuery::new("").sorted(Some(SortSpec::asc("name"))));
        assert_eq!(ids(&result), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_descending_is_reverse_of_ascending() {
        for key in ["name", "amount", "date"] {
            let asc = apply(&sample(), &ListQuery::new("").sorted(Some(SortSpec::asc(key))));
            let mut desc = apply(&sample(), &ListQuery::new("").sorted(Some(SortSpec::desc(key))));
            desc.reverse();
            assert_eq!(asc, desc, "key {key}");
        }
    }

    #[test]
    fn test_missing_dates_sort_last_ascending() {
        let result = apply(&sample(), &ListQuery::new("").sorted(Some(SortSpec::asc("date"))));
        assert_eq!(ids(&result), vec![2, 1, 5, 4, 3]);
    }

    #[test]
    fn test_numeric_sort() {
        let result = apply(&sample(), &ListQuery::new("").sorted(Some(SortSpec::asc("amount"))));
        assert_eq!(result[0].id, 5);
        assert_eq!(result[4].id, 1);
    }

    #[test]
    fn test_toggle_sort() {
        let first = SortSpec::toggle(None, "name");
        assert_eq!(first, SortSpec::asc("name"));
        let second = SortSpec::toggle(Some(first), "name");
        assert_eq!(second.direction, SortDirection::Desc);
        let other = SortSpec::toggle(Some(second), "amount");
        assert_eq!(other, SortSpec::asc("amount"));
    }

    #[test]
    fn test_empty_list() {
        let empty: Vec<Row> = Vec::new();
        let query = ListQuery::new("x").filter("status", "active").sorted(Some(SortSpec::asc("name")));
        assert!(apply(&empty, &query).is_empty());
    }

    #[test]
    fn test_distinct_values() {
        assert_eq!(distinct_values(&sample(), "status"), vec!["active", "inactive", "lead"]);
    }

    #[test]
    fn test_parse_and_format_dates() {
        assert_eq!(parse_timestamp("1970-01-02"), Some(86_400));
        assert_eq!(parse_timestamp("1970-01-01T00:01:00Z"), Some(60));
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(format_date(Some("2024-03-10T08:00:00Z")), "2024-03-10");
        assert_eq!(format_date(None), "—");
    }
}
