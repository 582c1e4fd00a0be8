//! The report cart: analysis results the user chose to keep, in the order
//! they were added.

use crate::chart::Figure;
use insight_types::{CellValue, Series, Table};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// How an item's result is rendered in the report body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Plot,
    Data,
    Value,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Plot => "plot",
            ItemKind::Data => "data",
            ItemKind::Value => "value",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub enum ItemResult {
    Table(Table),
    Figure(Arc<dyn Figure>),
    Scalar(CellValue),
}

impl ItemResult {
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemResult::Table(_) => ItemKind::Data,
            ItemResult::Figure(_) => ItemKind::Plot,
            ItemResult::Scalar(_) => ItemKind::Value,
        }
    }
}

impl From<Table> for ItemResult {
    fn from(table: Table) -> Self {
        ItemResult::Table(table)
    }
}

impl From<Series> for ItemResult {
    fn from(series: Series) -> Self {
        ItemResult::Table(Table::from(series))
    }
}

impl From<CellValue> for ItemResult {
    fn from(value: CellValue) -> Self {
        ItemResult::Scalar(value)
    }
}

impl<F: Figure + 'static> From<Arc<F>> for ItemResult {
    fn from(figure: Arc<F>) -> Self {
        ItemResult::Figure(figure)
    }
}

/// One accepted analysis result. Immutable once created; the kind is fixed
/// by the result variant at construction.
#[derive(Debug, Clone)]
pub struct ReportItem {
    query: String,
    code: String,
    result: ItemResult,
    analysis: String,
    kind: ItemKind,
}

impl ReportItem {
    pub fn new(
        query: impl Into<String>,
        code: impl Into<String>,
        result: impl Into<ItemResult>,
        analysis: impl Into<String>,
    ) -> Self {
        let result = result.into();
        Self {
            query: query.into(),
            code: code.into(),
            kind: result.kind(),
            result,
            analysis: analysis.into(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The code that produced the result. Kept for reference; never rendered.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn result(&self) -> &ItemResult {
        &self.result
    }

    /// Markdown narrative accompanying the result.
    pub fn analysis(&self) -> &str {
        &self.analysis
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }
}

/// Append-only ordered collection of report items.
#[derive(Debug, Clone, Default)]
pub struct ReportCart {
    items: Vec<ReportItem>,
}

impl ReportCart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: ReportItem) {
        log::debug!(
            "Added {} item #{} to the report cart.",
            item.kind(),
            self.items.len() + 1
        );
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReportItem> {
        self.items.iter()
    }

    pub fn items(&self) -> &[ReportItem] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a ReportCart {
    type Item = &'a ReportItem;
    type IntoIter = std::slice::Iter<'a, ReportItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::PngFigure;

    #[test]
    fn test_kind_follows_result_variant() {
        let table = Table::new(vec!["a".into()], vec![vec![1.into()]]).unwrap();
        assert_eq!(ReportItem::new("q", "", table, "").kind(), ItemKind::Data);
        let series = Series::new("total", vec![2.into()]);
        assert_eq!(ReportItem::new("q", "", series, "").kind(), ItemKind::Data);
        assert_eq!(
            ReportItem::new("q", "", CellValue::from(42), "").kind(),
            ItemKind::Value
        );
        let figure = Arc::new(PngFigure::new(vec![1, 2, 3]));
        assert_eq!(ReportItem::new("q", "", figure, "").kind(), ItemKind::Plot);
    }

    #[test]
    fn test_cart_preserves_insertion_order() {
        let mut cart = ReportCart::new();
        assert!(cart.is_empty());
        for q in ["first", "second", "third"] {
            cart.push(ReportItem::new(q, "result = 1", CellValue::from(1), ""));
        }
        let queries: Vec<&str> = cart.iter().map(|i| i.query()).collect();
        assert_eq!(queries, ["first", "second", "third"]);
        assert_eq!(cart.len(), 3);
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ItemKind::Plot).unwrap(), "\"plot\"");
        let kind: ItemKind = serde_json::from_str("\"value\"").unwrap();
        assert_eq!(kind, ItemKind::Value);
    }
}
