use insight_style::{Length, PageLayout};
use serde::{Deserialize, Serialize};

/// Report-wide settings. Every field has a default, so a partial JSON object
/// such as `{"sectionGap": "0.2in"}` is a valid configuration. Lengths
/// accept points or unit strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportOptions {
    pub page: PageLayout,
    pub title: String,
    pub snapshot_label: String,
    pub detailed_heading: String,
    /// Gap after the overview, the snapshot table and each item's result.
    pub section_gap: Length,
    /// Gap after each item's analysis.
    pub item_gap: Length,
    pub chart_width: Length,
    pub chart_height: Length,
    pub raster_scale: f32,
    pub compact_tables: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            page: PageLayout::default(),
            title: "Data Analysis Report".to_string(),
            snapshot_label: "Initial Data Snapshot:".to_string(),
            detailed_heading: "Detailed Analysis".to_string(),
            section_gap: Length::inches(0.15),
            item_gap: Length::inches(0.25),
            chart_width: Length::inches(5.5),
            chart_height: Length::inches(3.5),
            raster_scale: 2.0,
            compact_tables: true,
        }
    }
}

impl ReportOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The title written to the document metadata.
    pub fn document_title(&self, dataset_name: &str) -> String {
        format!("{} - {}", self.title, dataset_name)
    }
}
