use crate::cart::{ItemResult, ReportItem};
use crate::chart::ChartRasterizer;
use crate::error::{GenerationError, ReportError};
use crate::markup::translate;
use crate::options::ReportOptions;
use insight_idf::{Block, ParagraphBlock};
use insight_layout::{LayoutConfig, Paginator, TableLayoutEngine};
use insight_render_lopdf::{DocumentInfo, LopdfDocumentRenderer};
use insight_style::stylesheet::{
    ANALYSIS_TEXT, BODY_TEXT, HEADING_1, MAIN_TITLE, SECTION_TITLE,
};
use insight_style::{ParagraphStyle, Stylesheet};
use insight_types::Table;
use std::sync::Arc;

/// Turns a user query into a section heading.
pub trait TitleGenerator {
    fn generate_title(&self, query: &str) -> Result<String, GenerationError>;
}

impl<F> TitleGenerator for F
where
    F: Fn(&str) -> Result<String, GenerationError>,
{
    fn generate_title(&self, query: &str) -> Result<String, GenerationError> {
        self(query)
    }
}

/// Builds the report body from the dataset overview and the cart items, then
/// paginates and serializes it.
#[derive(Debug, Clone, Default)]
pub struct ReportAssembler {
    options: ReportOptions,
    layout_config: LayoutConfig,
}

struct Styles {
    main_title: Arc<ParagraphStyle>,
    section_title: Arc<ParagraphStyle>,
    heading: Arc<ParagraphStyle>,
    body: Arc<ParagraphStyle>,
    analysis: Arc<ParagraphStyle>,
}

impl Styles {
    fn resolve(sheet: &Stylesheet) -> Result<Self, ReportError> {
        Ok(Self {
            main_title: sheet.get_style(MAIN_TITLE)?.clone(),
            section_title: sheet.get_style(SECTION_TITLE)?.clone(),
            heading: sheet.get_style(HEADING_1)?.clone(),
            body: sheet.get_style(BODY_TEXT)?.clone(),
            analysis: sheet.get_style(ANALYSIS_TEXT)?.clone(),
        })
    }
}

impl ReportAssembler {
    pub fn new(options: ReportOptions) -> Self {
        Self {
            options,
            layout_config: LayoutConfig::default(),
        }
    }

    pub fn with_layout_config(mut self, config: LayoutConfig) -> Self {
        self.layout_config = config;
        self
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// A fresh stylesheet for one report.
    pub fn stylesheet(&self) -> Stylesheet {
        Stylesheet::report_default(self.options.page)
    }

    fn rasterizer(&self) -> ChartRasterizer {
        ChartRasterizer::new(
            self.options.raster_scale,
            self.options.chart_width.points(),
            self.options.chart_height.points(),
        )
    }

    /// Builds the ordered block sequence of the report body.
    ///
    /// Title generation and chart rasterization failures are recovered per
    /// item: the raw query becomes the title and a failed chart is omitted.
    pub fn build_story<T>(
        &self,
        stylesheet: &Stylesheet,
        dataset_name: &str,
        overview: &str,
        snapshot: &Table,
        items: &[ReportItem],
        titles: &T,
    ) -> Result<Vec<Block>, ReportError>
    where
        T: TitleGenerator + ?Sized,
    {
        let styles = Styles::resolve(stylesheet)?;
        let tables = TableLayoutEngine::new(stylesheet, self.layout_config);
        let charts = self.rasterizer();
        let compact = self.options.compact_tables;
        let section_gap = self.options.section_gap.points();
        let item_gap = self.options.item_gap.points();

        let plain = |style: &Arc<ParagraphStyle>, text: &str| {
            Block::Paragraph(ParagraphBlock::plain(style.clone(), text))
        };
        let narrative = |markdown: &str| {
            Block::Paragraph(ParagraphBlock::from_markup(
                styles.analysis.clone(),
                &translate(markdown),
            ))
        };

        let mut story = vec![
            plain(&styles.main_title, &self.options.title),
            plain(&styles.section_title, &format!("Dataset: {dataset_name}")),
            narrative(overview),
            Block::spacer(section_gap),
            plain(&styles.analysis, &self.options.snapshot_label),
            tables.layout(snapshot, compact),
            Block::spacer(section_gap),
            plain(&styles.heading, &self.options.detailed_heading),
        ];

        for (index, item) in items.iter().enumerate() {
            let title = match titles.generate_title(item.query()) {
                Ok(title) => title,
                Err(e) => {
                    log::warn!(
                        "Title generation failed for item {}; using the query instead: {}",
                        index + 1,
                        e
                    );
                    item.query().to_string()
                }
            };
            story.push(plain(&styles.section_title, &title));

            match item.result() {
                ItemResult::Figure(figure) => match charts.rasterize(figure.as_ref()) {
                    Ok(block) => story.push(block),
                    Err(e) => log::warn!(
                        "Chart for item {} ({}) was omitted: {}",
                        index + 1,
                        item.query(),
                        e
                    ),
                },
                ItemResult::Table(table) => story.push(tables.layout(table, compact)),
                ItemResult::Scalar(value) => story.push(plain(&styles.body, &value.to_string())),
            }

            story.push(Block::spacer(section_gap));
            story.push(narrative(item.analysis()));
            story.push(Block::spacer(item_gap));
        }

        log::debug!(
            "Built report story with {} blocks for {} items.",
            story.len(),
            items.len()
        );
        Ok(story)
    }

    /// Assembles the complete report and returns the PDF bytes.
    pub fn assemble<T>(
        &self,
        dataset_name: &str,
        overview: &str,
        snapshot: &Table,
        items: &[ReportItem],
        titles: &T,
    ) -> Result<Vec<u8>, ReportError>
    where
        T: TitleGenerator + ?Sized,
    {
        let stylesheet = self.stylesheet();
        let story = self.build_story(&stylesheet, dataset_name, overview, snapshot, items, titles)?;
        let pages = Paginator::new(stylesheet.page).paginate(&story)?;
        log::debug!("Paginated report into {} pages.", pages.len());
        let info = DocumentInfo::new(self.options.document_title(dataset_name));
        Ok(LopdfDocumentRenderer::render_document(
            &stylesheet.page,
            &pages,
            &info,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Figure, PngFigure};
    use crate::error::ExportError;
    use insight_types::CellValue;

    #[derive(Debug)]
    struct FailingFigure;

    impl Figure for FailingFigure {
        fn to_png(&self, _scale: f32) -> Result<Vec<u8>, ExportError> {
            Err(ExportError::Failed("no renderer".into()))
        }
    }

    fn echo(query: &str) -> Result<String, GenerationError> {
        Ok(format!("Title: {query}"))
    }

    fn snapshot() -> Table {
        Table::new(
            vec!["region".into(), "sales".into()],
            vec![vec!["North".into(), 12.into()]],
        )
        .unwrap()
    }

    fn paragraph_text(block: &Block) -> Option<String> {
        match block {
            Block::Paragraph(p) => Some(p.plain_text()),
            _ => None,
        }
    }

    fn story(items: &[ReportItem], titles: &dyn TitleGenerator) -> Vec<Block> {
        let assembler = ReportAssembler::default();
        assembler
            .build_story(
                &assembler.stylesheet(),
                "sales.csv",
                "**Sales** by region",
                &snapshot(),
                items,
                titles,
            )
            .unwrap()
    }

    #[test]
    fn test_preamble_order() {
        let blocks = story(&[], &echo);
        let kinds: Vec<&str> = blocks.iter().map(Block::kind).collect();
        assert_eq!(
            kinds,
            [
                "paragraph", "paragraph", "paragraph", "spacer", "paragraph", "table", "spacer",
                "paragraph"
            ]
        );
        assert_eq!(paragraph_text(&blocks[0]).unwrap(), "Data Analysis Report");
        assert_eq!(paragraph_text(&blocks[1]).unwrap(), "Dataset: sales.csv");
        assert_eq!(paragraph_text(&blocks[2]).unwrap(), "Sales by region");
        assert_eq!(paragraph_text(&blocks[4]).unwrap(), "Initial Data Snapshot:");
        assert_eq!(paragraph_text(&blocks[7]).unwrap(), "Detailed Analysis");
        assert_eq!(blocks[3], Block::spacer(insight_types::inch(0.15)));
    }

    #[test]
    fn test_item_sections_follow_cart_order() {
        let items = vec![
            ReportItem::new("first", "", CellValue::from(1), "one"),
            ReportItem::new("second", "", snapshot(), "two"),
            ReportItem::new("third", "", CellValue::from("x"), "three"),
        ];
        let blocks = story(&items, &echo);
        let section_titles: Vec<String> = blocks[8..]
            .chunks(5)
            .map(|chunk| paragraph_text(&chunk[0]).unwrap())
            .collect();
        assert_eq!(
            section_titles,
            ["Title: first", "Title: second", "Title: third"]
        );
        assert_eq!(blocks[8 + 5 + 1].kind(), "table");
        assert_eq!(blocks.len(), 8 + 3 * 5);
    }

    #[test]
    fn test_title_failure_falls_back_to_query() {
        let failing = |_: &str| -> Result<String, GenerationError> { Err("quota exceeded".into()) };
        let items = vec![ReportItem::new("total <b>sales</b>", "", CellValue::from(3), "")];
        let blocks = story(&items, &failing);
        assert_eq!(paragraph_text(&blocks[8]).unwrap(), "total <b>sales</b>");
    }

    #[test]
    fn test_failed_chart_is_omitted() {
        let items = vec![ReportItem::new("plot", "", Arc::new(FailingFigure), "analysis")];
        let blocks = story(&items, &echo);
        let tail: Vec<&str> = blocks[8..].iter().map(Block::kind).collect();
        assert_eq!(tail, ["paragraph", "spacer", "paragraph", "spacer"]);
    }

    #[test]
    fn test_broken_png_is_omitted_too() {
        let items = vec![ReportItem::new(
            "plot",
            "",
            Arc::new(PngFigure::new(b"garbage".to_vec())),
            "",
        )];
        let blocks = story(&items, &echo);
        assert!(blocks.iter().all(|b| b.kind() != "image"));
    }

    #[test]
    fn test_custom_layout_config_reaches_tables() {
        let config = LayoutConfig {
            compact_cell_chars: 4,
            ..LayoutConfig::default()
        };
        let assembler = ReportAssembler::default().with_layout_config(config);
        let blocks = assembler
            .build_story(&assembler.stylesheet(), "sales.csv", "", &snapshot(), &[], &echo)
            .unwrap();
        let Block::Table(grid) = &blocks[5] else {
            panic!("expected the snapshot table");
        };
        assert_eq!(grid.rows[1].cells[0].text, "N...");
        assert_eq!(grid.rows[1].cells[1].text, "12");
    }

    #[test]
    fn test_scalar_is_plain_body_text() {
        let items = vec![ReportItem::new("q", "", CellValue::from("<i>raw</i>"), "")];
        let blocks = story(&items, &echo);
        let Block::Paragraph(p) = &blocks[9] else {
            panic!("expected the scalar paragraph");
        };
        assert_eq!(p.style.name, BODY_TEXT);
        assert_eq!(p.plain_text(), "<i>raw</i>");
    }
}
