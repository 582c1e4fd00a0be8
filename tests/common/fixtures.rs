use image::{ImageFormat, Rgba, RgbaImage};
use insight_report::{CellValue, Figure, PngFigure, ReportItem, Series, Table};
use std::io::Cursor;
use std::sync::Arc;

pub const OVERVIEW: &str = "### Key Finding\n**Sales are concentrated in the North.**\n\n### Business Impact\n\n* Stock the northern stores first\n* Review *southern* pricing\n";

/// A three column sales table with `rows` rows.
pub fn sales_table(rows: usize) -> Table {
    let regions = ["North", "South", "East", "West"];
    Table::new(
        vec!["region".into(), "sales".into(), "units".into()],
        (0..rows)
            .map(|i| {
                vec![
                    CellValue::from(regions[i % regions.len()]),
                    CellValue::from(1000.0 + i as f64 * 12.5),
                    CellValue::from(i as i64 * 3),
                ]
            })
            .collect(),
    )
    .expect("rectangular fixture")
}

/// Three columns, five rows, one missing value in the middle.
pub fn table_with_null() -> Table {
    let mut rows: Vec<Vec<CellValue>> = sales_table(5).rows().to_vec();
    rows[2][1] = CellValue::Null;
    Table::new(sales_table(0).columns().to_vec(), rows).expect("rectangular fixture")
}

/// `columns` text columns whose names are `name_len` characters long.
pub fn wide_table(columns: usize, name_len: usize, rows: usize) -> Table {
    let names: Vec<String> = (0..columns)
        .map(|i| format!("{:0>width$}", format!("metric_{i}"), width = name_len))
        .collect();
    Table::new(
        names,
        (0..rows)
            .map(|r| (0..columns).map(|c| CellValue::from(format!("reading {r}-{c} ok"))).collect())
            .collect(),
    )
    .expect("rectangular fixture")
}

/// Encodes a small gradient as PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 255 / width.max(1)) as u8, (y * 255 / height.max(1)) as u8, 128, 255])
    });
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)
        .expect("PNG encoding of an in-memory image");
    bytes.into_inner()
}

pub fn chart(width: u32, height: u32) -> Arc<PngFigure> {
    Arc::new(PngFigure::new(png_bytes(width, height)))
}

/// A figure whose export always fails.
#[derive(Debug)]
pub struct BrokenChart;

impl Figure for BrokenChart {
    fn to_png(&self, _scale: f32) -> Result<Vec<u8>, insight_report::ExportError> {
        Err(insight_report::ExportError::Failed("kaleido is not installed".into()))
    }
}

pub fn value_item(query: &str, value: impl Into<CellValue>, analysis: &str) -> ReportItem {
    ReportItem::new(query, "result = df['sales'].sum()", value.into(), analysis)
}

pub fn data_item(query: &str, table: Table, analysis: &str) -> ReportItem {
    ReportItem::new(query, "result = df.head()", table, analysis)
}

pub fn series_item(query: &str, series: Series, analysis: &str) -> ReportItem {
    ReportItem::new(query, "result = df['sales']", series, analysis)
}

pub fn plot_item(query: &str, analysis: &str) -> ReportItem {
    ReportItem::new(query, "result = px.bar(df)", chart(40, 25), analysis)
}

pub fn broken_plot_item(query: &str, analysis: &str) -> ReportItem {
    ReportItem::new(query, "result = px.bar(df)", Arc::new(BrokenChart), analysis)
}
