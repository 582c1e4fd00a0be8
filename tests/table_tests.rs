mod common;

use common::fixtures::*;
use common::pdf_assertions::extract_page_texts;
use common::{TestResult, generate_report, section_titles};
use insight_idf::{Block, GridTable, RowRole};
use insight_layout::LayoutConfig;
use insight_report::{CellValue, ReportAssembler, Series, Table, TableLayoutEngine};
use insight_types::Color;

fn engine() -> TableLayoutEngine {
    TableLayoutEngine::new(
        &ReportAssembler::default().stylesheet(),
        LayoutConfig::default(),
    )
}

fn grid(block: Block) -> GridTable {
    match block {
        Block::Table(grid) => grid,
        other => panic!("expected a table block, got {}", other.kind()),
    }
}

#[test]
fn test_column_widths_fill_content_width() {
    let engine = engine();
    for columns in 1..=14 {
        let names: Vec<String> = (0..columns).map(|i| format!("column_{i}")).collect();
        let row: Vec<CellValue> = (0..columns)
            .map(|i| CellValue::from("x".repeat(i * 7 + 1)))
            .collect();
        let table = Table::new(names, vec![row]).unwrap();
        let widths = grid(engine.layout(&table, true)).column_widths;
        let total: f32 = widths.iter().sum();
        assert_eq!(widths.len(), columns);
        assert!(
            (total - 540.0).abs() < 0.01,
            "{columns} columns sum to {total}"
        );
    }
}

#[test]
fn test_zero_columns_give_empty_grid() {
    let table = Table::new(vec![], vec![]).unwrap();
    let grid = grid(engine().layout(&table, true));
    assert!(grid.is_empty());
    assert!(grid.rows.is_empty());
}

#[test]
fn test_cell_text_respects_cap() {
    let engine = engine();
    let long = CellValue::from("a".repeat(250));
    let compact = engine.format_cell(&long, true);
    let full = engine.format_cell(&long, false);
    assert_eq!(compact.chars().count(), 40);
    assert!(compact.ends_with("..."));
    assert_eq!(full.chars().count(), 100);
    assert_eq!(engine.format_cell(&CellValue::from("a".repeat(40)), true).len(), 40);
    assert_eq!(engine.format_cell(&CellValue::Float(f64::NAN), true), "");
}

#[test]
fn test_three_by_five_with_null() {
    let grid = grid(engine().layout(&table_with_null(), true));

    assert_eq!(grid.rows.len(), 6);
    assert_eq!(grid.header_rows, 1);
    let header: Vec<&str> = grid.rows[0].cells.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(header, ["region", "sales", "units"]);
    assert_eq!(grid.rows[3].cells[1].text, "");
    assert_eq!(grid.rows[3].cells[0].text, "East");
    assert_eq!(grid.rows[1].cells[1].text, "1000.0");
}

#[test]
fn test_header_and_zebra_backgrounds() {
    let grid = grid(engine().layout(&sales_table(4), true));

    assert_eq!(grid.rows[0].role, RowRole::Header);
    assert_eq!(grid.rows[0].background, Some(Color::rgb(0x2F, 0x4F, 0x4F)));
    let body: Vec<Option<Color>> = grid.body().iter().map(|r| r.background).collect();
    assert_eq!(
        body,
        [
            Some(Color::WHITE),
            Some(Color::WHITE_SMOKE),
            Some(Color::WHITE),
            Some(Color::WHITE_SMOKE)
        ]
    );
}

#[test]
fn test_series_is_one_column() {
    let series = Series::new("total", vec![1.into(), CellValue::Null, 3.into()]);
    let grid = grid(engine().layout_series(&series, false));
    assert_eq!(grid.column_widths.len(), 1);
    assert_eq!(grid.rows.len(), 4);
    assert_eq!(grid.rows[2].cells[0].text, "");
}

#[test]
fn test_long_cells_wrap_and_grow_rows() {
    let columns: Vec<String> = (0..6).map(|i| format!("c{i}")).collect();
    let comment = "a considerably longer free text comment that cannot fit";
    let table = Table::new(
        columns,
        vec![
            (0..6).map(|_| CellValue::from("a")).collect(),
            (0..6).map(|_| CellValue::from(comment)).collect(),
        ],
    )
    .unwrap();
    let grid = grid(engine().layout(&table, true));
    let short = &grid.rows[1];
    let long = &grid.rows[2];
    assert_eq!(short.cells[0].lines.len(), 1);
    assert!(long.cells[0].lines.len() > 1);
    assert!(long.height > short.height);
    assert!(long.cells[0].text.ends_with("..."));
}

#[test]
fn test_header_repeats_on_continuation_pages() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let items = vec![data_item("all rows", sales_table(90), "Everything.")];
    let pdf = generate_report("sales.csv", "", &sales_table(1), &items, &section_titles)?;
    let pages = extract_page_texts(&pdf.doc);

    assert!(pages.len() >= 3, "expected a multi-page table, got {}", pages.len());
    for (i, page) in pages.iter().enumerate().skip(1) {
        if page.contains("North") {
            assert!(page.contains("region"), "page {} lacks the header:\n{page}", i + 1);
            assert!(page.contains("units"), "page {} lacks the header:\n{page}", i + 1);
        }
    }
    Ok(())
}
