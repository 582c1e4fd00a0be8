//! Prompt builders for the text-generation service, and the adapter that
//! turns a generic generator into a section-title generator.

use crate::assembler::TitleGenerator;
use crate::error::GenerationError;
use insight_types::Table;

/// System instruction for the analysis model.
pub const ANALYSIS_SYSTEM_INSTRUCTION: &str = "You are an expert data analyst creating professional business reports with clear, structured analysis.";

/// The question asked of the dataset as a whole for the report overview.
pub const OVERVIEW_QUESTION: &str = "What is this data about? Give a one-sentence summary.";

/// Rows shown in the overview context and the snapshot table.
pub const SNAPSHOT_ROWS: usize = 5;

/// A black-box text generator, typically a hosted language model.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

impl<F> TextGenerator for F
where
    F: Fn(&str) -> Result<String, GenerationError>,
{
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self(prompt)
    }
}

pub fn title_prompt(query: &str) -> String {
    format!(
        r#"You are a professional report editor.
A user asked the following query: "{query}"

Generate a short, human-readable section heading for a business report based on this query.
Do not include "Analysis of" or "Chart of". Just the title.

Example 1:
Query: "Plot the profit (sales - cost) for each product"
Title: "Product Profitability"

Example 2:
Query: "What is the average sales for each region?"
Title: "Average Sales by Region"

Example 3:
Query: "Show the first 5 rows"
Title: "Data Sample"

Title:
"#
    )
}

/// Trims whitespace, then any surrounding double quotes.
pub fn clean_title(raw: &str) -> String {
    raw.trim().trim_matches('"').to_string()
}

/// Asks a [`TextGenerator`] for section titles using [`title_prompt`].
///
/// A reply that is empty after cleaning counts as a failure, so the caller
/// falls back to the raw query.
#[derive(Debug, Clone)]
pub struct PromptedTitles<G> {
    generator: G,
}

impl<G: TextGenerator> PromptedTitles<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }
}

impl<G: TextGenerator> TitleGenerator for PromptedTitles<G> {
    fn generate_title(&self, query: &str) -> Result<String, GenerationError> {
        let raw = self.generator.generate(&title_prompt(query))?;
        let title = clean_title(&raw);
        if title.is_empty() {
            return Err(GenerationError("generator returned an empty title".into()));
        }
        Ok(title)
    }
}

/// Describes a dataset for the analysis model: its first rows and the
/// storage type of every column.
pub fn overview_context(table: &Table) -> String {
    let types = table.column_types();
    let name_width = table
        .columns()
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0);
    let type_width = types.iter().map(|t| t.as_str().len()).max().unwrap_or(0);
    let dtypes: Vec<String> = table
        .columns()
        .iter()
        .zip(&types)
        .map(|(name, ty)| {
            format!(
                "{:<nw$}    {:>tw$}",
                name,
                ty.as_str(),
                nw = name_width,
                tw = type_width
            )
        })
        .collect();
    format!(
        "Data Head:\n{}\n\nData Types:\n{}",
        table.head(SNAPSHOT_ROWS).to_text(),
        dtypes.join("\n")
    )
}

pub fn analysis_prompt(question: &str, data_context: &str) -> String {
    format!(
        r#"You are a professional data analyst writing a key insight for a business report.
A user asked: "{question}"
Here is the data:
---
{data_context}
---
Based ONLY on this data, write a professional analysis using the following template.

CRITICAL RULES:
- You MUST use the exact headings below in your response.
- You MUST use markdown (like **bold** or bullet points).
- DO NOT suggest new queries, future prompts, or 'Future Analysis Suggestions'.

### Key Finding
(Start with a single **bolded sentence** that states the most important insight.)

### Detailed Analysis
(Write 1-2 paragraphs explaining *why* this insight is true, referencing the data.)

### Business Impact
(Write 1-2 bullet points explaining what this insight means for a business.)

### Recommendations
(Write 2-3 bullet points suggesting visuals of the dataset's exact columns to explore next.)
"#
    )
}

/// The analysis prompt for the report overview.
pub fn overview_prompt(table: &Table) -> String {
    analysis_prompt(OVERVIEW_QUESTION, &overview_context(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_types::CellValue;

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("  \"Average Sales by Region\"\n"), "Average Sales by Region");
        assert_eq!(clean_title("Data Sample"), "Data Sample");
        assert_eq!(clean_title(" \"\" "), "");
    }

    #[test]
    fn test_title_prompt_embeds_query() {
        let prompt = title_prompt("Plot sales by month");
        assert!(prompt.contains(r#"A user asked the following query: "Plot sales by month""#));
        assert!(prompt.contains(r#"Do not include "Analysis of" or "Chart of"."#));
        assert!(prompt.trim_end().ends_with("Title:"));
    }

    #[test]
    fn test_prompted_titles_clean_and_reject_empty() {
        let titles = PromptedTitles::new(|prompt: &str| -> Result<String, GenerationError> {
            assert!(prompt.contains("monthly revenue"));
            Ok(" \"Monthly Revenue\" ".to_string())
        });
        assert_eq!(
            titles.generate_title("show monthly revenue").unwrap(),
            "Monthly Revenue"
        );

        let blank = PromptedTitles::new(|_: &str| -> Result<String, GenerationError> {
            Ok("\"\"".to_string())
        });
        assert!(blank.generate_title("anything").is_err());
    }

    #[test]
    fn test_overview_context() {
        let table = Table::new(
            vec!["region".into(), "sales".into()],
            vec![
                vec!["North".into(), 10.5.into()],
                vec!["South".into(), CellValue::Null],
            ],
        )
        .unwrap();
        let context = overview_context(&table);
        assert!(context.starts_with("Data Head:\n"));
        assert!(context.contains("0   North   10.5"));
        assert!(context.ends_with("Data Types:\nregion     object\nsales     float64"));
    }

    #[test]
    fn test_analysis_prompt_sections() {
        let prompt = overview_prompt(&Table::default());
        for heading in [
            "### Key Finding",
            "### Detailed Analysis",
            "### Business Impact",
            "### Recommendations",
        ] {
            assert!(prompt.contains(heading), "missing {heading}");
        }
        assert!(prompt.contains(OVERVIEW_QUESTION));
    }
}
