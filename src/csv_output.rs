//! CSV output format for spreadsheet analysis and machine parsing

use crate::measure::CompileMeasure;

/// CSV report over the final ranking
#[derive(Debug, Default)]
pub struct CsvReport {
    rows: Vec<CsvRow>,
}

#[derive(Debug, Clone)]
struct CsvRow {
    time_ms: f64,
    file: String,
    location: String,
    code: String,
}

impl CsvReport {
    pub fn from_measures(measures: &[CompileMeasure]) -> Self {
        Self {
            rows: measures
                .iter()
                .map(|m| CsvRow {
                    time_ms: m.time,
                    file: m.file_name().to_string(),
                    location: m.location().to_string(),
                    code: m.code.clone(),
                })
                .collect(),
        }
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::from("time_ms,file,location,code\n");
        for row in &self.rows {
            output.push_str(&format!(
                "{:.1},{},{},{}\n",
                row.time_ms,
                Self::escape_field(&row.file),
                Self::escape_field(&row.location),
                Self::escape_field(&row.code),
            ));
        }
        output
    }
}
