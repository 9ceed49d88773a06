//! Run summary shown at the end of the pipeline

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

/// Summary of one EDA run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub rows: usize,
    pub columns: usize,
    /// Columns present after the derived columns were appended
    pub final_columns: usize,
    pub alcohol_rewritten: usize,
    pub missing_after_cleaning: usize,
    pub artifacts: Vec<String>,
    pub load_time: Option<Duration>,
    pub analysis_time: Option<Duration>,
    pub render_time: Option<Duration>,
}

impl RunSummary {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            final_columns: columns,
            ..Default::default()
        }
    }

    pub fn set_cleaning(&mut self, rewritten: usize, missing_after: usize) {
        self.alcohol_rewritten = rewritten;
        self.missing_after_cleaning = missing_after;
    }

    pub fn set_final_columns(&mut self, columns: usize) {
        self.final_columns = columns;
    }

    pub fn add_artifact(&mut self, file_name: &str) {
        self.artifacts.push(file_name.to_string());
    }

    pub fn set_load_time(&mut self, elapsed: Duration) {
        self.load_time = Some(elapsed);
    }

    pub fn set_analysis_time(&mut self, elapsed: Duration) {
        self.analysis_time = Some(elapsed);
    }

    pub fn set_render_time(&mut self, elapsed: Duration) {
        self.render_time = Some(elapsed);
    }

    pub fn total_time(&self) -> Duration {
        [self.load_time, self.analysis_time, self.render_time]
            .iter()
            .flatten()
            .sum()
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("RUN SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📁 Rows"), Cell::new(self.rows)]);
        table.add_row(vec![
            Cell::new("📐 Columns (loaded / final)"),
            Cell::new(format!("{} / {}", self.columns, self.final_columns)),
        ]);
        table.add_row(vec![
            Cell::new("🍷 Alcohol values filled"),
            Cell::new(self.alcohol_rewritten),
        ]);
        table.add_row(vec![
            Cell::new("❔ Missing after cleaning"),
            Cell::new(self.missing_after_cleaning).fg(if self.missing_after_cleaning == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        table.add_row(vec![
            Cell::new("🖼️  Artifacts written"),
            Cell::new(self.artifacts.len())
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("⏱️  Total time"),
            Cell::new(format_duration(self.total_time())),
        ]);

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.artifacts.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("📝").cyan(),
                style("ARTIFACTS").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            for name in &self.artifacts {
                println!("        {} {}", style("•").dim(), name);
            }
        }
    }
}

/// Format a duration as seconds with millisecond precision, or minutes
/// and seconds past one minute
pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 60.0 {
        format!("{:.3}s", secs)
    } else {
        let minutes = (secs / 60.0).floor();
        format!("{}m {:.1}s", minutes as u64, secs - minutes * 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_time_sums_recorded_steps() {
        let mut summary = RunSummary::new(10, 3);
        summary.set_load_time(Duration::from_millis(200));
        summary.set_render_time(Duration::from_millis(300));
        assert_eq!(summary.total_time(), Duration::from_millis(500));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.500s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30.0s");
    }
}
