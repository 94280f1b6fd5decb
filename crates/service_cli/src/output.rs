//! Output formatting (table and JSON)

use std::fmt::Write as _;
use std::str::FromStr;

use crate::CliError;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: table, json",
                other
            ))),
        }
    }
}

/// Two-column key/value table with box-drawing borders.
#[derive(Debug, Default)]
pub struct Table {
    title: String,
    rows: Vec<(String, String)>,
}

impl Table {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.rows.push((key.into(), value.into()));
        self
    }

    pub fn render(&self) -> String {
        let key_width = self
            .rows
            .iter()
            .map(|(k, _)| k.chars().count())
            .max()
            .unwrap_or(0)
            .max(self.title.chars().count());
        let value_width = self
            .rows
            .iter()
            .map(|(_, v)| v.chars().count())
            .max()
            .unwrap_or(0);

        let bar = |left: &str, mid: &str, right: &str| {
            format!(
                "{}{}{}{}{}\n",
                left,
                "─".repeat(key_width + 2),
                mid,
                "─".repeat(value_width + 2),
                right
            )
        };

        let mut out = String::new();
        out.push_str(&bar("┌", "┬", "┐"));
        let _ = writeln!(
            out,
            "│ {:<kw$} │ {:>vw$} │",
            self.title,
            "",
            kw = key_width,
            vw = value_width
        );
        out.push_str(&bar("├", "┼", "┤"));
        for (key, value) in &self.rows {
            let _ = writeln!(
                out,
                "│ {:<kw$} │ {:>vw$} │",
                key,
                value,
                kw = key_width,
                vw = value_width
            );
        }
        out.push_str(&bar("└", "┴", "┘"));
        out
    }
}

/// `$1,234.56`
pub fn money(value: f64) -> String {
    let cents = format!("{:.2}", value.abs());
    let (int_part, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac)
}

/// `5.00%`
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}
