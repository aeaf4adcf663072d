use clap::ValueEnum;
use colored::*;
use stardog_client::{QueryResult, RdfTerm};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// SPARQL JSON results, as returned by the server
    Json,
    /// Aligned columns, one row per solution
    Table,
}

/// Color mode options
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_colorize(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => supports_color::on(supports_color::Stream::Stdout).is_some(),
        }
    }
}

/// Format a single term for a table cell
fn format_term(term: &RdfTerm, colorize: bool) -> String {
    let text = term.to_string();
    if !colorize {
        return text;
    }
    match term {
        RdfTerm::Uri { .. } => text.bright_cyan().to_string(),
        RdfTerm::Bnode { .. } => text.bright_black().to_string(),
        _ => text.green().to_string(),
    }
}

fn pad(cell: &str, visible: usize, width: usize) -> String {
    format!("{}{}", cell, " ".repeat(width.saturating_sub(visible)))
}

/// Render query results as a table.
///
/// Unbound variables are left blank. ASK results print just `true` or
/// `false`.
pub fn format_table(result: &QueryResult, colorize: bool) -> String {
    if let Some(answer) = result.boolean() {
        return answer.to_string();
    }

    let vars = result.vars();
    if vars.is_empty() {
        return format_footer(result.len(), colorize);
    }

    let rows: Vec<Vec<(String, usize)>> = result
        .bindings()
        .iter()
        .map(|binding| {
            vars.iter()
                .map(|var| match binding.get(var) {
                    Some(term) => (format_term(term, colorize), term.to_string().chars().count()),
                    None => (String::new(), 0),
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = vars
        .iter()
        .enumerate()
        .map(|(i, var)| {
            rows.iter()
                .map(|row| row[i].1)
                .chain(std::iter::once(var.chars().count() + 1))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 3);

    let header: Vec<String> = vars
        .iter()
        .zip(&widths)
        .map(|(var, width)| {
            let name = format!("?{}", var);
            let visible = name.chars().count();
            let name = if colorize { name.bold().to_string() } else { name };
            pad(&name, visible, *width)
        })
        .collect();
    lines.push(header.join(" | ").trim_end().to_string());

    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    lines.push(rule.join("-+-"));

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|((cell, visible), width)| pad(cell, *visible, *width))
            .collect();
        lines.push(cells.join(" | ").trim_end().to_string());
    }

    lines.push(format_footer(rows.len(), colorize));
    lines.join("\n")
}

fn format_footer(count: usize, colorize: bool) -> String {
    let text = match count {
        1 => "1 row".to_string(),
        n => format!("{} rows", n),
    };
    if colorize {
        text.dimmed().to_string()
    } else {
        text
    }
}
