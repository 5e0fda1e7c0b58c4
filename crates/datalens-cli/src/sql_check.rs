use crate::cli::SqlCheckArgs;
use crate::config::ProjectConfig;
use colored::Colorize;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_BORDERS_ONLY};
use datalens::check::leading_keyword;
use datalens::{Rejection, RunConfig, is_select, split_statements, validate_read_only};
use std::io::Read;

/// Classification of one statement of an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementReport {
    pub position: usize,
    pub keyword: String,
    pub is_select: bool,
    pub preview: String,
}

/// Result of checking one input (a file or stdin).
#[derive(Debug, Clone)]
pub struct SourceReport {
    pub source: String,
    pub statements: Vec<StatementReport>,
    /// Why the input would be refused by the query panel.
    pub rejection: Option<Rejection>,
}

const PREVIEW_CHARS: usize = 60;

pub fn run(args: SqlCheckArgs, project: &ProjectConfig) -> anyhow::Result<()> {
    let mut config = project.run_config();
    if args.allow_writes {
        config = config.read_only(false);
    }

    let mut reports = Vec::new();
    if args.files.is_empty() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| anyhow::anyhow!("failed to read stdin: {e}"))?;
        if buf.trim().is_empty() {
            anyhow::bail!("no SQL provided (pass files or pipe SQL to stdin)");
        }
        reports.push(check_source("stdin", &buf, &config));
    } else {
        for file in &args.files {
            let content = std::fs::read_to_string(file)
                .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", file.display()))?;
            reports.push(check_source(&file.display().to_string(), &content, &config));
        }
    }

    println!("{}", render_table(&reports));

    let mut failed = 0;
    for report in &reports {
        if let Some(rejection) = &report.rejection {
            failed += 1;
            eprintln!("{} {}: {rejection}", "rejected".red().bold(), report.source);
        }
    }
    if failed > 0 {
        anyhow::bail!("sql check failed: {failed} input(s) rejected");
    }

    let total: usize = reports.iter().map(|r| r.statements.len()).sum();
    println!("{} {total} statement(s) accepted", "ok".green().bold());
    Ok(())
}

/// Split and classify one input under the read-only policy.
///
/// Outside read-only mode only empty input is refused.
pub fn check_source(source: &str, sql: &str, config: &RunConfig) -> SourceReport {
    let statements = split_statements(sql);
    let rejection = if config.read_only {
        validate_read_only(&statements)
            .err()
            .and_then(|e| e.rejection().cloned())
    } else if statements.is_empty() {
        Some(Rejection::EmptyInput)
    } else {
        None
    };

    tracing::debug!(
        source,
        statements = statements.len(),
        rejected = rejection.is_some(),
        "checked SQL input"
    );
    for (i, statement) in statements.iter().enumerate() {
        tracing::debug!(
            source,
            index = i + 1,
            sql = %config.log_sql(statement),
            "statement"
        );
    }

    SourceReport {
        source: source.to_string(),
        statements: statements
            .iter()
            .enumerate()
            .map(|(i, s)| StatementReport {
                position: i + 1,
                keyword: leading_keyword(s).unwrap_or_else(|| "-".to_string()),
                is_select: is_select(s),
                preview: preview(s),
            })
            .collect(),
        rejection,
    }
}

fn preview(statement: &str) -> String {
    let flat = statement.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let mut out: String = flat.chars().take(PREVIEW_CHARS).collect();
    out.push_str("...");
    out
}

fn render_table(reports: &[SourceReport]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Source", "#", "Keyword", "Verdict", "Statement"]);

    for report in reports {
        let read_only_failed = matches!(report.rejection, Some(Rejection::NonSelect { .. }));
        for stmt in &report.statements {
            let verdict = if stmt.is_select {
                Cell::new("select").fg(Color::Green)
            } else if read_only_failed {
                Cell::new("not select").fg(Color::Red)
            } else {
                Cell::new("write").fg(Color::Yellow)
            };
            table.add_row(vec![
                Cell::new(&report.source),
                Cell::new(stmt.position),
                Cell::new(&stmt.keyword),
                verdict,
                Cell::new(&stmt.preview),
            ]);
        }
    }
    table
}
