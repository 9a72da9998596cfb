use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::commands::{CommandReport, GuideContext, rule};
use crate::error::GuideError;
use crate::guide::categories::Categories;

/// Line that ends interactive content entry.
const END_MARKER: &str = "END";

#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub title: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
    pub content_file: Option<PathBuf>,
}

impl CreateOptions {
    fn is_fully_specified(&self) -> bool {
        self.title.is_some()
            && self.category.is_some()
            && (self.content.is_some() || self.content_file.is_some())
    }
}

/// Prompts go to stderr so stdout carries only the report (plain or `--json`).
pub fn run(ctx: &GuideContext, opts: &CreateOptions) -> Result<CommandReport> {
    let stdin = io::stdin();
    let mut stderr = io::stderr();
    run_with_io(ctx, opts, &mut stdin.lock(), &mut stderr)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    let trimmed_len = buf.trim_end_matches(['\n', '\r']).len();
    buf.truncate(trimmed_len);
    Ok(Some(buf))
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<Option<String>> {
    write!(output, "{text}")?;
    output.flush()?;
    read_line(input)
}

fn prompt_category<R: BufRead, W: Write>(
    categories: &Categories,
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    writeln!(output, "\nAvailable categories:")?;
    for (idx, name) in categories.iter().enumerate() {
        writeln!(output, "{}. {name}", idx + 1)?;
    }

    loop {
        let Some(answer) = prompt(input, output, "\nSelect category (number): ")? else {
            return Err(GuideError::validation("no category selected").into());
        };
        let Ok(number) = answer.trim().parse::<usize>() else {
            writeln!(output, "Please enter a number!")?;
            continue;
        };
        match categories.by_number(number) {
            Some(name) => return Ok(name.to_string()),
            None => writeln!(output, "Invalid category number!")?,
        }
    }
}

fn prompt_content<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    writeln!(
        output,
        "\nEnter article content (type {END_MARKER} on a new line to finish):"
    )?;
    writeln!(output, "{}", rule('-'))?;
    output.flush()?;

    let mut lines = Vec::new();
    while let Some(line) = read_line(input)? {
        if line == END_MARKER {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

pub fn run_with_io<R: BufRead, W: Write>(
    ctx: &GuideContext,
    opts: &CreateOptions,
    input: &mut R,
    output: &mut W,
) -> Result<CommandReport> {
    let catalog = ctx.open_catalog()?;
    let mut report = CommandReport::new("create");

    if !opts.is_fully_specified() {
        writeln!(output, "\n{}", rule('='))?;
        writeln!(output, "CREATE NEW GUIDE ARTICLE")?;
        writeln!(output, "{}", rule('='))?;
    }

    let title = match &opts.title {
        Some(title) => title.clone(),
        None => prompt(input, output, "\nArticle title: ")?.unwrap_or_default(),
    };
    if title.trim().is_empty() {
        return Err(GuideError::validation("title cannot be empty").into());
    }

    let category = match &opts.category {
        Some(choice) => catalog
            .categories()
            .resolve(choice)
            .map(ToOwned::to_owned)
            .ok_or_else(|| GuideError::validation(format!("unknown category `{choice}`")))?,
        None => prompt_category(catalog.categories(), input, output)?,
    };

    let content = match (&opts.content, &opts.content_file) {
        (Some(content), _) => content.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => prompt_content(input, output)?,
    };

    let created = catalog.create(&title, &category, &content)?;

    report.detail("");
    report.detail("✓ Article created successfully!");
    report.detail(format!("  File: {}", created.path.display()));
    report.detail(format!("  Title: {}", created.record.title));
    report.detail(format!("  Category: {}", created.record.category));
    if created.collided {
        report.detail(format!(
            "  Note: replaced the body of {} (shared with an earlier title)",
            created.record.filename
        ));
    }
    Ok(report)
}
