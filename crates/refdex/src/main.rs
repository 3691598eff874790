//! Command-line interface for the `refdex` document search tool.

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use refdex_document::{LinkContext, NodeId, load_file};
use refdex_index::Reference;
use serde::Serialize;

/// Render budget when a search resolves to a single section.
const SEARCH_RENDER_BUDGET: usize = 1000;

#[derive(Parser)]
#[command(name = "refdex")]
#[command(about = "Outline index and bounded search over one reference document")]
/// Top-level CLI options.
struct Cli {
    /// Markdown document to index.
    #[arg(short, long)]
    file: PathBuf,

    /// Canonical URL of the document; fragment links resolve against it.
    #[arg(long, default_value = "")]
    page_url: String,

    /// Site base URL; root-relative links resolve against it.
    #[arg(long, default_value = "")]
    site_url: String,

    #[command(subcommand)]
    /// Subcommand to execute.
    command: Commands,
}

#[derive(Subcommand)]
/// Supported `refdex` subcommands.
enum Commands {
    /// Search the document and list matching sections
    Search {
        /// Query words
        #[arg(required = true)]
        query: Vec<String>,

        /// Maximum results to list
        #[arg(short = 'n', long, default_value = "8")]
        limit: usize,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List top-level sections
    Toc,

    /// Render one section by its exact heading
    Show {
        /// Exact heading text
        heading: String,

        /// Output budget in bytes
        #[arg(long, default_value = "1800")]
        limit: usize,
    },

    /// Dump the parsed outline tree
    Inspect {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let links = LinkContext::new(cli.page_url, cli.site_url);

    // Build once, up front; a document that cannot be indexed is fatal.
    let outline = match load_file(&cli.file, &links) {
        Ok(outline) => outline,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let reference = match Reference::build(outline) {
        Ok(reference) => reference,
        Err(e) => {
            eprintln!("error: {}: {e}", cli.file.display());
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Search { query, limit, json } => {
            cmd_search(&reference, &query.join(" "), limit, json)
        }
        Commands::Toc => cmd_toc(&reference),
        Commands::Show { heading, limit } => cmd_show(&reference, &heading, limit),
        Commands::Inspect { json } => cmd_inspect(&reference, json),
    }
}

/// One search hit in JSON output.
#[derive(Serialize)]
struct JsonMatch {
    /// Section heading text.
    heading: String,
    /// Outline depth of the section.
    level: u8,
}

/// JSON output for the `search` command.
#[derive(Serialize)]
struct JsonSearchOutput {
    /// The original query string.
    query: String,
    /// Total matches before the display limit.
    total_matches: usize,
    /// Matching sections in rank order.
    results: Vec<JsonMatch>,
    /// Rendered section text when the query resolved to a single hit.
    #[serde(skip_serializing_if = "Option::is_none")]
    rendered: Option<String>,
}

/// Implements `refdex search`.
fn cmd_search(reference: &Reference, query: &str, limit: usize, json: bool) -> ExitCode {
    let mut hits = reference.search(query);
    let total = hits.len();
    hits.truncate(limit);

    if json {
        let rendered = match hits.as_slice() {
            [only] => Some(reference.render(*only, SEARCH_RENDER_BUDGET).text),
            _ => None,
        };
        let output = JsonSearchOutput {
            query: query.to_string(),
            total_matches: total,
            results: hits
                .iter()
                .map(|&id| {
                    let node = reference.node(id);
                    JsonMatch {
                        heading: node.heading.clone(),
                        level: node.level,
                    }
                })
                .collect(),
            rendered,
        };
        return print_json(&output);
    }

    match hits.as_slice() {
        [] => {
            println!("No results for {query:?}.");
            ExitCode::SUCCESS
        }
        [only] => {
            let rendered = reference.render(*only, SEARCH_RENDER_BUDGET);
            print!("{}", rendered.text);
            if !rendered.text.ends_with('\n') {
                println!();
            }
            ExitCode::SUCCESS
        }
        many => {
            println!("Matches for {query:?} ({total} total):");
            print_section_table(reference, many);
            ExitCode::SUCCESS
        }
    }
}

/// Implements `refdex toc`.
fn cmd_toc(reference: &Reference) -> ExitCode {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Heading", "Subsections", "Notes"]);

    for (i, &id) in reference.outline().roots().iter().enumerate() {
        let node = reference.node(id);
        let heading = if node.heading.is_empty() {
            "(preamble)"
        } else {
            node.heading.as_str()
        };
        table.add_row(vec![
            Cell::new((i + 1).to_string()),
            Cell::new(heading),
            Cell::new(node.children.len().to_string()),
            Cell::new(node.content.len().to_string()),
        ]);
    }

    println!("{table}");
    ExitCode::SUCCESS
}

/// Implements `refdex show`.
fn cmd_show(reference: &Reference, heading: &str, limit: usize) -> ExitCode {
    let Some(id) = reference.lookup(heading) else {
        eprintln!("error: no section with heading {heading:?}");
        return ExitCode::FAILURE;
    };

    let rendered = reference.render(id, limit);
    print!("{}", rendered.text);
    if !rendered.text.ends_with('\n') {
        println!();
    }
    ExitCode::SUCCESS
}

/// Outline node in `inspect --json` output.
#[derive(Serialize)]
struct JsonNode {
    /// Outline depth.
    level: u8,
    /// Section heading text.
    heading: String,
    /// Number of direct content notes.
    notes: usize,
    /// Child sections in document order.
    children: Vec<JsonNode>,
}

/// Builds the JSON tree for one node.
fn json_node(reference: &Reference, id: NodeId) -> JsonNode {
    let node = reference.node(id);
    JsonNode {
        level: node.level,
        heading: node.heading.clone(),
        notes: node.content.len(),
        children: node
            .children
            .iter()
            .map(|&child| json_node(reference, child))
            .collect(),
    }
}

/// Implements `refdex inspect`.
fn cmd_inspect(reference: &Reference, json: bool) -> ExitCode {
    if json {
        let tree: Vec<JsonNode> = reference
            .outline()
            .roots()
            .iter()
            .map(|&id| json_node(reference, id))
            .collect();
        return print_json(&tree);
    }

    for &id in reference.outline().roots() {
        print_node(reference, id);
    }
    ExitCode::SUCCESS
}

/// Prints one node and its descendants, indented by depth.
fn print_node(reference: &Reference, id: NodeId) {
    let node = reference.node(id);
    let indent = "  ".repeat(usize::from(node.level - 2));
    let notes = node.content.len();
    println!("{indent}h{} {} ({notes} notes)", node.level, node.heading);
    for &child in &node.children {
        print_node(reference, child);
    }
}

/// Prints a heading table for multiple sections.
fn print_section_table(reference: &Reference, ids: &[NodeId]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Level", "Heading"]);
    for (i, &id) in ids.iter().enumerate() {
        let node = reference.node(id);
        table.add_row(vec![
            Cell::new((i + 1).to_string()),
            Cell::new(format!("h{}", node.level)),
            Cell::new(&node.heading),
        ]);
    }
    println!("{table}");
}

/// Serializes a value as pretty JSON to stdout.
fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}
