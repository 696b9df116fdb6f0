//! sprig command line
//!
//! Query HTML with CSS-like selectors.
//!
//! - `sprig select <SELECTOR> [FILE]`: print every matching element
//! - `sprig plan <SELECTOR>`: show how a selector is tokenized

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use serde::Serialize;
use sprig_common::warning::set_warnings_enabled;
use sprig_dom::{DomTree, NodeId};
use sprig_html::{parse_fragment, parse_html, render_minified, render_pretty};
use sprig_select::{
    BranchPlan, Combinator, SelectorEngine, SelectorSegment, branch_to_string, global_engine,
};
use strum_macros::{Display, EnumString};

/// sprig: CSS-like selectors over HTML
#[derive(Parser, Debug)]
#[command(name = "sprig")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Odd list items of a page
    sprig select 'ul > li:nth-child(odd)' index.html

    # Inline markup, JSON output
    sprig select 'a[href^=http]' --html '<a href="https://x.org">x</a>' --format json

    # Read from stdin, first match only
    curl -s https://example.com | sprig select --first 'h1, h2'

    # Inspect the parsed selector
    sprig plan 'div.card > p + p'
"#)]
struct Cli {
    /// Do not print warnings about input that is accepted but not fully honoured
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every element matching a selector
    Select(SelectArgs),

    /// Print the segments of each selector branch
    Plan {
        /// Selector list to tokenize
        selector: String,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct SelectArgs {
    /// Selector list, e.g. 'ul > li.x, p:first-child'
    selector: String,

    /// HTML file to read; stdin if neither FILE nor --html is given
    #[arg(value_name = "FILE", conflicts_with = "html")]
    path: Option<PathBuf>,

    /// Parse this HTML string instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Import the input as a fragment, without synthesized html/head/body
    #[arg(long)]
    fragment: bool,

    /// Print only the first match
    #[arg(long)]
    first: bool,

    /// Output format: pretty, minified or json
    #[arg(long, default_value_t = RenderFormat::Pretty)]
    format: RenderFormat,

    /// Bound the selector plan cache to N entries
    #[arg(long, value_name = "N")]
    capacity: Option<usize>,
}

/// How matches are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
enum RenderFormat {
    /// Indented markup, one node per line
    Pretty,
    /// One match per line, no inner whitespace
    Minified,
    /// An array of `{tag, attributes, path}` objects
    Json,
}

/// One match in `--format json` output.
#[derive(Debug, Serialize)]
struct MatchRecord<'a> {
    tag: &'a str,
    attributes: BTreeMap<&'a str, String>,
    path: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    set_warnings_enabled(!cli.quiet);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Select(args) => {
            let tree = load_tree(&args)?;
            let bounded;
            let engine = match args.capacity {
                Some(capacity) => {
                    bounded = SelectorEngine::with_capacity(capacity);
                    &bounded
                }
                None => global_engine(),
            };

            let matches = if args.first {
                engine
                    .select_first(&tree, NodeId::ROOT, &args.selector)?
                    .into_iter()
                    .collect()
            } else {
                engine.select(&tree, NodeId::ROOT, &args.selector)?
            };
            print!("{}", format_matches(&tree, &matches, args.format)?);
        }
        Command::Plan { selector, json } => {
            let plans = global_engine().plan(&selector)?;
            print!("{}", format_plan(&plans, json)?);
        }
    }
    Ok(())
}

/// Read the input named by `args` and import it.
fn load_tree(args: &SelectArgs) -> Result<DomTree> {
    let html = if let Some(html) = &args.html {
        html.clone()
    } else if let Some(path) = &args.path {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    } else {
        io::read_to_string(io::stdin()).context("failed to read HTML from stdin")?
    };

    Ok(if args.fragment {
        parse_fragment(&html)
    } else {
        parse_html(&html)
    })
}

fn format_matches(tree: &DomTree, matches: &[NodeId], format: RenderFormat) -> Result<String> {
    let out = match format {
        RenderFormat::Pretty => matches.iter().map(|&id| render_pretty(tree, id)).collect(),
        RenderFormat::Minified => matches
            .iter()
            .map(|&id| render_minified(tree, id) + "\n")
            .collect(),
        RenderFormat::Json => {
            let records: Vec<MatchRecord<'_>> = matches
                .iter()
                .filter_map(|&id| match_record(tree, id))
                .collect();
            serde_json::to_string_pretty(&records)? + "\n"
        }
    };
    Ok(out)
}

fn match_record(tree: &DomTree, id: NodeId) -> Option<MatchRecord<'_>> {
    let element = tree.as_element(id)?;
    Some(MatchRecord {
        tag: &element.tag_name,
        attributes: element
            .attrs
            .iter()
            .map(|(name, values)| (name, values.join(" ")))
            .collect(),
        path: node_path(tree, id),
    })
}

/// `html:nth-child(1) > body:nth-child(2) > p:nth-child(3)`
///
/// Prefixed with `"> "` the path selects exactly `id` from the Document.
fn node_path(tree: &DomTree, id: NodeId) -> String {
    let mut steps: Vec<String> = std::iter::once(id)
        .chain(tree.ancestors(id))
        .filter_map(|node| {
            let tag = tree.tag(node)?;
            let parent = tree.parent(node)?;
            let position = tree.element_children(parent).position(|c| c == node)? + 1;
            Some(format!("{tag}:nth-child({position})"))
        })
        .collect();
    steps.reverse();
    steps.join(" > ")
}

fn format_plan(plans: &[BranchPlan], json: bool) -> Result<String> {
    if json {
        let branches: Vec<&[SelectorSegment]> = plans.iter().map(|plan| &plan[..]).collect();
        return Ok(serde_json::to_string_pretty(&branches)? + "\n");
    }

    let mut out = String::new();
    for plan in plans {
        out.push_str(&branch_to_string(plan));
        out.push('\n');
        for segment in plan.iter() {
            let combinator = combinator_name(segment.combinator);
            out.push_str(&format!("  {combinator:<10} {segment}\n"));
        }
    }
    Ok(out)
}

const fn combinator_name(combinator: Combinator) -> &'static str {
    match combinator {
        Combinator::Descendant => "descendant",
        Combinator::Child => "child",
        Combinator::Adjacent => "adjacent",
        Combinator::Sibling => "sibling",
    }
}
