//! mdpage CLI - Markdown pagination tool

mod markdown;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use mdpage::{
    blocks_from_json, DefaultPaginator, JsonFormat, LayoutOptions, LayoutResult, LayoutStats,
    PageGeometry, RawBlock,
};

#[derive(Parser)]
#[command(name = "mdpage")]
#[command(version)]
#[command(about = "Paginate Markdown into fixed-layout draw commands", long_about = None)]
struct Cli {
    /// Input Markdown or JSON block file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    page: PageArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out a document and write the result as JSON
    Layout {
        /// Input Markdown or JSON block file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Print the draw commands in readable form
    #[command(alias = "cmds")]
    Commands {
        /// Input Markdown or JSON block file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show page count, statistics and warnings
    Info {
        /// Input Markdown or JSON block file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Print the blocks supplied to the layout engine
    Blocks {
        /// Input Markdown or JSON block file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Lay out many documents in parallel
    Batch {
        /// Input Markdown or JSON block files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show version information
    Version,
}

/// Page geometry and layout switches shared by the layout commands.
#[derive(Args, Clone, Copy)]
struct PageArgs {
    /// Paper size
    #[arg(long, value_enum, default_value = "a4", env = "MDPAGE_PAPER")]
    paper: Paper,

    /// Page margin in points
    #[arg(long, value_name = "POINTS")]
    margin: Option<f32>,

    /// Minimum free space before a block starts, in points
    #[arg(long, value_name = "POINTS")]
    min_runway: Option<f32>,

    /// Skip blocks of unknown kind instead of failing
    #[arg(long)]
    lenient: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Paper {
    /// ISO A4, 595 x 842 pt
    A4,
    /// US Letter, 612 x 792 pt
    Letter,
}

impl From<Paper> for PageGeometry {
    fn from(paper: Paper) -> Self {
        match paper {
            Paper::A4 => PageGeometry::a4(),
            Paper::Letter => PageGeometry::letter(),
        }
    }
}

impl PageArgs {
    fn geometry(&self) -> PageGeometry {
        let geometry = PageGeometry::from(self.paper);
        match self.margin {
            Some(margin) => geometry.with_margin(margin),
            None => geometry,
        }
    }

    fn options(&self) -> LayoutOptions {
        let mut options = LayoutOptions::new();
        if let Some(points) = self.min_runway {
            options = options.with_min_runway(points);
        }
        if self.lenient {
            options = options.lenient();
        }
        options
    }

    fn run(&self, input: &Path) -> Result<LayoutResult, Box<dyn std::error::Error>> {
        let blocks = load_blocks(input)?;
        let result = DefaultPaginator::default()
            .with_options(self.options())
            .run_raw(&blocks, &self.geometry())?;
        Ok(result)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Layout {
            input,
            output,
            compact,
            page,
        }) => cmd_layout(&input, output.as_deref(), compact, &page),
        Some(Commands::Commands {
            input,
            output,
            page,
        }) => cmd_commands(&input, output.as_deref(), &page),
        Some(Commands::Info { input, page }) => cmd_info(&input, &page),
        Some(Commands::Blocks { input, compact }) => cmd_blocks(&input, compact),
        Some(Commands::Batch {
            inputs,
            output,
            compact,
            page,
        }) => cmd_batch(&inputs, &output, compact, &page),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: list commands if input is provided
            if let Some(input) = cli.input {
                cmd_commands(&input, None, &cli.page)
            } else {
                println!("{}", "Usage: mdpage <FILE>".yellow());
                println!("       mdpage --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read blocks from a `.json` block array or a Markdown file.
fn load_blocks(input: &Path) -> Result<Vec<RawBlock>, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(input)?;
    let is_json = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        Ok(blocks_from_json(&content)?)
    } else {
        Ok(markdown::parse_markdown(&content))
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn report_warnings(result: &LayoutResult) {
    for warning in &result.warnings {
        eprintln!("{}: {}", "Warning".yellow().bold(), warning);
    }
}

fn cmd_layout(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    page: &PageArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = page.run(input)?;
    report_warnings(&result);

    let json = mdpage::render::to_json(&result, json_format(compact))?;
    write_output(output, &json)
}

fn cmd_commands(
    input: &Path,
    output: Option<&Path>,
    page: &PageArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = page.run(input)?;
    let listing = mdpage::render::to_text(&result);
    write_output(output, listing.trim_end())
}

fn cmd_info(input: &Path, page: &PageArgs) -> Result<(), Box<dyn std::error::Error>> {
    let geometry = page.geometry();
    let result = page.run(input)?;
    let stats = &result.stats;

    println!("{}", "Layout Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!(
        "{}: {} x {} pt, margin {} pt",
        "Page".bold(),
        geometry.width,
        geometry.height,
        geometry.margin
    );
    println!("{}: {}", "Pages".bold(), result.page_count);
    println!("{}: {}", "Commands".bold(), result.commands.len());

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!(
        "{}: {} ({} items)",
        "Lists".bold(),
        stats.list_count,
        stats.list_item_count
    );
    println!(
        "{}: {} ({} lines)",
        "Code blocks".bold(),
        stats.code_block_count,
        stats.code_line_count
    );
    println!("{}: {}", "Blockquotes".bold(), stats.blockquote_count);
    println!("{}: {}", "Rules".bold(), stats.rule_count);
    println!("{}: {}", "Text lines".bold(), stats.text_line_count);

    if result.has_warnings() {
        println!();
        println!("{}", "Warnings".yellow().bold());
        println!("{}", "─".repeat(40).dimmed());
        for warning in &result.warnings {
            println!("  {} {}", "•".yellow(), warning);
        }
    }

    Ok(())
}

fn cmd_blocks(input: &Path, compact: bool) -> Result<(), Box<dyn std::error::Error>> {
    let blocks = load_blocks(input)?;
    let json = if compact {
        serde_json::to_string(&blocks)?
    } else {
        serde_json::to_string_pretty(&blocks)?
    };
    println!("{}", json);
    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    output: &Path,
    compact: bool,
    page: &PageArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let outcomes: Vec<(PathBuf, Result<LayoutStats, String>)> = inputs
        .par_iter()
        .map(|input| {
            let outcome = layout_one(input, output, compact, page).map_err(|e| e.to_string());
            pb.set_message(input.display().to_string());
            pb.inc(1);
            (input.clone(), outcome)
        })
        .collect();

    pb.finish_with_message("Done!");

    println!("\n{}", "Results:".green().bold());
    let mut failed = 0;
    for (index, (input, outcome)) in outcomes.iter().enumerate() {
        let branch = if index + 1 == outcomes.len() {
            "└─"
        } else {
            "├─"
        };
        match outcome {
            Ok(stats) => println!(
                "  {} {} ({} pages)",
                branch.dimmed(),
                input.display(),
                stats.page_count
            ),
            Err(e) => {
                failed += 1;
                println!("  {} {} {}", branch.dimmed(), input.display(), e.red());
            }
        }
    }

    let total = batch_totals(&outcomes);
    println!(
        "\n{}: {} pages, {} headings, {} paragraphs, {} list items, {} code blocks",
        "Total".bold(),
        total.page_count,
        total.heading_count,
        total.paragraph_count,
        total.list_item_count,
        total.code_block_count
    );

    if failed > 0 {
        return Err(format!("{} of {} files failed", failed, inputs.len()).into());
    }
    Ok(())
}

/// Sum the statistics of every successful batch input.
fn batch_totals(outcomes: &[(PathBuf, Result<LayoutStats, String>)]) -> LayoutStats {
    let mut total = LayoutStats::new();
    for stats in outcomes.iter().filter_map(|(_, outcome)| outcome.as_ref().ok()) {
        total.merge(stats);
    }
    total
}

/// Lay out one batch input and write `<stem>.json` into `output_dir`.
fn layout_one(
    input: &Path,
    output_dir: &Path,
    compact: bool,
    page: &PageArgs,
) -> Result<LayoutStats, Box<dyn std::error::Error>> {
    let result = page.run(input)?;
    let json = mdpage::render::to_json(&result, json_format(compact))?;

    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    fs::write(output_dir.join(format!("{}.json", stem)), json)?;
    Ok(result.stats)
}

fn cmd_version() {
    println!("{} {}", "mdpage".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Markdown pagination tool");
    println!();
    println!("License: MIT");
}
