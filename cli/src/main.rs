//! chatdigest CLI - daily chat summary to HTML tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use chatdigest::convert::{self, ConvertOptions, OutputFormat};
use chatdigest::{
    parse_file_with_options, CleanupPreset, Font, JsonFormat, ParseOptions, RenderOptions,
};

#[derive(Parser)]
#[command(name = "chatdigest")]
#[command(version)]
#[command(about = "Turn daily chat summaries into styled HTML, text, and JSON", long_about = None)]
struct Cli {
    /// Input summary file (.md or .txt)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Text cleanup preset applied before parsing
    #[arg(long, value_enum, global = true)]
    cleanup: Option<CleanupLevel>,

    /// Wrap text without any numbered topic into a single topic
    #[arg(long, global = true)]
    fallback: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a summary to all formats (HTML, text, JSON)
    Convert {
        /// Input summary file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Render a summary as an HTML page
    Html {
        /// Input summary file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Font identifier (e.g. font-noto-sans, font-inter, font-mono)
        #[arg(long, env = "CHATDIGEST_FONT")]
        font: Option<String>,

        /// QR image reference: data URI, URL, path, or inline <svg>
        #[arg(long, env = "CHATDIGEST_IMAGE")]
        image: Option<String>,

        /// Date used when the text has none (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Page zoom factor (0.3 - 2.0)
        #[arg(long)]
        zoom: Option<f32>,

        /// Custom HTML template file
        #[arg(long, value_name = "FILE")]
        template: Option<PathBuf>,

        /// Page title
        #[arg(long)]
        title: Option<String>,
    },

    /// Convert a summary to JSON
    Json {
        /// Input summary file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Convert a summary to a plain text outline
    Text {
        /// Input summary file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show document information
    Info {
        /// Input summary file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Render every .md/.txt file in a directory to HTML
    Batch {
        /// Input directory
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory (defaults to the input directory)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Minimal cleanup (Unicode normalization, blank lines)
    Minimal,
    /// Standard cleanup (also strips emphasis markers)
    Standard,
    /// Aggressive cleanup (also spaces CJK/Latin and filters symbols)
    Aggressive,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
            CleanupLevel::Aggressive => CleanupPreset::Aggressive,
        }
    }
}

/// Parse flags shared by every command.
struct GlobalFlags {
    cleanup: Option<CleanupLevel>,
    fallback: bool,
}

impl GlobalFlags {
    fn parse_options(&self) -> ParseOptions {
        let mut options = ParseOptions::new();
        if let Some(level) = self.cleanup {
            options = options.with_cleanup_preset(level.into());
        }
        if self.fallback {
            options = options.with_fallback_topic();
        }
        options
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let flags = GlobalFlags {
        cleanup: cli.cleanup,
        fallback: cli.fallback,
    };

    let result = match cli.command {
        Some(Commands::Convert { input, output }) => cmd_convert(&input, output.as_deref(), &flags),
        Some(Commands::Html {
            input,
            output,
            font,
            image,
            date,
            zoom,
            template,
            title,
        }) => {
            let html_args = HtmlArgs {
                font,
                image,
                date,
                zoom,
                template,
                title,
            };
            cmd_html(&input, output.as_deref(), html_args, &flags)
        }
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact, &flags),
        Some(Commands::Text { input, output }) => cmd_text(&input, output.as_deref(), &flags),
        Some(Commands::Info { input }) => cmd_info(&input, &flags),
        Some(Commands::Batch { input, output }) => cmd_batch(&input, output.as_deref(), &flags),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &flags)
            } else {
                println!("{}", "Usage: chatdigest <FILE> [OUTPUT]".yellow());
                println!("       chatdigest --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    flags: &GlobalFlags,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "digest".to_string());

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Parsing summary...");
    let doc = parse_file_with_options(input, flags.parse_options())?;
    pb.inc(1);

    pb.set_message("Generating HTML...");
    let html = chatdigest::render::to_html(&doc, &RenderOptions::default())?;
    let html_name = format!("{}.html", stem);
    fs::write(output_dir.join(&html_name), &html)?;
    pb.inc(1);

    pb.set_message("Generating text...");
    let text = chatdigest::render::to_text(&doc);
    let text_name = format!("{}.txt", stem);
    fs::write(output_dir.join(&text_name), &text)?;
    pb.inc(1);

    pb.set_message("Generating JSON...");
    let json = chatdigest::render::to_json(&doc, JsonFormat::Pretty)?;
    let json_name = format!("{}.json", stem);
    fs::write(output_dir.join(&json_name), &json)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} {}", "├─".dimmed(), html_name);
    println!("  {} {}", "├─".dimmed(), text_name);
    println!("  {} {}", "└─".dimmed(), json_name);

    Ok(())
}

/// Options of the `html` command.
struct HtmlArgs {
    font: Option<String>,
    image: Option<String>,
    date: Option<String>,
    zoom: Option<f32>,
    template: Option<PathBuf>,
    title: Option<String>,
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    args: HtmlArgs,
    flags: &GlobalFlags,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut parse_options = flags.parse_options();
    if let Some(date) = args.date {
        parse_options = parse_options.with_reference_date(date);
    }
    let doc = parse_file_with_options(input, parse_options)?;

    let mut render_options = RenderOptions::new();
    if let Some(ref font) = args.font {
        render_options = render_options.with_font(Font::from_identifier(font));
    }
    if let Some(image) = args.image {
        render_options = render_options.with_image_ref(image);
    }
    if let Some(zoom) = args.zoom {
        render_options = render_options.with_zoom(zoom);
    }
    if let Some(title) = args.title {
        render_options = render_options.with_title(title);
    }
    if let Some(ref path) = args.template {
        render_options = render_options.with_template(convert::read_text(path)?);
    }

    let html = chatdigest::render::to_html(&doc, &render_options)?;
    write_or_print(output, &html)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    flags: &GlobalFlags,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, flags.parse_options())?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = chatdigest::render::to_json(&doc, format)?;
    write_or_print(output, &json)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    flags: &GlobalFlags,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, flags.parse_options())?;
    let text = chatdigest::render::to_text(&doc);
    write_or_print(output, &text)
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_info(input: &Path, flags: &GlobalFlags) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, flags.parse_options())?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Date".bold(), doc.date);
    println!("{}: {}", "Topics".bold(), doc.topic_count());
    println!("{}: {}", "Sections".bold(), doc.section_count());
    println!("{}: {}", "Fragments".bold(), doc.fragment_count());
    if !doc.preamble.is_empty() {
        println!("{}: {}", "Preamble lines".bold(), doc.preamble.len());
    }

    if !doc.is_empty() {
        println!();
        println!("{}", "Topics".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for (i, topic) in doc.topics.iter().enumerate() {
            println!(
                "{:>3}. {} {}",
                i + 1,
                topic.title,
                format!("({} sections)", topic.sections.len()).dimmed()
            );
        }
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: Option<&Path>,
    flags: &GlobalFlags,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.is_dir() {
        return Err(format!("Not a directory: {}", input.display()).into());
    }
    let output_dir = output.unwrap_or(input).to_path_buf();
    fs::create_dir_all(&output_dir)?;

    let mut files: Vec<PathBuf> = fs::read_dir(input)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && convert::is_supported_path(path))
        .collect();
    files.sort();

    if files.is_empty() {
        println!("{}", "No .md or .txt files found".yellow());
        return Ok(());
    }

    let options = ConvertOptions::new()
        .with_parse_options(flags.parse_options())
        .with_format(OutputFormat::Html);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let failures: Vec<String> = files
        .par_iter()
        .filter_map(|path| {
            let outcome = convert::convert_file(path, &options).and_then(|result| {
                let target = output_dir
                    .join(path.file_stem().unwrap_or_default())
                    .with_extension(OutputFormat::Html.extension());
                fs::write(&target, result.content)?;
                Ok(())
            });
            pb.inc(1);
            outcome.err().map(|e| format!("{}: {}", path.display(), e))
        })
        .collect();

    pb.finish_with_message("Done!");

    let converted = files.len() - failures.len();
    println!(
        "\n{} {} of {} files converted",
        "Done!".green().bold(),
        converted,
        files.len()
    );
    for failure in &failures {
        eprintln!("  {} {}", "✗".red(), failure);
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("{} files failed", failures.len()).into())
    }
}

fn cmd_version() {
    println!("{} {}", "chatdigest".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Daily chat summary to HTML tool");
    println!();
    println!("License: MIT");
}
