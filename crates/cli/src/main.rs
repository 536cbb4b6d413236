use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use owo_colors::OwoColorize;
use tersa_core::{
    FetchConfig, LexiconLoader, LexiconTranslator, OutputFormat, Pipeline, SourceText, SummarizerConfig, extract_text,
    fetch_file, fetch_stdin, fetch_url,
};
use url::Url;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the summary record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
    Markdown,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(format!("Invalid format: {}. Valid options: text, json, markdown", s)),
        }
    }
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::PlainText,
            Format::Json => OutputFormat::Json,
            Format::Markdown => OutputFormat::Markdown,
        }
    }
}

/// How to interpret the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputType {
    Auto,
    Html,
    Text,
}

impl FromStr for InputType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "html" => Ok(Self::Html),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Invalid input type: {}. Valid options: auto, html, text", s)),
        }
    }
}

/// Where the input comes from
#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Stdin,
    Url(Url),
    File(PathBuf),
}

impl Source {
    fn detect(input: &str) -> Self {
        if input == "-" {
            return Self::Stdin;
        }
        match Url::parse(input) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Url(url),
            _ => Self::File(PathBuf::from(input)),
        }
    }

    /// URLs and `.html`/`.htm` files are HTML, everything else is text.
    fn is_html(&self, input_type: InputType) -> bool {
        match input_type {
            InputType::Html => true,
            InputType::Text => false,
            InputType::Auto => match self {
                Self::Url(_) => true,
                Self::File(path) => has_html_extension(path),
                Self::Stdin => false,
            },
        }
    }
}

fn has_html_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}

fn parse_max_sentences(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_ratio(s: &str) -> Result<f64, String> {
    let ratio: f64 = s.parse().map_err(|e: std::num::ParseFloatError| e.to_string())?;
    if ratio > 0.0 && ratio <= 1.0 {
        Ok(ratio)
    } else {
        Err(format!("{} is not in (0, 1]", s))
    }
}

/// Summarize an article and translate the summary to Urdu
#[derive(Parser, Debug)]
#[command(name = "tersa")]
#[command(author = "Tersa Contributors")]
#[command(version = VERSION)]
#[command(about = "Summarize articles and translate the summary to Urdu", long_about = None)]
struct Args {
    /// URL to fetch, local text or HTML file, or "-" for stdin
    #[arg(value_name = "INPUT", required_unless_present = "completions")]
    input: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (text, json, markdown)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: Format,

    /// Treat input as HTML or plain text (auto, html, text)
    #[arg(long, default_value = "auto", value_name = "TYPE")]
    input_type: InputType,

    /// Skip translation of the summary
    #[arg(long)]
    no_translate: bool,

    /// JSON lexicon to translate with instead of the built-in one
    #[arg(long, value_name = "FILE")]
    lexicon: Option<PathBuf>,

    /// Maximum number of summary sentences
    #[arg(long, default_value = "5", value_name = "NUM", value_parser = parse_max_sentences)]
    max_sentences: usize,

    /// Fraction of sentences kept in the summary, in (0, 1]
    #[arg(long, default_value = "0.3", value_name = "RATIO", value_parser = parse_ratio)]
    ratio: f64,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "10", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Show progress and the sentence score table
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "tersa", &mut io::stdout());
        return Ok(());
    }

    let input = args.input.as_deref().context("No input given")?;
    let source = Source::detect(input);
    let is_html = source.is_html(args.input_type);
    let started = Instant::now();
    let mut timings: Vec<(String, Duration)> = Vec::new();

    if args.verbose {
        echo::print_banner();
    }

    if args.verbose {
        let message = match &source {
            Source::Stdin => "Reading from stdin".to_string(),
            Source::Url(url) => format!("Fetching from {}", url.as_str().bright_white().underline()),
            Source::File(path) => format!("Reading from file {}", path.display().bright_white()),
        };
        echo::print_step(1, 4, &message);
    }

    let step = Instant::now();
    let raw = match &source {
        Source::Stdin => fetch_stdin().context("Failed to read from stdin")?,
        Source::Url(url) => {
            let mut config = FetchConfig { timeout: args.timeout, ..Default::default() };
            if let Some(ua) = &args.user_agent {
                config.user_agent = ua.clone();
            }
            fetch_url(url.as_str(), &config).await.context("Failed to fetch URL")?
        }
        Source::File(path) => {
            fetch_file(&path.to_string_lossy()).with_context(|| format!("Failed to read file: {}", path.display()))?
        }
    };
    timings.push(("Read".to_string(), step.elapsed()));

    if args.verbose {
        echo::print_detail("Size", &echo::format_size(raw.len()));
        echo::print_detail("Type", if is_html { "HTML" } else { "text" });
        eprintln!();
    }

    let mut source_text = if is_html {
        if args.verbose {
            echo::print_step(2, 4, "Extracting article text");
        }
        let step = Instant::now();
        let extracted = extract_text(&raw).context("Failed to extract text from HTML")?;
        timings.push(("Extract".to_string(), step.elapsed()));

        if args.verbose {
            echo::print_detail("Title", &extracted.title);
            echo::print_detail("Characters", &extracted.text.chars().count().to_string());
            eprintln!();
        }
        SourceText::new(extracted.text).with_title(extracted.title)
    } else {
        if args.verbose {
            echo::print_step(2, 4, "Using input as plain text");
            eprintln!();
        }
        SourceText::new(raw)
    };

    if let Source::Url(url) = &source {
        source_text = source_text.with_url(url.as_str());
    }

    let config = SummarizerConfig::builder().max_sentences(args.max_sentences).ratio(args.ratio).build();
    let mut builder = Pipeline::builder().summarizer_config(config);

    if args.no_translate {
        builder = builder.no_translation();
    } else {
        let loader = match &args.lexicon {
            Some(path) => LexiconLoader::builder().path(path).build(),
            None => LexiconLoader::new(),
        };
        let lexicon = loader.load().context("Failed to load lexicon")?;
        if args.verbose && args.lexicon.is_none() && lexicon.is_empty() {
            echo::print_warning("Lexicon is empty; translation will pass words through");
        }
        builder = builder.translator(std::sync::Arc::new(LexiconTranslator::with_lexicon(lexicon)));
    }

    let pipeline = builder.build();

    if args.verbose {
        echo::print_step(3, 4, "Summarizing and translating");
        let summarizer = pipeline.summarizer();
        echo::print_score_table(&summarizer.score(&source_text.text), &summarizer.select(&source_text.text));
    }

    let step = Instant::now();
    let record = pipeline.process(source_text).context("Failed to summarize input")?;
    timings.push(("Pipeline".to_string(), step.elapsed()));

    let mut output = record.to_format(args.format.into()).context("Failed to render output")?;
    if !output.ends_with('\n') {
        output.push('\n');
    }

    if args.verbose {
        echo::print_step(4, 4, "Writing output");
        echo::print_detail("Format", &format!("{:?}", args.format));
        echo::print_detail("Summary words", &record.summary_word_count.to_string());
        if let Some(translator) = &record.translator {
            echo::print_detail("Translator", translator);
        } else {
            echo::print_info("Translation skipped");
        }
        eprintln!();
        echo::print_timing_summary(started.elapsed(), &timings);
    }

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
        }
    }

    Ok(())
}
