//! shrew command-line front-end.
//!
//! The build-pipeline face of the toolkit: read markup from a file or
//! stdin, minify it, optionally query it, and write the result.

use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail, ensure};
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;

use shrew_html::{
    Document, MinifyOptions, QuoteStyle, Scheme, SerializeOptions, UrlContext, UrlMinify,
    dump_tree,
};

/// Attribute quoting styles accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum QuoteArg {
    /// Double-quote every value.
    Double,
    /// Single-quote every value.
    Single,
    /// Omit quotes where the unquoted syntax allows it.
    Minimal,
}

impl From<QuoteArg> for QuoteStyle {
    fn from(arg: QuoteArg) -> Self {
        match arg {
            QuoteArg::Double => Self::Double,
            QuoteArg::Single => Self::Single,
            QuoteArg::Minimal => Self::Minimal,
        }
    }
}

/// Minify, query and re-serialize HTML documents.
#[derive(Debug, Parser)]
#[command(name = "shrew", version, about)]
struct Cli {
    /// Input HTML file; reads stdin when omitted
    input: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Parse and re-serialize without minifying
    #[arg(long)]
    no_minify: bool,

    /// Load minify options from a JSON file instead of the defaults
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Keep tag-name and attribute-key case as written
    #[arg(long)]
    keep_case: bool,

    /// Keep whitespace in text content
    #[arg(long)]
    keep_whitespace: bool,

    /// Keep optional closing tags
    #[arg(long)]
    keep_close: bool,

    /// Minify URLs against this base, e.g. https://example.com/app/
    #[arg(long, value_name = "URL")]
    url_base: Option<String>,

    /// Print elements matching this selector instead of the document
    #[arg(long, value_name = "SELECTOR")]
    select: Option<String>,

    /// With --select, print extracted text instead of markup
    #[arg(long)]
    text: bool,

    /// Attribute quoting style
    #[arg(long, value_enum, default_value = "double")]
    quote: QuoteArg,

    /// XML mode: boolean attributes get explicit values
    #[arg(long)]
    xml: bool,

    /// Always write closing tags, even where omission is legal
    #[arg(long)]
    close_tags: bool,

    /// Dump the parsed tree to stdout and exit
    #[arg(long)]
    tree: bool,

    /// Report byte savings on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let html = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            let _ = std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };

    let mut document = Document::parse(&html);

    if cli.tree {
        dump_tree(document.tree(), document.tree().root(), 0);
        return Ok(());
    }

    if !cli.no_minify {
        document.minify(&minify_options(&cli)?);
    }

    let serialize_options = SerializeOptions {
        quote_style: cli.quote.into(),
        xml: cli.xml,
        close_tags: cli.close_tags,
        singleton_close: cli.xml.then(|| "/>".to_string()),
    };

    let output = if let Some(selector) = &cli.select {
        let matches = document.find(selector)?;
        let mut out = String::new();
        for node in matches {
            if cli.text {
                out.push_str(&document.text_of(node).join(""));
            } else {
                out.push_str(&document.serialize_node(node, &serialize_options));
            }
            out.push('\n');
        }
        out
    } else {
        document.serialize(&serialize_options)
    };

    if cli.verbose {
        let saved = html.len().saturating_sub(output.len());
        #[allow(clippy::cast_precision_loss)]
        let percent = if html.is_empty() {
            0.0
        } else {
            saved as f64 * 100.0 / html.len() as f64
        };
        eprintln!(
            "{} {} bytes -> {} bytes ({percent:.1}% saved)",
            "shrew:".green().bold(),
            html.len(),
            output.len(),
        );
    }

    match &cli.output {
        Some(path) => fs::write(path, output)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => std::io::stdout()
            .write_all(output.as_bytes())
            .context("failed to write stdout")?,
    }
    Ok(())
}

/// Assemble minify options from the defaults (or a JSON config file) and
/// the command-line overrides.
fn minify_options(cli: &Cli) -> Result<MinifyOptions> {
    let mut options = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid minify options in {}", path.display()))?
        }
        None => MinifyOptions::default(),
    };
    if cli.keep_case {
        options.lowercase = false;
    }
    if cli.keep_whitespace {
        options.whitespace = false;
    }
    if cli.keep_close {
        options.close = false;
    }
    if let Some(base) = &cli.url_base {
        options.urls = Some(UrlMinify {
            scheme: true,
            host: true,
            absolute: true,
            context: parse_url_base(base)?,
        });
    }
    Ok(options)
}

/// Split an `https://host/path` base into the explicit serving context
/// the URL rules minify against.
fn parse_url_base(base: &str) -> Result<UrlContext> {
    let (scheme, rest) = if let Some(rest) = base.strip_prefix("https://") {
        (Scheme::Https, rest)
    } else if let Some(rest) = base.strip_prefix("http://") {
        (Scheme::Http, rest)
    } else {
        bail!("--url-base must start with http:// or https://");
    };
    let (host, path) = match rest.find('/') {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, "/"),
    };
    ensure!(!host.is_empty(), "--url-base is missing a host");
    Ok(UrlContext {
        scheme,
        host: host.to_string(),
        path: path.to_string(),
    })
}
