//! cvtex CLI - render JSON resumes to LaTeX

mod photo;

use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;

use cvtex::{assemble_with_options, render_with_stats, RenderOptions, RenderStats, ResumeDocument};

use photo::PhotoSource;

#[derive(Parser)]
#[command(name = "cvtex")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Render JSON resumes to LaTeX", long_about = None)]
struct Cli {
    /// Input JSON resume
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output locale
    #[arg(short = 'l', long = "lang", value_name = "LANG", default_value = "en", env = "CVTEX_LANG")]
    lang: String,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Locale used when a field has no value for LANG
    #[arg(long, value_name = "TAG", default_value = cvtex::DEFAULT_LOCALE)]
    default_locale: String,

    /// Email providers in priority order (e.g. "uc,google,proton")
    #[arg(long, value_name = "PROVIDERS", value_delimiter = ',')]
    contact_priority: Vec<String>,

    /// Substitution value for {{KEY}} tokens
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
    vars: Vec<(String, String)>,

    /// Profile image to include (overrides contact.photo)
    #[arg(long, value_name = "PATH", conflicts_with = "no_image")]
    photo: Option<PathBuf>,

    /// Do not include or download a profile image
    #[arg(long)]
    no_image: bool,

    /// Print rendering statistics to stderr
    #[arg(long)]
    stats: bool,

    /// Render sections in parallel
    #[arg(long)]
    parallel: bool,
}

fn parse_var(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = cmd_render(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_render(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let file = fs::File::open(&cli.input)
        .map_err(|e| format!("cannot open {}: {}", cli.input.display(), e))?;
    let doc = ResumeDocument::from_reader(BufReader::new(file))?;

    let mut options = RenderOptions::new()
        .with_locale(&cli.lang)
        .with_default_locale(&cli.default_locale)
        .with_parallel(cli.parallel);
    if !cli.contact_priority.is_empty() {
        options = options.with_contact_priority(cli.contact_priority.iter().map(|p| p.trim()));
    }
    for (key, value) in &cli.vars {
        options = options.with_substitution(key, value);
    }
    if let Some(photo) = resolve_photo(cli, &doc) {
        options = options.with_photo(photo);
    }

    let latex = if cli.stats {
        let result = render_with_stats(&doc, &options)?;
        print_stats(&result.stats);
        result.content
    } else {
        assemble_with_options(&doc, &options)?
    };

    if let Some(path) = &cli.output {
        fs::write(path, &latex)?;
        eprintln!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", latex);
    }

    Ok(())
}

/// Pick the image to include: `--photo`, then `contact.photo`.
///
/// A remote photo is downloaded next to the output; a failed download is
/// reported and the resume is rendered without it.
fn resolve_photo(cli: &Cli, doc: &ResumeDocument) -> Option<PathBuf> {
    if cli.no_image {
        return None;
    }
    if let Some(photo) = &cli.photo {
        return Some(photo.clone());
    }
    match photo::source(doc)? {
        PhotoSource::Local(path) => Some(path),
        PhotoSource::Remote(url) => {
            let (dir, stem) = output_location(cli.output.as_deref(), &cli.input);
            match photo::fetch(&url, &dir, &stem) {
                Ok(path) => Some(path),
                Err(e) => {
                    log::warn!("photo download failed: {}", e);
                    eprintln!("{}: photo download failed: {}", "Warning".yellow().bold(), e);
                    None
                }
            }
        }
    }
}

/// Directory the LaTeX lands in, and the file stem used to name assets.
fn output_location(output: Option<&Path>, input: &Path) -> (PathBuf, String) {
    let named = output.unwrap_or(input);
    let stem = named
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume".to_string());
    let dir = match output.and_then(Path::parent) {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    (dir, stem)
}

fn print_stats(stats: &RenderStats) {
    eprintln!("{}", "Render Statistics".cyan().bold());
    eprintln!("{}", "─".repeat(40).dimmed());
    eprintln!("{}: {}", "Sections".bold(), stats.section_count);
    eprintln!("{}: {}", "Items".bold(), stats.item_count);
    eprintln!("{}: {}", "Links".bold(), stats.link_count);
    eprintln!("{}: {}", "Order".bold(), stats.section_ids.join(", "));
}
