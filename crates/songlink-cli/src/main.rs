// SPDX-License-Identifier: GPL-3.0-or-later
mod clipboard;
mod progress;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use progress::Spinner;
use songlink_application::{
    build_pipeline, load_template, render_template, LinkSource, PipelineError, PipelineOutcome,
    SelectionMode, TemplateContext,
};
use songlink_config::{load as load_config, AppConfig};
use songlink_domain::Query;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const EXIT_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;

const BANNER: &str = r#"
 ___  ___  _  _  ___  _    ___  _  _  _  __
/ __|/ _ \| \| |/ __|| |  |_ _|| \| || |/ /
\__ \ (_) | .` | (_ || |__ | | | .` || ' <
|___/\___/|_|\_|\___||____|___||_|\_||_|\_\
"#;
const TAGLINE: &str = "smart-link generator • iTunes → Odesli • just the share page";

/// Find an album in the iTunes catalog and print its song.link share page.
#[derive(Parser, Debug)]
#[command(name = "songlink", version)]
struct Args {
    /// Artist name (requires --album unless --query is given)
    #[arg(long)]
    artist: Option<String>,

    /// Album title (requires --artist unless --query is given)
    #[arg(long)]
    album: Option<String>,

    /// Free-text search, e.g. "Radiohead OK Computer"
    #[arg(long)]
    query: Option<String>,

    /// Pick the best match without prompting
    #[arg(long)]
    non_interactive: bool,

    /// Open the share page in the default browser
    #[arg(long)]
    open: bool,

    /// Copy the share link to the clipboard
    #[arg(long)]
    copy: bool,

    #[arg(long)]
    no_banner: bool,

    /// Output template file; placeholders: {url} {artist} {album} {query}
    #[arg(long)]
    template: Option<PathBuf>,

    /// Print the rendered template instead of the bare link
    #[arg(long)]
    use_template: bool,

    /// Copy the rendered template instead of the bare link
    #[arg(long)]
    copy_template: bool,

    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn selection_mode(&self) -> SelectionMode {
        if self.non_interactive {
            SelectionMode::NonInteractive
        } else {
            SelectionMode::Interactive
        }
    }

    fn wants_template(&self) -> bool {
        self.use_template || self.copy_template
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if !args.no_banner {
        print_banner();
    }

    let query = match Query::new(args.artist.clone(), args.album.clone(), args.query.clone()) {
        Ok(query) => query,
        Err(e) => {
            eprintln!("error: {e}; pass --query \"Artist Album\" or both --artist and --album");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: failed to load configuration: {e:#}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };
    init_tracing(&config.telemetry.log_level);

    match run(&args, &config, &query) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", failure_message(&e));
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(args: &Args, config: &AppConfig, query: &Query) -> Result<(), PipelineError> {
    let pipeline = build_pipeline(config, args.selection_mode())?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(anyhow::Error::from)?;

    let started = Instant::now();
    let spinner = Spinner::start("Looking up share link...");
    let result = runtime.block_on(pipeline.run(query));
    spinner.finish();
    let outcome = result?;

    report(args, query, &outcome, started.elapsed().as_secs_f64());
    Ok(())
}

fn report(args: &Args, query: &Query, outcome: &PipelineOutcome, elapsed_secs: f64) {
    let link = outcome.link.as_str();
    info!(
        target: "cli",
        cached = outcome.source == LinkSource::Cache,
        "share link ready"
    );

    let rendered = if args.wants_template() {
        let template = load_template(args.template.as_deref());
        if template.is_none() {
            warn!(target: "cli", "template not found, printing bare link");
        }
        template.map(|source| {
            render_template(
                &source,
                &TemplateContext {
                    url: link,
                    artist: query.artist().unwrap_or_default(),
                    album: query.album().unwrap_or_default(),
                    query: query.text().unwrap_or_default(),
                },
            )
        })
    } else {
        None
    };

    eprintln!("Found: {}", query.label());
    eprintln!("Elapsed: {:.2}s", elapsed_secs);

    println!("{}", output_text(args, link, rendered.as_deref()));

    if let Some(text) = clipboard_text(args, link, rendered.as_deref()) {
        match clipboard::copy(text) {
            Ok(tool) => eprintln!("Copied to clipboard ({tool})."),
            Err(e) => warn!(target: "cli", error = %e, "failed to copy to clipboard"),
        }
    }

    if args.open {
        if let Err(e) = webbrowser::open(link) {
            warn!(target: "cli", error = %e, "failed to open browser");
        }
    }
}

fn output_text<'a>(args: &Args, link: &'a str, rendered: Option<&'a str>) -> &'a str {
    match rendered {
        Some(text) if args.use_template => text,
        _ => link,
    }
}

fn clipboard_text<'a>(args: &Args, link: &'a str, rendered: Option<&'a str>) -> Option<&'a str> {
    match rendered {
        Some(text) if args.copy_template => Some(text),
        _ if args.copy => Some(link),
        _ => None,
    }
}

fn failure_message(error: &PipelineError) -> String {
    match error {
        PipelineError::NotFound(reason) => format!("Not found: {reason}"),
        PipelineError::SelectionFailed => "Could not choose an album from the results.".to_string(),
        PipelineError::Provider(e) => format!("error: {e:#}"),
    }
}

fn print_banner() {
    eprintln!("{}", BANNER.trim_start_matches('\n'));
    eprintln!("{TAGLINE}");
    eprintln!();
}

fn init_tracing(default_level: &str) {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["songlink"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parses_all_flags() {
        let parsed = args(&[
            "--artist",
            "Radiohead",
            "--album",
            "OK Computer",
            "--non-interactive",
            "--open",
            "--copy",
            "--no-banner",
            "--template",
            "post.txt",
            "--use-template",
            "--copy-template",
            "--config",
            "songlink.toml",
        ]);

        assert_eq!(parsed.artist.as_deref(), Some("Radiohead"));
        assert_eq!(parsed.album.as_deref(), Some("OK Computer"));
        assert_eq!(parsed.selection_mode(), SelectionMode::NonInteractive);
        assert!(parsed.open && parsed.copy && parsed.no_banner);
        assert_eq!(parsed.template, Some(PathBuf::from("post.txt")));
        assert!(parsed.wants_template());
        assert_eq!(parsed.config, Some(PathBuf::from("songlink.toml")));
    }

    #[test]
    fn test_default_mode_is_interactive() {
        assert_eq!(
            args(&["--query", "Kid A"]).selection_mode(),
            SelectionMode::Interactive
        );
    }

    #[test]
    fn test_output_prefers_rendered_template_only_when_requested() {
        let link = "https://song.link/x";
        let with_template = args(&["--query", "x", "--use-template"]);
        let without = args(&["--query", "x", "--copy-template"]);

        assert_eq!(output_text(&with_template, link, Some("Listen: x")), "Listen: x");
        assert_eq!(output_text(&with_template, link, None), link);
        assert_eq!(output_text(&without, link, Some("Listen: x")), link);
    }

    #[test]
    fn test_copy_template_takes_precedence() {
        let link = "https://song.link/x";
        let both = args(&["--query", "x", "--copy", "--copy-template"]);
        assert_eq!(clipboard_text(&both, link, Some("Listen: x")), Some("Listen: x"));
        // no template rendered: fall back to the bare link
        assert_eq!(clipboard_text(&both, link, None), Some(link));

        let template_only = args(&["--query", "x", "--copy-template"]);
        assert_eq!(clipboard_text(&template_only, link, None), None);

        let neither = args(&["--query", "x"]);
        assert_eq!(clipboard_text(&neither, link, Some("Listen: x")), None);
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            failure_message(&PipelineError::NotFound("no albums matched".into())),
            "Not found: no albums matched"
        );
        assert_eq!(
            failure_message(&PipelineError::Provider(anyhow::anyhow!("HTTP 404"))),
            "error: HTTP 404"
        );
    }
}
