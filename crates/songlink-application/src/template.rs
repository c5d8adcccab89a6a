// SPDX-License-Identifier: GPL-3.0-or-later

//! Output templates.
//!
//! `{url}`, `{artist}`, `{album}` and `{query}` are substituted. `{{` and
//! `}}` produce literal braces. Unknown placeholders and unbalanced braces are
//! copied through unchanged.

use std::fs;
use std::io::ErrorKind;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;
use tracing::{debug, warn};

pub const TEMPLATE_FILE_NAME: &str = "template.txt";
const CONFIG_DIR_NAME: &str = "songlink";

#[derive(Clone, Debug, Default)]
pub struct TemplateContext<'a> {
    pub url: &'a str,
    pub artist: &'a str,
    pub album: &'a str,
    pub query: &'a str,
}

impl TemplateContext<'_> {
    fn value_for_key(&self, key: &str) -> Option<&str> {
        match key {
            "url" => Some(self.url),
            "artist" => Some(self.artist),
            "album" => Some(self.album),
            "query" => Some(self.query),
            _ => None,
        }
    }
}

pub fn render_template(source: &str, context: &TemplateContext<'_>) -> String {
    let mut rendered = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                rendered.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                rendered.push('}');
            }
            '{' => {
                let mut lookahead = chars.clone();
                match read_placeholder(&mut lookahead) {
                    Some(key) => {
                        chars = lookahead;
                        match context.value_for_key(&key) {
                            Some(value) => rendered.push_str(value),
                            None => {
                                rendered.push('{');
                                rendered.push_str(&key);
                                rendered.push('}');
                            }
                        }
                    }
                    None => rendered.push('{'),
                }
            }
            _ => rendered.push(ch),
        }
    }

    rendered
}

/// Characters up to the closing brace. `None` when the text ends or another
/// opening brace appears first.
fn read_placeholder(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    let mut collected = String::new();
    for ch in chars.by_ref() {
        match ch {
            '}' => return Some(collected),
            '{' => return None,
            _ => collected.push(ch),
        }
    }
    None
}

/// Load the output template.
///
/// An explicit path is used alone, with no fallback when it is missing.
/// Without one, the first readable file from [`default_template_paths`] wins.
pub fn load_template(explicit: Option<&Path>) -> Option<String> {
    match explicit {
        Some(path) => read_template(path),
        None => load_first_template(&default_template_paths()),
    }
}

pub fn load_first_template(candidates: &[PathBuf]) -> Option<String> {
    candidates.iter().find_map(|path| read_template(path))
}

/// `<config dir>/songlink/template.txt`, then `template.txt` next to the
/// executable.
pub fn default_template_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(CONFIG_DIR_NAME).join(TEMPLATE_FILE_NAME));
    }
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        paths.push(dir.join(TEMPLATE_FILE_NAME));
    }
    paths
}

fn read_template(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            debug!(target: "template", path = %path.display(), "template loaded");
            Some(contents.trim_end_matches(&['\r', '\n'][..]).to_string())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => {
            warn!(target: "template", path = %path.display(), error = %e, "failed to read template");
            None
        }
    }
}
