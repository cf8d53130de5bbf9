//! Theme files for the demo binary.
//!
//! ```toml
//! [theme]
//! prompt = "bold"
//! answer = "magenta"
//! error = "bold red"
//! hint = "dark_grey"
//! prefix = "yellow"
//! question_prefix = "?"
//! answer_prefix = "→"
//! ```
//!
//! Style values are a space separated list of one color name and any of
//! `bold`, `dim`, `italic`, `underline`.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crossterm::style::{style, Attribute, Color, Stylize};
use rawprompt::{set_global_config, Formatter, PromptConfigOverride};
use tracing::debug;

/// Install the process-wide prompt styling from the CLI flags. `--plain`
/// wins over a theme file. A broken theme file is fatal.
pub fn apply(theme: Option<&Path>, plain: bool) {
    if plain {
        set_global_config(PromptConfigOverride::plain());
        return;
    }
    let Some(path) = theme else {
        return;
    };
    match load(path) {
        Ok(config) => set_global_config(config),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn load(path: &Path) -> Result<PromptConfigOverride, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let config = parse(&text).map_err(|e| format!("{}: {e}", path.display()))?;
    debug!(path = %path.display(), "loaded theme");
    Ok(config)
}

fn parse(text: &str) -> Result<PromptConfigOverride, String> {
    let doc: toml_edit::DocumentMut = text
        .parse()
        .map_err(|e| format!("Failed to parse theme: {e}"))?;
    let Some(theme) = doc.get("theme") else {
        return Ok(PromptConfigOverride::new());
    };
    let theme = theme
        .as_table_like()
        .ok_or_else(|| "[theme] must be a table".to_string())?;

    let value = |key: &str| -> Result<Option<String>, String> {
        match theme.get(key) {
            None => Ok(None),
            Some(item) => item
                .as_str()
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| format!("theme.{key} must be a string")),
        }
    };
    let styled = |key: &str| -> Result<Option<Formatter>, String> {
        value(key)?
            .map(|desc| {
                parse_style(&desc)
                    .map(styler)
                    .map_err(|e| format!("theme.{key}: {e}"))
            })
            .transpose()
    };

    let mut config = PromptConfigOverride::new();
    config.prompt = styled("prompt")?;
    config.answer = styled("answer")?;
    config.error = styled("error")?;
    config.hint = styled("hint")?;

    let prefix_style = match value("prefix")? {
        Some(desc) => parse_style(&desc).map_err(|e| format!("theme.prefix: {e}"))?,
        None => TextStyle {
            color: Some(Color::Green),
            attributes: vec![Attribute::Bold],
        },
    };
    if let Some(glyph) = value("question_prefix")? {
        config.question_prefix = Some(fixed_prefix(glyph, prefix_style.clone()));
    } else if value("prefix")?.is_some() {
        config.question_prefix = Some(styler(prefix_style.clone()));
    }
    if let Some(glyph) = value("answer_prefix")? {
        config.answer_prefix = Some(fixed_prefix(glyph, prefix_style));
    } else if value("prefix")?.is_some() {
        config.answer_prefix = Some(styler(prefix_style));
    }
    Ok(config)
}

#[derive(Debug, Clone, PartialEq)]
struct TextStyle {
    color: Option<Color>,
    attributes: Vec<Attribute>,
}

impl TextStyle {
    fn paint(&self, text: &str) -> String {
        let mut content = style(text.to_string());
        if let Some(color) = self.color {
            content = content.with(color);
        }
        for attribute in &self.attributes {
            content = content.attribute(*attribute);
        }
        content.to_string()
    }
}

fn parse_style(desc: &str) -> Result<TextStyle, String> {
    let mut parsed = TextStyle {
        color: None,
        attributes: Vec::new(),
    };
    for word in desc.split_whitespace() {
        let word = word.to_ascii_lowercase();
        if let Some(attribute) = parse_attribute(&word) {
            parsed.attributes.push(attribute);
        } else if let Some(color) = parse_color(&word) {
            if parsed.color.replace(color).is_some() {
                return Err(format!("more than one color in '{desc}'"));
            }
        } else {
            return Err(format!("unknown color or attribute '{word}'"));
        }
    }
    Ok(parsed)
}

fn parse_attribute(word: &str) -> Option<Attribute> {
    match word {
        "bold" => Some(Attribute::Bold),
        "dim" => Some(Attribute::Dim),
        "italic" => Some(Attribute::Italic),
        "underline" | "underlined" => Some(Attribute::Underlined),
        _ => None,
    }
}

fn parse_color(word: &str) -> Option<Color> {
    let color = match word.replace('-', "_").as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "dark_red" => Color::DarkRed,
        "green" => Color::Green,
        "dark_green" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "dark_yellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "dark_blue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "dark_magenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "dark_cyan" => Color::DarkCyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        "dark_grey" | "dark_gray" => Color::DarkGrey,
        _ => return None,
    };
    Some(color)
}

fn styler(text_style: TextStyle) -> Formatter {
    Arc::new(move |s: &str| text_style.paint(s))
}

/// Draws `glyph` in place of the built-in prefix glyph.
fn fixed_prefix(glyph: String, text_style: TextStyle) -> Formatter {
    Arc::new(move |_: &str| text_style.paint(&glyph))
}
