//! Placeholder expansion for settings strings
//!
//! Supported forms:
//!
//! - `$NAME` takes the longest identifier run (`$COLORish` looks up `COLORish`)
//! - `${NAME}` delimits the identifier (`${COLOR}ish`)
//! - `$$` is a literal `$`
//!
//! Identifiers match `[_A-Za-z][_A-Za-z0-9]*`. Any other `$` is an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\$(?:(?P<escaped>\$)|(?P<named>[_A-Za-z][_A-Za-z0-9]*)|\{(?P<braced>[_A-Za-z][_A-Za-z0-9]*)\}|(?P<invalid>))",
    )
    .unwrap()
});

/// Variable source backed by the current process environment.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Replace every placeholder in `text` with the value `lookup` returns for it.
///
/// Fails on the first variable `lookup` does not know.
pub fn expand<F>(text: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut expanded = String::with_capacity(text.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(text) {
        let Some(placeholder) = caps.get(0) else {
            continue;
        };
        expanded.push_str(&text[last..placeholder.start()]);

        if caps.name("escaped").is_some() {
            expanded.push('$');
        } else if let Some(name) = caps.name("named").or_else(|| caps.name("braced")) {
            let value = lookup(name.as_str()).ok_or_else(|| Error::MissingVariable {
                name: name.as_str().to_string(),
            })?;
            expanded.push_str(&value);
        } else {
            return Err(Error::InvalidPlaceholder {
                text: text.to_string(),
                position: placeholder.start(),
            });
        }

        last = placeholder.end();
    }

    expanded.push_str(&text[last..]);
    Ok(expanded)
}
