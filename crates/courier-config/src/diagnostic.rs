// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns Figment extraction failures into miette diagnostics.
//!
//! Unknown keys get a "did you mean?" hint (Jaro-Winkler similarity) and,
//! when the offending file is known, a labelled source span.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler score for a key to be offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration problem, renderable with source context.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key that no config section declares.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(courier::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        /// Comma-separated keys accepted by the section.
        valid_keys: String,
        #[label("not a recognized key")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value of the wrong TOML type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(courier::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
        #[label("wrong type here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A required key is absent.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(courier::config::missing_key),
        help("add `{key} = <value>` to courier.toml")
    )]
    MissingKey { key: String },

    /// A value that parsed but is semantically unusable.
    #[error("validation error: {message}")]
    #[diagnostic(code(courier::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(courier::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert every error inside a `figment::Error` into a [`ConfigError`].
///
/// `toml_sources` holds `(path, content)` pairs used to attach source spans.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let valid: Vec<&str> = expected.to_vec();
                let (span, src) = locate_key(&error, field, toml_sources);
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion: suggest_key(field, &valid),
                    valid_keys: valid.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: field.clone().into_owned(),
            },
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: error.path.join("."),
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.to_string(),
                span: None,
                src: None,
            },
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

fn locate_key(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let origin = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    // Inline strings carry no file source; fall back to the only source given.
    let source = match origin {
        Some(path) => toml_sources.iter().find(|(p, _)| *p == path),
        None if toml_sources.len() == 1 => toml_sources.first(),
        None => None,
    };

    if let Some((path, content)) = source
        && let Some(offset) = find_key_offset(content, &error.path, field)
    {
        let span = SourceSpan::new(offset.into(), field.len());
        return (Some(span), Some(NamedSource::new(path, content.clone())));
    }

    (None, None)
}

/// Byte offset of `field` inside the TOML table named by `path[0]`.
///
/// Top-level fields (empty `path`) are searched from the start of the file.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let start = match path.first() {
        None => 0,
        Some(section) => {
            let header = format!("[{section}]");
            content.find(&header)? + header.len()
        }
    };

    let mut offset = start;
    for line in content[start..].split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') && offset != start {
            break;
        }
        if let Some(rest) = trimmed.strip_prefix(field)
            && rest.trim_start().starts_with('=')
        {
            return Some(offset + (line.len() - trimmed.len()));
        }
        offset += line.len();
    }

    None
}

/// Best-scoring valid key above the similarity threshold.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Render diagnostics to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        if handler.render_report(&mut buf, error as &dyn Diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_close_key() {
        let valid = &["verify_token", "access_token", "app_secret"];
        assert_eq!(
            suggest_key("verfy_token", valid),
            Some("verify_token".to_string())
        );
    }

    #[test]
    fn no_suggestion_for_distant_key() {
        let valid = &["poll_interval_ms", "max_poll_attempts"];
        assert_eq!(suggest_key("zzzz", valid), None);
    }

    #[test]
    fn finds_key_inside_named_section() {
        let content = "[gateway]\nport = 1\n\n[run]\npoll_intervl_ms = 5\n";
        let path = vec!["run".to_string()];
        let offset = find_key_offset(content, &path, "poll_intervl_ms").unwrap();
        assert_eq!(&content[offset..offset + 15], "poll_intervl_ms");
    }

    #[test]
    fn key_in_other_section_is_not_matched() {
        let content = "[gateway]\nport = 1\n\n[run]\nreuse_thread = true\n";
        let path = vec!["gateway".to_string()];
        assert_eq!(find_key_offset(content, &path, "reuse_thread"), None);
    }
}
