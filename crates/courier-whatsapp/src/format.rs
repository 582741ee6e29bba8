// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assistant markdown to WhatsApp text.

/// Prepare assistant output for WhatsApp.
///
/// Drops `【...】` citation markers, turns `**bold**` into WhatsApp `*bold*`
/// and trims surrounding whitespace.
pub fn to_whatsapp_text(text: &str) -> String {
    let stripped = strip_citations(text);
    convert_bold(stripped.trim())
}

fn strip_citations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('【') {
        match rest[start..].find('】') {
            Some(len) => {
                out.push_str(&rest[..start]);
                rest = &rest[start + len + '】'.len_utf8()..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

fn convert_bold(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find("**") {
        let after_open = &rest[open + 2..];
        match after_open.find("**") {
            Some(close) => {
                out.push_str(&rest[..open]);
                out.push('*');
                out.push_str(&after_open[..close]);
                out.push('*');
                rest = &after_open[close + 2..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}
