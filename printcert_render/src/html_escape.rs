// SPDX-License-Identifier: Apache-2.0
use std::fmt;

pub fn entity_escape_char(khar: char) -> String {
    format!("&#x{:X};", khar as u32)
}

/// Escapes text so it can be placed in element content or a quoted attribute value.
///
/// Only the markup-significant characters are replaced, so labels and values stay readable in the
/// page source.
pub fn html_escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for khar in text.chars() {
        match khar {
            '&' | '<' | '>' | '"' | '\'' => result.push_str(&entity_escape_char(khar)),
            c => result.push(c),
        }
    }
    result
}

pub trait HtmlEscapable {
    fn html_escape(&self) -> String;
}

impl<T> HtmlEscapable for T
where
    T: fmt::Display,
{
    fn html_escape(&self) -> String {
        html_escape(&format!("{}", self))
    }
}
