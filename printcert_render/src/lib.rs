// SPDX-License-Identifier: Apache-2.0
//! Human-readable rendering of X.509 certificates, as text or as HTML tables.
//!
//! Rendering goes through [`DisplayRecord`]s: one for the certificate fields, one per extension
//! and one for the signature. Both output formats are built from the same records.
use std::panic::{catch_unwind, AssertUnwindSafe};

use log::warn;

mod classes;
mod display;
pub mod extensions;
mod fields;
mod general_name;
mod html;
mod html_escape;
mod strings;
mod text;
mod time;

pub use classes::{RowClasses, TableClasses, DEFAULT_TABLE_CLASSES};
pub use display::{Body, DisplayRecord, Row, UnitKind, Value};
pub use general_name::GeneralName;
pub use html::Table;
pub use printcert_cert::PrintCertificate;

use html_escape::HtmlEscapable;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for PrintCertificate {
    fn render(&self) -> String {
        render_html(self, None, &DEFAULT_TABLE_CLASSES, false, true)
    }
}

/// The records shown for `cert`, in display order.
pub fn display_records(
    cert: &PrintCertificate,
    verbose: bool,
    decode_names: bool,
) -> Vec<DisplayRecord> {
    let mut records = Vec::with_capacity(cert.extensions().len() + 2);
    records.push(fields::cert_fields(cert, verbose, decode_names));
    records.extend(cert.extensions().iter().map(extensions::decode_extension));
    records.push(fields::signature(cert, verbose));
    records
}

/// Runs `render`, falling back to the structural dump if it panics.
fn text_or_dump<F: FnOnce() -> String>(cert: &PrintCertificate, render: F) -> String {
    catch_unwind(AssertUnwindSafe(render)).unwrap_or_else(|_| {
        warn!("Text rendering failed, falling back to the structural dump");
        cert.to_original_string()
    })
}

/// Runs `render`, falling back to the escaped structural dump in a `<pre><code>` block if it
/// panics.
fn html_or_dump<F: FnOnce() -> String>(cert: &PrintCertificate, render: F) -> String {
    catch_unwind(AssertUnwindSafe(render)).unwrap_or_else(|_| {
        warn!("HTML rendering failed, falling back to the structural dump");
        format!(
            "<pre><code>{}</code></pre>",
            cert.to_original_string().html_escape()
        )
    })
}

pub fn render_text(cert: &PrintCertificate, verbose: bool, decode_names: bool) -> String {
    text_or_dump(cert, || {
        text::render_records(&display_records(cert, verbose, decode_names))
    })
}

pub fn render_html(
    cert: &PrintCertificate,
    heading: Option<&str>,
    classes: &TableClasses,
    verbose: bool,
    decode_names: bool,
) -> String {
    html_or_dump(cert, || {
        html::render_records(&display_records(cert, verbose, decode_names), heading, classes)
    })
}
