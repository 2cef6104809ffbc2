// SPDX-License-Identifier: Apache-2.0
//! Plain text rendering of display records, aligned for a monospace font.
use crate::{
    display::{Body, DisplayRecord, Row, UnitKind, Value},
    time::text_time,
};

const DN_INDENT: &str = "        ";

fn value_text(value: &Value) -> String {
    match value {
        Value::Text(text) => text.clone(),
        Value::Time(time) => text_time(time),
        Value::Name(attrs) if attrs.is_empty() => String::new(),
        Value::Name(attrs) => {
            let mut text = String::from("\n");
            for attr in attrs {
                text.push_str(&format!("{}{}: {}\n", DN_INDENT, attr.display_name, attr.value));
            }
            text
        }
    }
}

fn label_width(rows: &[Row]) -> usize {
    rows.iter()
        .map(|row| row.label.chars().count())
        .max()
        .unwrap_or(0)
}

fn push_rows(out: &mut String, rows: &[Row], prefix: &str) {
    let width = label_width(rows);
    for row in rows {
        let value = value_text(&row.value);
        if row.label.is_empty() && value.is_empty() {
            out.push('\n');
            continue;
        }
        out.push_str(&format!(
            "{}{:<width$}: {}\n",
            prefix,
            row.label,
            value,
            width = width
        ));
    }
}

/// One record as a block of lines.
pub fn record_text(record: &DisplayRecord) -> String {
    let mut out = String::new();
    match record.kind {
        UnitKind::CertFields => push_rows(&mut out, record.rows(), ""),
        UnitKind::Extension => {
            out.push_str(&format!(
                "Extension {}:   {}{} ({})\n",
                record.sequence.map_or(0, |seq| seq + 1),
                if record.critical {
                    "critical   "
                } else {
                    "not critical   "
                },
                record.label,
                record.id.as_deref().unwrap_or_default()
            ));
            match &record.body {
                Body::Rows(rows) => push_rows(&mut out, rows, "  "),
                Body::FreeText(text) => out.push_str(&format!("  {}\n", text.trim())),
            }
        }
        UnitKind::Signature => {
            out.push_str("Certificate Signature:\n");
            match &record.body {
                Body::Rows(rows) => push_rows(&mut out, rows, ""),
                Body::FreeText(text) => out.push_str(&format!("{}\n", text.trim())),
            }
        }
    }
    out
}

pub fn render_records(records: &[DisplayRecord]) -> String {
    let mut out = String::from("X.509 Certificate {\n");
    for record in records {
        out.push_str(&record_text(record));
        out.push('\n');
    }
    out.push('}');
    out
}
