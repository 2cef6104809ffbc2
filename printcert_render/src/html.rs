// SPDX-License-Identifier: Apache-2.0
//! HTML table rendering of display records.
use std::fmt;

use crate::{
    classes::{RowClasses, TableClasses},
    display::{Body, DisplayRecord, Row, UnitKind, Value},
    html_escape::{html_escape, HtmlEscapable},
    Render,
};

const COLUMNS: usize = 2;

fn attribute(name: &str, value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!(" {}='{}'", name, html_escape(value))
    }
}

/// A `<table>` built row by row. Cell contents are markup and are not escaped.
#[derive(Debug, Clone, Default)]
pub struct Table {
    class: String,
    rows: Vec<String>,
}

impl Table {
    pub fn new(class: &str) -> Self {
        Table {
            class: class.to_string(),
            rows: Vec::new(),
        }
    }

    /// The last cell spans `colspan` columns.
    pub fn add_row(&mut self, cells: &[&str], classes: &RowClasses, colspan: usize) {
        let mut row = format!("<tr{}>", attribute("class", classes.row));
        for (idx, cell) in cells.iter().enumerate() {
            let span = if idx + 1 == cells.len() && colspan > 1 {
                format!(" colspan='{}'", colspan)
            } else {
                String::new()
            };
            row.push_str(&format!(
                "<td{}{}>{}</td>",
                attribute("class", classes.cell(idx)),
                span,
                cell
            ));
        }
        row.push_str("</tr>");
        self.rows.push(row);
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<table{}>", attribute("class", &self.class))?;
        for row in &self.rows {
            f.write_str(row)?;
        }
        f.write_str("</table>")
    }
}

fn value_html(value: &Value, classes: &TableClasses) -> String {
    match value {
        Value::Text(text) => text.html_escape(),
        Value::Time(time) => time.render(),
        Value::Name(attrs) => {
            let mut table = Table::new(classes.dn_table);
            for attr in attrs {
                table.add_row(
                    &[&attr.display_name.html_escape(), &attr.value.html_escape()],
                    &classes.dn_row,
                    1,
                );
            }
            table.to_string()
        }
    }
}

fn add_value_row(table: &mut Table, row: &Row, classes: &TableClasses, row_classes: &RowClasses) {
    let value = value_html(&row.value, classes);
    table.add_row(&[&row.label.html_escape(), &value], row_classes, 1);
}

fn extension_header(record: &DisplayRecord) -> String {
    format!(
        "Extension {}:   {} ({}) - {}   ",
        record.sequence.map_or(0, |seq| seq + 1),
        record.label,
        record.id.as_deref().unwrap_or_default(),
        if record.critical {
            "critical"
        } else {
            "not critical"
        }
    )
}

fn free_text_html(text: &str) -> String {
    text.html_escape().replace('\n', "<br>").trim().to_string()
}

fn add_record(table: &mut Table, record: &DisplayRecord, classes: &TableClasses) {
    match (record.kind, &record.body) {
        (UnitKind::CertFields, _) => {
            for row in record.rows() {
                let value = value_html(&row.value, classes).replace('\n', "<br>");
                table.add_row(&[&row.label.html_escape(), &value], &classes.cert_field, 1);
            }
        }
        (UnitKind::Extension, body) => {
            table.add_row(
                &[&extension_header(record).html_escape()],
                &classes.extension_head,
                COLUMNS,
            );
            match body {
                Body::Rows(rows) => {
                    for row in rows {
                        if row.is_sub_row() {
                            let label = format!("&nbsp;&nbsp;{}", row.label.html_escape());
                            let value = value_html(&row.value, classes);
                            table.add_row(&[&label, &value], &classes.extension_sub_data, 1);
                        } else {
                            add_value_row(table, row, classes, &classes.extension_data);
                        }
                    }
                }
                Body::FreeText(text) => table.add_row(
                    &["ExtensionData", &free_text_html(text)],
                    &classes.extension_data,
                    1,
                ),
            }
        }
        (UnitKind::Signature, body) => {
            table.add_row(&["Certificate Signature"], &classes.extension_head, COLUMNS);
            match body {
                Body::Rows(rows) => {
                    for row in rows {
                        add_value_row(table, row, classes, &classes.signature_norm);
                    }
                }
                Body::FreeText(text) => table.add_row(
                    &["Signature value", &free_text_html(text)],
                    &classes.signature_verbose,
                    1,
                ),
            }
        }
    }
}

/// Renders the records as a certificate table, preceded by a heading table when `heading` is
/// given.
pub fn render_records(
    records: &[DisplayRecord],
    heading: Option<&str>,
    classes: &TableClasses,
) -> String {
    let mut html = String::new();
    if let Some(heading) = heading {
        let mut head = Table::new(classes.head_table);
        head.add_row(&[&heading.html_escape()], &classes.head, COLUMNS);
        html.push_str(&head.to_string());
    }
    let mut table = Table::new(classes.table);
    for record in records {
        add_record(&mut table, record, classes);
    }
    html.push_str(&table.to_string());
    html
}

#[cfg(test)]
mod test {
    use chrono::{TimeZone, Utc};
    use printcert_cert::SubjectAttribute;

    use super::*;
    use crate::classes::DEFAULT_TABLE_CLASSES;

    #[test]
    fn row_classes() {
        let mut table = Table::new("t");
        let classes = RowClasses {
            row: "r",
            cells: &["a"],
        };
        table.add_row(&["x", "y"], &classes, 2);
        assert_eq!(
            table.to_string(),
            "<table class='t'><tr class='r'><td class='a'>x</td><td colspan='2'>y</td></tr></table>"
        );
        assert_eq!(Table::new("").to_string(), "<table></table>");
    }

    #[test]
    fn heading_table() {
        let html = render_records(&[], Some("My <cert>"), &DEFAULT_TABLE_CLASSES);
        assert_eq!(
            html,
            "<table class='table table-sm cert-table-head'><tr class='certTableHeadRow'>\
             <td class='certTableHead' colspan='2'>My &#x3C;cert&#x3E;</td></tr></table>\
             <table class='table table-sm cert-table'></table>"
        );
        assert!(render_records(&[], None, &DEFAULT_TABLE_CLASSES)
            .starts_with("<table class='table table-sm cert-table'>"));
    }

    #[test]
    fn extension_rows() {
        let record = DisplayRecord {
            kind: UnitKind::Extension,
            label: "Authority Info Access".to_string(),
            id: Some("1.3.6.1.5.5.7.1.1".to_string()),
            sequence: Some(1),
            critical: false,
            body: Body::Rows(vec![
                Row::new("accessMethod[0]", "ocsp"),
                Row::new("  accessLocation", "URI: http://a?b=1&c=2"),
            ]),
        };
        let html = render_records(&[record], None, &DEFAULT_TABLE_CLASSES);
        assert!(html.contains(
            "<tr class='certTableExtHeadRow'><td class='certTableExtHead' colspan='2'>\
             Extension 2:   Authority Info Access (1.3.6.1.5.5.7.1.1) - not critical   </td></tr>"
        ));
        assert!(html.contains(
            "<tr class='certTableExtValueRow'><td class='certTableExtParam'>accessMethod[0]</td>\
             <td class='cerTableExtValue'>ocsp</td></tr>"
        ));
        assert!(html.contains(
            "<tr class='certTableExtSubValueRow'><td class='certTableExtSubParam'>\
             &nbsp;&nbsp;  accessLocation</td><td class='cerTableExtSubValue'>\
             URI: http://a?b=1&#x26;c=2</td></tr>"
        ));
    }

    #[test]
    fn free_text_and_signature() {
        let records = vec![
            DisplayRecord {
                kind: UnitKind::Extension,
                label: "Unknown extension".to_string(),
                id: Some("1.2.3".to_string()),
                sequence: Some(0),
                critical: true,
                body: Body::FreeText("Unknown data structure with 3 bytes of data\n".to_string()),
            },
            DisplayRecord::signature(Body::FreeText(
                "Unable to parse algorithm and signature data".to_string(),
            )),
        ];
        let html = render_records(&records, None, &DEFAULT_TABLE_CLASSES);
        assert!(html.contains("Extension 1:   Unknown extension (1.2.3) - critical   "));
        assert!(html.contains(
            "<td class='certTableExtParam'>ExtensionData</td>\
             <td class='cerTableExtValue'>Unknown data structure with 3 bytes of data</td>"
        ));
        assert!(html.contains(
            "<tr class='certTableValueRow'><td class='certTableExtParam'>Signature value</td>\
             <td class='cerTableMonospaceVal'>Unable to parse algorithm and signature data</td>"
        ));
    }

    #[test]
    fn field_values() {
        let record = DisplayRecord::cert_fields(vec![
            Row::new("Not valid before", Utc.ymd(2022, 1, 1).and_hms(0, 0, 0)),
            Row::new(
                "Subject",
                Value::Name(vec![SubjectAttribute::new(
                    "2.5.4.3".to_string(),
                    "Bob".to_string(),
                )]),
            ),
            Row::new("Note", "a\nb"),
        ]);
        let html = render_records(&[record], None, &DEFAULT_TABLE_CLASSES);
        assert!(html.contains(
            "<td class='cerTableValue'><time datetime='2022-01-01T00:00:00.000Z'>\
             Sat Jan 01 00:00:00 UTC 2022</time></td>"
        ));
        assert!(html.contains(
            "<table class='subjectDNTable'><tr class='subjectDNRow'>\
             <td class='subjectDNParam'>Common Name</td><td class='subjectDNVal'>Bob</td></tr></table>"
        ));
        assert!(html.contains("<td class='cerTableValue'>a<br>b</td>"));
    }
}
