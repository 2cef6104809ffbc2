// SPDX-License-Identifier: Apache-2.0
//! The output-agnostic description of a certificate that both renderers consume.
use chrono::{DateTime, Utc};
use printcert_cert::{DecodedExtension, SubjectAttribute};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    CertFields,
    Extension,
    Signature,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Time(DateTime<Utc>),
    /// A Name broken down into its attributes.
    Name(Vec<SubjectAttribute>),
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(time: DateTime<Utc>) -> Self {
        Value::Time(time)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    pub value: Value,
}

impl Row {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Row {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Rows nested under the previous one have labels starting with a space.
    pub fn is_sub_row(&self) -> bool {
        self.label.starts_with(' ')
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Rows(Vec<Row>),
    FreeText(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub kind: UnitKind,
    pub label: String,
    /// Extension OID.
    pub id: Option<String>,
    /// Zero-based extension position.
    pub sequence: Option<usize>,
    pub critical: bool,
    pub body: Body,
}

impl DisplayRecord {
    pub fn cert_fields(rows: Vec<Row>) -> Self {
        DisplayRecord {
            kind: UnitKind::CertFields,
            label: "Certificate fields".to_string(),
            id: None,
            sequence: None,
            critical: false,
            body: Body::Rows(rows),
        }
    }

    pub fn signature(body: Body) -> Self {
        DisplayRecord {
            kind: UnitKind::Signature,
            label: "Certificate Signature".to_string(),
            id: None,
            sequence: None,
            critical: false,
            body,
        }
    }

    pub fn extension(ext: &DecodedExtension, body: Body) -> Self {
        DisplayRecord {
            kind: UnitKind::Extension,
            label: ext.kind.display_name().to_string(),
            id: Some(ext.oid.clone()),
            sequence: Some(ext.index),
            critical: ext.critical,
            body,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self.body, Body::Rows(_))
    }

    /// Empty for free text records.
    pub fn rows(&self) -> &[Row] {
        match &self.body {
            Body::Rows(rows) => rows,
            Body::FreeText(_) => &[],
        }
    }
}
