// SPDX-License-Identifier: Apache-2.0

/// CSS classes for one kind of table row: one for the `<tr>`, then one per cell.
///
/// A missing or empty class leaves the element without a `class` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowClasses<'a> {
    pub row: &'a str,
    pub cells: &'a [&'a str],
}

impl<'a> RowClasses<'a> {
    pub fn cell(&self, idx: usize) -> &'a str {
        self.cells.get(idx).copied().unwrap_or("")
    }
}

/// CSS classes used by the HTML renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableClasses<'a> {
    pub table: &'a str,
    pub head_table: &'a str,
    pub dn_table: &'a str,
    pub head: RowClasses<'a>,
    pub cert_field: RowClasses<'a>,
    pub extension_head: RowClasses<'a>,
    pub extension_data: RowClasses<'a>,
    pub extension_sub_data: RowClasses<'a>,
    pub signature_norm: RowClasses<'a>,
    pub signature_verbose: RowClasses<'a>,
    pub dn_row: RowClasses<'a>,
}

pub const DEFAULT_TABLE_CLASSES: TableClasses<'static> = TableClasses {
    table: "table table-sm cert-table",
    head_table: "table table-sm cert-table-head",
    dn_table: "subjectDNTable",
    head: RowClasses {
        row: "certTableHeadRow",
        cells: &["certTableHead"],
    },
    cert_field: RowClasses {
        row: "certTableValueRow",
        cells: &["certTableParam", "cerTableValue"],
    },
    extension_head: RowClasses {
        row: "certTableExtHeadRow",
        cells: &["certTableExtHead"],
    },
    extension_data: RowClasses {
        row: "certTableExtValueRow",
        cells: &["certTableExtParam", "cerTableExtValue"],
    },
    extension_sub_data: RowClasses {
        row: "certTableExtSubValueRow",
        cells: &["certTableExtSubParam", "cerTableExtSubValue"],
    },
    signature_norm: RowClasses {
        row: "certTableValueRow",
        cells: &["certTableExtParam", "cerTableExtValue"],
    },
    signature_verbose: RowClasses {
        row: "certTableValueRow",
        cells: &["certTableExtParam", "cerTableMonospaceVal"],
    },
    dn_row: RowClasses {
        row: "subjectDNRow",
        cells: &["subjectDNParam", "subjectDNVal"],
    },
};

impl Default for TableClasses<'static> {
    fn default() -> Self {
        DEFAULT_TABLE_CLASSES
    }
}
