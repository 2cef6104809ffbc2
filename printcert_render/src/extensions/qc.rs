// SPDX-License-Identifier: Apache-2.0
//! Qualified certificate statements (RFC 3739, ETSI EN 319 412-5).
use bcder::{
    decode::{self, Constructed},
    Oid, Tag,
};
use bytes::Bytes;
use printcert_cert::{
    ber::{
        decode_der, int_to_decimal, oid_to_string, take_char_string, take_integer,
        take_oid_string, take_opt_char_string,
    },
    oid::oid_name,
};

use super::{indexed, Rows};
use crate::{
    display::Row,
    general_name::{take_general_name_list, GeneralName},
};

const PKIX_SYNTAX_V1: &str = "1.3.6.1.5.5.7.11.1";
const PKIX_SYNTAX_V2: &str = "1.3.6.1.5.5.7.11.2";
const QC_COMPLIANCE: &str = "0.4.0.1862.1.1";
const QC_LIMIT_VALUE: &str = "0.4.0.1862.1.2";
const QC_RETENTION_PERIOD: &str = "0.4.0.1862.1.3";
const QC_SSCD: &str = "0.4.0.1862.1.4";
const QC_PDS: &str = "0.4.0.1862.1.5";
const QC_TYPE: &str = "0.4.0.1862.1.6";
const QC_CC_LEGISLATION: &str = "0.4.0.1862.1.7";

const QC_TYPE_NAMES: &[(&str, &str)] = &[
    ("0.4.0.1862.1.6.1", "Electronic Signature"),
    ("0.4.0.1862.1.6.2", "Electronic Seal"),
    ("0.4.0.1862.1.6.3", "Website Authentication"),
];

#[derive(Debug, Default)]
struct Semantics {
    identifier: Option<String>,
    registration_authorities: Vec<GeneralName>,
}

#[derive(Debug)]
struct MonetaryValue {
    currency: String,
    amount: Bytes,
    exponent: Bytes,
}

#[derive(Debug)]
struct PdsLocation {
    url: String,
    language: String,
}

#[derive(Debug)]
enum Statement {
    SyntaxV1(Option<Semantics>),
    SyntaxV2(Option<Semantics>),
    Compliance,
    Sscd,
    Type(Vec<String>),
    Limit(MonetaryValue),
    Retention(Bytes),
    Pds(Vec<PdsLocation>),
    Legislation(Vec<String>),
    Other(String),
}

/// Everything asserted by one qcStatements extension. A repeated statement replaces the earlier
/// one.
#[derive(Debug, Default)]
struct QcStatements {
    syntax_v1: bool,
    syntax_v2: bool,
    semantics: Option<Semantics>,
    compliance: bool,
    sscd: bool,
    types: Option<Vec<String>>,
    limit: Option<MonetaryValue>,
    retention_years: Option<Bytes>,
    pds: Option<Vec<PdsLocation>>,
    legislation: Option<Vec<String>>,
}

impl QcStatements {
    fn add(&mut self, statement: Statement) {
        match statement {
            Statement::SyntaxV1(semantics) => {
                self.syntax_v1 = true;
                self.semantics = semantics;
            }
            Statement::SyntaxV2(semantics) => {
                self.syntax_v2 = true;
                self.semantics = semantics;
            }
            Statement::Compliance => self.compliance = true,
            Statement::Sscd => self.sscd = true,
            Statement::Type(types) => self.types = Some(types),
            Statement::Limit(limit) => self.limit = Some(limit),
            Statement::Retention(years) => self.retention_years = Some(years),
            Statement::Pds(locations) => self.pds = Some(locations),
            Statement::Legislation(countries) => self.legislation = Some(countries),
            Statement::Other(id) => log::debug!("Ignoring QC statement {}", id),
        }
    }

    fn into_rows(self) -> Vec<Row> {
        let mut rows = Vec::new();
        let mut idx = 0;
        let mut statement = |rows: &mut Vec<Row>, text: &str| {
            rows.push(Row::new(indexed("Statement", idx), text));
            idx += 1;
        };
        if self.syntax_v1 {
            statement(&mut rows, "QC Syntax V1");
        }
        if self.syntax_v2 {
            statement(&mut rows, "QC Syntax V2");
        }
        if self.syntax_v1 || self.syntax_v2 {
            if let Some(semantics) = self.semantics {
                if let Some(id) = semantics.identifier {
                    rows.push(Row::new("  SemanticsID", oid_name(&id)));
                }
                for authority in semantics.registration_authorities {
                    rows.push(Row::new("  NameRegAuth", authority.to_string()));
                }
            }
        }
        if self.compliance {
            statement(&mut rows, "Qualified Certificate");
        }
        if self.sscd {
            statement(&mut rows, "QC SSCD");
        }
        if let Some(types) = self.types {
            statement(&mut rows, "QC Type");
            for typ in types {
                if let Some((_, name)) = QC_TYPE_NAMES.iter().find(|(oid, _)| *oid == typ) {
                    rows.push(Row::new("  Type", *name));
                }
            }
        }
        if let Some(limit) = self.limit {
            statement(&mut rows, "Reliance Limit");
            rows.push(Row::new("  Currency", limit.currency));
            rows.push(Row::new("  Amount", int_to_decimal(&limit.amount)));
            rows.push(Row::new("  Exponent", int_to_decimal(&limit.exponent)));
        }
        if let Some(years) = self.retention_years {
            statement(&mut rows, "Retention Period");
            rows.push(Row::new("  Years", int_to_decimal(&years)));
        }
        if let Some(locations) = self.pds {
            statement(&mut rows, "PKI Disclosure Statements");
            for location in locations {
                rows.push(Row::new(
                    "  Location",
                    format!("Lang={} URL: {}", location.language, location.url),
                ));
            }
        }
        if let Some(countries) = self.legislation {
            statement(&mut rows, "QC Legislation Countries");
            for country in countries {
                rows.push(Row::new("  Country", country));
            }
        }
        rows
    }
}

fn take_opt_oid_string(cons: &mut Constructed<Bytes>) -> Result<Option<String>, decode::Error> {
    cons.take_opt_primitive_if(Tag::OID, |prim| prim.take_all())?
        .map(|oid| oid_to_string(&Oid(oid)))
        .transpose()
}

fn take_semantics(cons: &mut Constructed<Bytes>) -> Result<Option<Semantics>, decode::Error> {
    cons.take_opt_sequence(|cons| {
        Ok(Semantics {
            identifier: take_opt_oid_string(cons)?,
            registration_authorities: cons
                .take_opt_sequence(take_general_name_list)?
                .unwrap_or_default(),
        })
    })
}

fn take_monetary_value(cons: &mut Constructed<Bytes>) -> Result<MonetaryValue, decode::Error> {
    cons.take_sequence(|cons| {
        // ISO 4217 code, either alphabetic or numeric
        let currency = match cons.take_opt_primitive_if(Tag::INTEGER, |prim| prim.take_all())? {
            Some(numeric) => int_to_decimal(&numeric),
            None => take_char_string(cons)?,
        };
        Ok(MonetaryValue {
            currency,
            amount: take_integer(cons)?,
            exponent: take_integer(cons)?,
        })
    })
}

/// Reads a SEQUENCE OF with `op` taking one element, or `None` at the end.
fn take_sequence_of<T, F>(cons: &mut Constructed<Bytes>, mut op: F) -> Result<Vec<T>, decode::Error>
where
    F: FnMut(&mut Constructed<Bytes>) -> Result<Option<T>, decode::Error>,
{
    cons.take_sequence(|cons| {
        let mut items = Vec::new();
        while let Some(item) = op(cons)? {
            items.push(item);
        }
        Ok(items)
    })
}

fn take_statement(cons: &mut Constructed<Bytes>) -> Result<Option<Statement>, decode::Error> {
    cons.take_opt_sequence(|cons| {
        let id = take_oid_string(cons)?;
        let statement = match id.as_str() {
            PKIX_SYNTAX_V1 => Statement::SyntaxV1(take_semantics(cons)?),
            PKIX_SYNTAX_V2 => Statement::SyntaxV2(take_semantics(cons)?),
            QC_COMPLIANCE => Statement::Compliance,
            QC_SSCD => Statement::Sscd,
            QC_TYPE => Statement::Type(take_sequence_of(cons, take_opt_oid_string)?),
            QC_LIMIT_VALUE => Statement::Limit(take_monetary_value(cons)?),
            QC_RETENTION_PERIOD => Statement::Retention(take_integer(cons)?),
            QC_PDS => Statement::Pds(take_sequence_of(cons, |cons| {
                cons.take_opt_sequence(|cons| {
                    Ok(PdsLocation {
                        url: take_char_string(cons)?,
                        language: take_char_string(cons)?,
                    })
                })
            })?),
            QC_CC_LEGISLATION => {
                Statement::Legislation(take_sequence_of(cons, take_opt_char_string)?)
            }
            _ => Statement::Other(id),
        };
        // statement info that isn't shown
        cons.skip_all()?;
        Ok(statement)
    })
}

pub fn qc_statements(value: &Bytes) -> Rows {
    let statements = decode_der(value, |cons| {
        cons.take_sequence(|cons| {
            let mut statements = QcStatements::default();
            while let Some(statement) = take_statement(cons)? {
                statements.add(statement);
            }
            Ok(statements)
        })
    })?;
    Ok(statements.into_rows())
}

#[cfg(test)]
mod test {
    use printcert_cert::ExtensionKind;

    use super::super::test::{pairs, rows};

    #[test]
    fn shared_statement_counter() {
        assert_eq!(
            rows(
                ExtensionKind::QcStatements,
                "305d301506082b06010505070b013009060704008bec4901023008060604008e4601013014060604\
                 008e460102300a020203d2020105020103300606022a030500301c060604008e4601063012060704\
                 008e46010602060704008e46010603"
            ),
            pairs(&[
                ("Statement[0]", "QC Syntax V1"),
                ("  SemanticsID", "Legal person semantics"),
                ("Statement[1]", "Qualified Certificate"),
                ("Statement[2]", "QC Type"),
                ("  Type", "Electronic Seal"),
                ("  Type", "Website Authentication"),
                ("Statement[3]", "Reliance Limit"),
                ("  Currency", "978"),
                ("  Amount", "5"),
                ("  Exponent", "3"),
            ])
        );
    }
}
