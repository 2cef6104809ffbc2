// SPDX-License-Identifier: Apache-2.0
//! Turns each certificate extension into a display record.
use bcder::{
    decode::{self, Constructed, Content},
    BitString, OctetString, Oid, Tag,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use log::{trace, warn};
use printcert_cert::{
    ber::{
        decode_der, int_to_decimal, int_to_hex, oid_to_string, take_oid_string,
        take_opt_any_string,
    },
    name::attribute_display_name,
    oid::oid_name,
    time::parse_generalized_time,
    DecodedExtension, ExtensionKind,
};

use crate::{
    display::{Body, DisplayRecord, Row},
    general_name::{general_names_string, take_general_name_list, take_general_names},
    strings::{asserted_bits, colon_hex},
};

mod access;
mod auth_context;
mod biometric;
mod name_constraints;
mod policies;
mod qc;

const KEY_USAGE_BITS: &[&str] = &[
    "digitalSignature",
    "nonRepudiation",
    "keyEncipherment",
    "dataEncipherment",
    "keyAgreement",
    "keyCertSign",
    "cRLSign",
    "encipherOnly",
    "decipherOnly",
];

const NETSCAPE_CERT_TYPE_BITS: &[&str] = &[
    "SSL Client",
    "SSL Server",
    "S/MIME",
    "Object-signing",
    "Reserved",
    "SSL-CA",
    "S/MIME CA",
    "Object-signing CA",
];

type Rows = Result<Vec<Row>, decode::Error>;

/// Describes one extension. Never fails: an extension whose value doesn't decode gets the same
/// byte count description as an unknown one.
pub fn decode_extension(ext: &DecodedExtension) -> DisplayRecord {
    let body = match decode_body(ext) {
        Ok(body) => body,
        Err(e) => {
            warn!(
                "Unable to decode {} extension ({}): {:?}",
                ext.kind.display_name(),
                ext.oid,
                e
            );
            unknown_body(&ext.value)
        }
    };
    trace!("Decoded extension {} ({})", ext.index, ext.oid);
    DisplayRecord::extension(ext, body)
}

fn decode_body(ext: &DecodedExtension) -> Result<Body, decode::Error> {
    let value = &ext.value;
    let rows = match ext.kind {
        ExtensionKind::BasicConstraints => basic_constraints(value)?,
        ExtensionKind::AuthorityInfoAccess | ExtensionKind::SubjectInfoAccess => {
            access::info_access(value)?
        }
        ExtensionKind::AuthorityKeyIdentifier => authority_key_identifier(value)?,
        ExtensionKind::BiometricInfo => biometric::biometric_info(value)?,
        ExtensionKind::CrlDistributionPoints => access::crl_distribution_points(value)?,
        ExtensionKind::CertificatePolicies => policies::certificate_policies(value)?,
        ExtensionKind::ExtendedKeyUsage => extended_key_usage(value)?,
        ExtensionKind::InhibitAnyPolicy => policies::inhibit_any_policy(value)?,
        ExtensionKind::SubjectAlternativeName | ExtensionKind::IssuerAlternativeName => {
            alternative_names(value)?
        }
        ExtensionKind::KeyUsage => vec![Row::new(
            "Usage",
            named_bits(value, KEY_USAGE_BITS)?.join(" | "),
        )],
        ExtensionKind::NameConstraints => name_constraints::name_constraints(value)?,
        ExtensionKind::PolicyConstraints => policies::policy_constraints(value)?,
        ExtensionKind::PolicyMappings => policies::policy_mappings(value)?,
        ExtensionKind::PrivateKeyUsagePeriod => private_key_usage_period(value)?,
        ExtensionKind::QcStatements => qc::qc_statements(value)?,
        ExtensionKind::SubjectDirectoryAttributes => subject_directory_attributes(value)?,
        ExtensionKind::SubjectKeyIdentifier => subject_key_identifier(value)?,
        ExtensionKind::AuthContext => auth_context::auth_context(value)?,
        ExtensionKind::SignedCertificateTimestampList => vec![Row::new(
            "SignedTimeStampList",
            format!("{} bytes of data", value.len()),
        )],
        ExtensionKind::NetscapeCertType => vec![Row::new(
            "CertType",
            named_bits(value, NETSCAPE_CERT_TYPE_BITS)?.join(" | "),
        )],
        // shown with their header only
        ExtensionKind::CertificateIssuer | ExtensionKind::LogoType | ExtensionKind::OcspNocheck => {
            Vec::new()
        }
        ExtensionKind::Unknown => return Ok(unknown_body(value)),
    };
    Ok(Body::Rows(rows))
}

fn unknown_body(value: &Bytes) -> Body {
    Body::FreeText(format!(
        "Unknown data structure with {} bytes of data",
        value.len()
    ))
}

/// Numbered row label, e.g. `KeyPurposeId[2]`.
fn indexed(label: &str, idx: usize) -> String {
    format!("{}[{}]", label, idx)
}

/// Splits a SEQUENCE OF into the contents of its elements.
///
/// Elements that aren't constructed come back as `None`, so callers can skip them while keeping
/// the position of the others.
fn take_entries(value: &Bytes) -> Result<Vec<Option<Bytes>>, decode::Error> {
    decode_der(value, |cons| {
        cons.take_sequence(|cons| {
            let mut entries = Vec::new();
            while let Some(entry) = cons.take_opt_value(|_, content| match content {
                Content::Constructed(inner) => Ok(Some(inner.capture_all()?.into_bytes())),
                Content::Primitive(prim) => {
                    prim.skip_all()?;
                    Ok(None)
                }
            })? {
                entries.push(entry);
            }
            Ok(entries)
        })
    })
}

fn named_bits(value: &Bytes, names: &[&'static str]) -> Result<Vec<&'static str>, decode::Error> {
    let bits = decode_der(value, BitString::take_from)?;
    Ok(asserted_bits(&bits.octet_bytes(), names))
}

fn basic_constraints(value: &Bytes) -> Rows {
    decode_der(value, |cons| {
        cons.take_sequence(|cons| {
            let ca = cons.take_opt_bool()?.unwrap_or(false);
            let path_len = cons.take_opt_primitive_if(Tag::INTEGER, |prim| prim.take_all())?;
            let mut rows = vec![Row::new("CA", ca.to_string())];
            if let Some(path_len) = path_len {
                rows.push(Row::new("PathLen", int_to_decimal(&path_len)));
            }
            Ok(rows)
        })
    })
}

fn extended_key_usage(value: &Bytes) -> Rows {
    decode_der(value, |cons| {
        cons.take_sequence(|cons| {
            let mut rows = Vec::new();
            while let Some(purpose) = cons.take_opt_primitive_if(Tag::OID, |prim| prim.take_all())? {
                let purpose = oid_to_string(&Oid(purpose))?;
                rows.push(Row::new(indexed("KeyPurposeId", rows.len()), oid_name(&purpose)));
            }
            Ok(rows)
        })
    })
}

fn alternative_names(value: &Bytes) -> Rows {
    let names = decode_der(value, take_general_names)?;
    Ok(names
        .into_iter()
        .map(|name| Row::new(name.label(), name.value.trim()))
        .collect())
}

fn subject_key_identifier(value: &Bytes) -> Rows {
    let key_id = decode_der(value, OctetString::take_from)?;
    Ok(vec![Row::new("Key identifier", colon_hex(&key_id.to_bytes()))])
}

fn authority_key_identifier(value: &Bytes) -> Rows {
    decode_der(value, |cons| {
        cons.take_sequence(|cons| {
            let key_id = cons.take_opt_primitive_if(Tag::CTX_0, |prim| prim.take_all())?;
            let issuer = cons.take_opt_constructed_if(Tag::CTX_1, take_general_name_list)?;
            let serial = cons.take_opt_primitive_if(Tag::CTX_2, |prim| prim.take_all())?;
            let mut rows = Vec::new();
            if let Some(key_id) = key_id {
                rows.push(Row::new("Key identifier", colon_hex(&key_id)));
            }
            if let Some(issuer) = issuer {
                rows.push(Row::new("Cert Issuer", general_names_string(&issuer)));
            }
            if let Some(serial) = serial {
                rows.push(Row::new("Cert serial", int_to_hex(&serial)));
            }
            Ok(rows)
        })
    })
}

fn take_opt_generalized_time(
    cons: &mut Constructed<Bytes>,
    tag: Tag,
) -> Result<Option<DateTime<Utc>>, decode::Error> {
    cons.take_opt_primitive_if(tag, |prim| {
        let text = prim.take_all()?;
        parse_generalized_time(&text).ok_or(decode::Error::Malformed)
    })
}

fn private_key_usage_period(value: &Bytes) -> Rows {
    decode_der(value, |cons| {
        cons.take_sequence(|cons| {
            let mut rows = Vec::new();
            if let Some(not_before) = take_opt_generalized_time(cons, Tag::CTX_0)? {
                rows.push(Row::new("NotBefore", not_before));
            }
            if let Some(not_after) = take_opt_generalized_time(cons, Tag::CTX_1)? {
                rows.push(Row::new("NotAfter", not_after));
            }
            Ok(rows)
        })
    })
}

fn subject_directory_attributes(value: &Bytes) -> Rows {
    decode_der(value, |cons| {
        cons.take_sequence(|cons| {
            let mut rows = Vec::new();
            while let Some(attr_rows) = cons.take_opt_sequence(|cons| {
                let label = attribute_display_name(&take_oid_string(cons)?);
                cons.take_set(|cons| {
                    let mut attr_rows = Vec::new();
                    while let Some(value) = take_opt_any_string(cons)? {
                        attr_rows.push(Row::new(label, value));
                    }
                    Ok(attr_rows)
                })
            })? {
                rows.extend(attr_rows);
            }
            Ok(rows)
        })
    })
}
