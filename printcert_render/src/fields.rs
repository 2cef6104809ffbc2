// SPDX-License-Identifier: Apache-2.0
//! The certificate fields and signature records.
use bytes::Bytes;
use log::warn;
use printcert_cert::{
    ber::{int_to_decimal, int_to_hex, plain_hex},
    name::{decode_name, name_to_string, parse_name},
    oid::oid_name,
    KeyFamily, KeyParams, PrintCertificate,
};

use crate::{
    display::{Body, DisplayRecord, Row, Value},
    strings::colon_hex,
};

fn name_value(encoded: &Bytes, decode: bool) -> Value {
    let value = parse_name(encoded).and_then(|name| {
        if decode {
            decode_name(&name).map(Value::Name)
        } else {
            name_to_string(&name).map(Value::Text)
        }
    });
    value.unwrap_or_else(|e| {
        warn!("Unable to decode Name: {:?}", e);
        Value::from("Name parsing Error")
    })
}

fn public_key_rows(cert: &PrintCertificate, verbose: bool) -> Vec<Row> {
    let key = cert.public_key();
    let family = match key.family {
        KeyFamily::Unknown => key.algorithm_name.clone(),
        family => family.name().to_string(),
    };
    let mut rows = vec![
        Row::new("Public key", format!("{} ({} bits)", family, key.bit_length)),
        Row::new("Algorithm", key.algorithm_name.as_str()),
    ];
    match key.params {
        KeyParams::Rsa { modulus, exponent } => {
            if verbose {
                rows.push(Row::new("modulus", int_to_hex(&modulus)));
            }
            rows.push(Row::new("public exponent", int_to_decimal(&exponent)));
        }
        KeyParams::Ec { curve, point } => {
            if let Some(curve) = curve {
                rows.push(Row::new("curve", oid_name(&curve)));
            }
            // coordinates can only be split out of an uncompressed point
            if verbose && point.first() == Some(&0x04) {
                let (x, y) = point[1..].split_at((point.len() - 1) / 2);
                rows.push(Row::new("public x coord", plain_hex(x)));
                rows.push(Row::new("public y coord", plain_hex(y)));
            }
        }
        KeyParams::Other => {}
    }
    rows
}

pub fn cert_fields(cert: &PrintCertificate, verbose: bool, decode_names: bool) -> DisplayRecord {
    let mut rows = vec![
        Row::new("Version", cert.version().to_string()),
        Row::new("Serial number", int_to_hex(cert.serial_number())),
        Row::new("Issuer", name_value(cert.issuer(), decode_names)),
        Row::new("Not valid before", cert.not_before()),
        Row::new("Not valid after", cert.not_after()),
        Row::new("Subject", name_value(cert.subject(), decode_names)),
    ];
    rows.extend(public_key_rows(cert, verbose));
    rows.push(Row::new("SHA1 Fingerprint", colon_hex(&cert.fingerprint_sha1())));
    DisplayRecord::cert_fields(rows)
}

pub fn signature(cert: &PrintCertificate, verbose: bool) -> DisplayRecord {
    let algorithm = cert.signature_algorithm();
    if algorithm.is_empty() {
        return DisplayRecord::signature(Body::FreeText(
            "Unable to parse algorithm and signature data".to_string(),
        ));
    }
    let rows = if verbose {
        vec![
            Row::new("Signature Algorithm", oid_name(algorithm)),
            Row::new("Signature", colon_hex(cert.signature())),
        ]
    } else {
        vec![Row::new("Algorithm", oid_name(algorithm))]
    };
    DisplayRecord::signature(Body::Rows(rows))
}
