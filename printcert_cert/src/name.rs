// SPDX-License-Identifier: Apache-2.0
//! Distinguished Name decoding.
use std::collections::HashMap;

use bcder::decode::{self, Constructed};
use bytes::Bytes;
use lazy_static::lazy_static;
use x509_certificate::rfc3280::{AttributeTypeAndValue, Name};

use crate::{
    ber::{decode_der, oid_to_string, take_any_string},
    oid::oid_name_opt,
};

/// (OID, display name, one-line name)
const DN_TYPES: &[(&str, &str, &str)] = &[
    ("2.5.4.3", "Common Name", "CN"),
    ("2.5.4.42", "Given Name", "GIVENNAME"),
    ("2.5.4.4", "Surname", "SURNAME"),
    ("1.2.752.29.4.13", "SE Personnummer", "1.2.752.29.4.13"),
    ("2.5.4.6", "Country", "C"),
    ("2.5.4.7", "Locality", "L"),
    ("2.5.4.8", "State", "ST"),
    ("2.5.4.5", "ID number", "SERIALNUMBER"),
    ("2.5.4.10", "Organization", "O"),
    ("2.5.4.11", "organization Unit", "OU"),
    ("2.5.4.97", "Organization ID", "organizationIdentifier"),
    ("2.5.4.65", "Pseudonym", "Pseudonym"),
    ("2.5.4.46", "DN Qualifier", "DN"),
    ("2.5.4.12", "Title", "T"),
    ("1.2.840.113549.1.9.1", "E-Mail", "E"),
    ("1.3.6.1.5.5.7.9.1", "Date of Birth", "DateOfBirth"),
    ("0.9.2342.19200300.100.1.25", "Domain Component", "DC"),
    ("2.5.4.13", "Description", "description"),
    ("2.5.4.15", "Business Category", "BusinessCategory"),
    ("2.5.4.44", "Generation Qualifier", "GENERATION"),
    ("2.5.4.16", "Postal Address", "PostalAddress"),
    ("1.3.6.1.5.5.7.9.2", "Place of Birth", "PlaceOfBirth"),
    ("1.3.6.1.5.5.7.9.3", "Gender", "Gender"),
    ("1.3.6.1.5.5.7.9.4", "Country of Citizenship", "CountryOfCitizenship"),
];

lazy_static! {
    static ref DN_TYPES_BY_OID: HashMap<&'static str, (&'static str, &'static str)> = DN_TYPES
        .iter()
        .map(|(oid, display, short)| (*oid, (*display, *short)))
        .collect();
}

/// One attribute of a Name, e.g. `Country: SE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectAttribute {
    pub oid: String,
    pub display_name: String,
    pub value: String,
}

impl SubjectAttribute {
    pub fn new(oid: String, value: String) -> Self {
        SubjectAttribute {
            display_name: attribute_display_name(&oid).to_string(),
            oid,
            value,
        }
    }
}

pub fn attribute_display_name(oid: &str) -> &'static str {
    match DN_TYPES_BY_OID.get(oid) {
        Some((display, _)) => display,
        None => oid_name_opt(oid).unwrap_or("Unknown"),
    }
}

fn attribute_short_name(oid: &str) -> String {
    match DN_TYPES_BY_OID.get(oid) {
        Some((_, short)) => short.to_string(),
        None => oid.to_string(),
    }
}

pub fn take_name(cons: &mut Constructed<Bytes>) -> Result<Name, decode::Error> {
    Name::take_from(cons)
}

fn decode_attribute(attr: &AttributeTypeAndValue) -> Result<SubjectAttribute, decode::Error> {
    let value = decode_der(&(**attr.value).clone(), take_any_string)?;
    Ok(SubjectAttribute::new(oid_to_string(&attr.typ)?, value))
}

/// Decodes every RDN of a Name, keeping the multi-valued RDNs grouped.
fn decode_rdns(name: &Name) -> Result<Vec<Vec<SubjectAttribute>>, decode::Error> {
    let mut rdns = Vec::new();
    for rdn in name.iter() {
        let mut attrs = Vec::new();
        for attr in rdn.iter() {
            attrs.push(decode_attribute(attr)?);
        }
        rdns.push(attrs);
    }
    Ok(rdns)
}

/// Flattens a Name into its attributes, in encoding order.
pub fn decode_name(name: &Name) -> Result<Vec<SubjectAttribute>, decode::Error> {
    Ok(decode_rdns(name)?.into_iter().flatten().collect())
}

fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for khar in value.chars() {
        match khar {
            ',' | '+' | '"' | '\\' | '<' | '>' | ';' | '=' => {
                escaped.push('\\');
                escaped.push(khar);
            }
            _ => escaped.push(khar),
        }
    }
    escaped
}

/// The usual one-line form, e.g. `C=SE,O=Example Org,CN=www.example.com`.
pub fn name_to_string(name: &Name) -> Result<String, decode::Error> {
    let rdns = decode_rdns(name)?;
    Ok(rdns
        .iter()
        .map(|rdn| {
            rdn.iter()
                .map(|attr| format!("{}={}", attribute_short_name(&attr.oid), escape_value(&attr.value)))
                .collect::<Vec<_>>()
                .join("+")
        })
        .collect::<Vec<_>>()
        .join(","))
}

/// Decodes a complete DER Name (including its SEQUENCE header).
pub fn parse_name(bytes: &Bytes) -> Result<Name, decode::Error> {
    decode_der(bytes, take_name)
}

#[cfg(test)]
mod test {
    use super::*;

    // C=SE, CN=a of b\,c+O=Example\, Org, 1.2.3.4=#0101ff
    const NAME: &str = "3043310b30090603550406130253453126300f0603550403130861206f6620622c633013060355\
                        040a130c4578616d706c652c204f7267310c300a06032a030404030101ff";

    fn name() -> Name {
        parse_name(&Bytes::from(hex::decode(NAME).unwrap())).unwrap()
    }

    #[test]
    fn display_names() {
        assert_eq!(attribute_display_name("2.5.4.3"), "Common Name");
        assert_eq!(attribute_display_name("2.5.4.9"), "streetAddress");
        assert_eq!(attribute_display_name("1.2.3.4"), "Unknown");
    }

    #[test]
    fn decodes_attributes() {
        let attrs = decode_name(&name()).unwrap();
        let pairs: Vec<_> = attrs
            .iter()
            .map(|a| (a.display_name.as_str(), a.value.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Country", "SE"),
                ("Common Name", "a of b,c"),
                ("Organization", "Example, Org"),
                ("Unknown", "#0101ff"),
            ]
        );
    }

    #[test]
    fn one_line() {
        assert_eq!(
            name_to_string(&name()).unwrap(),
            "C=SE,CN=a of b\\,c+O=Example\\, Org,1.2.3.4=#0101ff"
        );
    }

    #[test]
    fn empty_attribute_type() {
        // SEQUENCE { SET { SEQUENCE { OID with no content, PrintableString "SE" } } }
        let name = parse_name(&Bytes::from(hex::decode("300a31083006060013025345").unwrap()))
            .unwrap();
        assert!(decode_name(&name).is_err());
        assert!(name_to_string(&name).is_err());
    }
}
