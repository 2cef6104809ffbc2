// SPDX-License-Identifier: Apache-2.0
//! Swedish eID authentication context extension (1.2.752.201.5.1).
//!
//! The interesting part is a SAML auth context XML document carried in a UTF8String. Only a
//! handful of attributes are shown, so they are picked out with regexes instead of a full XML
//! parser.
use std::collections::HashMap;

use bytes::Bytes;
use lazy_static::lazy_static;
use printcert_cert::ber::{decode_der, take_char_string, take_opt_char_string};
use regex::{Regex, RegexBuilder};

use super::{indexed, Rows};
use crate::{display::Row, general_name::GENERAL_NAME_TAGS};

fn build_regex(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .dot_matches_new_line(true)
        .build()
        .expect("static regex is valid")
}

lazy_static! {
    static ref AUTH_CONTEXT_INFO: Regex = build_regex(r"<(?:[\w.-]+:)?AuthContextInfo\b([^>]*)>");
    static ref ATTRIBUTE_MAPPING: Regex = build_regex(
        r"<(?:[\w.-]+:)?AttributeMapping\b([^>]*)>(.*?)</(?:[\w.-]+:)?AttributeMapping\s*>"
    );
    static ref SAML_ATTRIBUTE: Regex = build_regex(r"<(?:[\w.-]+:)?Attribute\b([^>]*)>");
    static ref XML_ATTRIBUTE: Regex =
        build_regex(r#"([\w.:-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#);
}

/// (row label, AuthContextInfo attribute)
const CONTEXT_INFO_ROWS: &[(&str, &str)] = &[
    ("  Identity Provider", "IdentityProvider"),
    ("  Level of Assurance", "AuthnContextClassRef"),
    ("  Authn Instant", "AuthenticationInstant"),
    ("  Assertion Ref", "AssertionRef"),
    ("  ServiceID", "ServiceID"),
];

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn xml_attributes(tag_body: &str) -> HashMap<String, String> {
    XML_ATTRIBUTE
        .captures_iter(tag_body)
        .filter_map(|caps| {
            let value = caps.get(2).or_else(|| caps.get(3))?;
            Some((caps[1].to_string(), unescape_xml(value.as_str())))
        })
        .collect()
}

fn context_info_rows(xml: &str) -> Vec<Row> {
    let mut rows = Vec::new();
    if let Some(caps) = AUTH_CONTEXT_INFO.captures(xml) {
        let attrs = xml_attributes(&caps[1]);
        for (label, attr) in CONTEXT_INFO_ROWS {
            match attrs.get(*attr) {
                Some(value) if !value.is_empty() => rows.push(Row::new(*label, value.as_str())),
                _ => {}
            }
        }
    }
    for (idx, caps) in ATTRIBUTE_MAPPING.captures_iter(xml).enumerate() {
        let attrs = xml_attributes(&caps[1]);
        let typ = attrs.get("Type").map(String::as_str).unwrap_or_default();
        let mut reference = attrs.get("Ref").cloned().unwrap_or_default();
        if typ.eq_ignore_ascii_case("san") {
            // subject alt name references are GeneralName tag numbers
            if let Some(tag) = reference
                .parse::<usize>()
                .ok()
                .and_then(|n| GENERAL_NAME_TAGS.get(n))
            {
                reference = tag.to_string();
            }
        }
        let name = SAML_ATTRIBUTE
            .captures(&caps[2])
            .and_then(|attr| xml_attributes(&attr[1]).remove("Name"))
            .unwrap_or_default();
        rows.push(Row::new(
            format!("  Attribute mapping {}", idx),
            format!("SAML: {} --> Type={} Ref={}", name, typ, reference),
        ));
    }
    rows
}

pub fn auth_context(value: &Bytes) -> Rows {
    decode_der(value, |cons| {
        cons.take_sequence(|cons| {
            let mut rows = Vec::new();
            let mut idx = 0;
            while let Some((context_type, info)) = cons.take_opt_sequence(|cons| {
                Ok((take_char_string(cons)?, take_opt_char_string(cons)?))
            })? {
                rows.push(Row::new(indexed("SAMLAuthContext", idx), context_type));
                if let Some(info) = info {
                    rows.extend(context_info_rows(&info));
                }
                idx += 1;
            }
            Ok(rows)
        })
    })
}

#[cfg(test)]
mod test {
    use printcert_cert::ExtensionKind;

    use super::super::test::{ext, pairs};
    use super::*;
    use crate::{display::Value, extensions::decode_extension};

    fn tlv(tag: u8, content: &[u8]) -> Vec<u8> {
        let mut out = vec![tag];
        if content.len() < 0x80 {
            out.push(content.len() as u8);
        } else {
            out.extend_from_slice(&[0x82, (content.len() >> 8) as u8, content.len() as u8]);
        }
        out.extend_from_slice(content);
        out
    }

    const XML: &str = r#"<saci:SAMLAuthContext xmlns:saci="http://id.elegnamnden.se/auth-cont/1.0/saci"><saci:AuthContextInfo IdentityProvider="https://idp.example.com" AuthenticationInstant="2022-01-01T10:00:00.000Z" ServiceID="Sign &amp; Seal" AssertionRef=""/><saci:IdAttributes><saci:AttributeMapping Type="rdn" Ref="2.5.4.5"><saml:Attribute Name="urn:oid:1.2.752.29.4.13"/></saci:AttributeMapping><saci:AttributeMapping Type="san" Ref="1"><saml:Attribute Name="urn:oid:0.9.2342.19200300.100.1.3"/></saci:AttributeMapping></saci:IdAttributes></saci:SAMLAuthContext>"#;

    #[test]
    fn saml_context() {
        let context_type = tlv(0x0c, b"http://id.elegnamnden.se/auth-cont/1.0/saci");
        let info = tlv(0x0c, XML.as_bytes());
        let value = tlv(0x30, &tlv(0x30, &[context_type, info].concat()));
        let mut extension = ext(ExtensionKind::AuthContext, "3000");
        extension.value = Bytes::from(value);
        let record = decode_extension(&extension);
        let decoded: Vec<_> = record
            .rows()
            .iter()
            .map(|row| match &row.value {
                Value::Text(text) => (row.label.clone(), text.clone()),
                other => panic!("unexpected value {:?}", other),
            })
            .collect();
        assert_eq!(
            decoded,
            pairs(&[
                ("SAMLAuthContext[0]", "http://id.elegnamnden.se/auth-cont/1.0/saci"),
                ("  Identity Provider", "https://idp.example.com"),
                ("  Authn Instant", "2022-01-01T10:00:00.000Z"),
                ("  ServiceID", "Sign & Seal"),
                (
                    "  Attribute mapping 0",
                    "SAML: urn:oid:1.2.752.29.4.13 --> Type=rdn Ref=2.5.4.5"
                ),
                (
                    "  Attribute mapping 1",
                    "SAML: urn:oid:0.9.2342.19200300.100.1.3 --> Type=san Ref=E-Mail"
                ),
            ])
        );
    }

    #[test]
    fn context_without_info() {
        let context_type = tlv(0x0c, b"urn:other");
        let value = tlv(0x30, &tlv(0x30, &context_type));
        let mut extension = ext(ExtensionKind::AuthContext, "3000");
        extension.value = Bytes::from(value);
        assert_eq!(decode_extension(&extension).rows().len(), 1);
    }
}
