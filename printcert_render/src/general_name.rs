// SPDX-License-Identifier: Apache-2.0
//! GeneralName decoding, shared by the alternative name, access and constraint extensions.
use std::{
    convert::TryFrom,
    fmt,
    net::{Ipv4Addr, Ipv6Addr},
};

use bcder::{
    decode::{self, Constructed, Content},
    Oid, Tag,
};
use bytes::Bytes;
use printcert_cert::{
    ber::{oid_to_string, take_any_string, take_oid_string},
    name::{name_to_string, take_name},
    oid::oid_name,
};

use crate::strings::colon_hex;

/// Labels of the GeneralName choices, by context tag number.
pub const GENERAL_NAME_TAGS: [&str; 9] = [
    "Other Name",
    "E-Mail",
    "DNS",
    "x400Address",
    "Directory Name",
    "EDI Party Name",
    "URI",
    "IP Address",
    "Registered ID",
];

fn tag_index(tag: Tag) -> Option<usize> {
    (0..GENERAL_NAME_TAGS.len()).find(|n| tag == Tag::ctx(*n as u32))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralName {
    /// Index into `GENERAL_NAME_TAGS`, `None` for a tag outside the choice.
    pub tag: Option<usize>,
    /// The tag as encoded, e.g. `[9]`. Labels names whose tag is outside the choice.
    pub raw_tag: String,
    pub value: String,
}

impl GeneralName {
    pub fn label(&self) -> &str {
        match self.tag.and_then(|tag| GENERAL_NAME_TAGS.get(tag)) {
            Some(label) => *label,
            None => self.raw_tag.as_str(),
        }
    }

    pub fn take_from(cons: &mut Constructed<Bytes>) -> Result<Self, decode::Error> {
        cons.take_value(Self::from_content)
    }

    pub fn take_opt_from(cons: &mut Constructed<Bytes>) -> Result<Option<Self>, decode::Error> {
        cons.take_opt_value(Self::from_content)
    }

    fn from_content(tag: Tag, content: &mut Content<Bytes>) -> Result<Self, decode::Error> {
        let index = tag_index(tag);
        let value = match (index, content) {
            (Some(1) | Some(2) | Some(6), Content::Primitive(prim)) => {
                String::from_utf8_lossy(&prim.take_all()?).into_owned()
            }
            (Some(7), Content::Primitive(prim)) => ip_address(&prim.take_all()?),
            (Some(8), Content::Primitive(prim)) => oid_to_string(&Oid(prim.take_all()?))?,
            (Some(4), Content::Constructed(inner)) => name_to_string(&take_name(inner)?)?,
            (Some(0), Content::Constructed(inner)) => {
                let typ = take_oid_string(inner)?;
                let value = inner.take_constructed_if(Tag::CTX_0, take_any_string)?;
                format!("{}: {}", oid_name(&typ), value)
            }
            (None, Content::Primitive(prim)) => raw_string(&prim.take_all()?),
            (_, Content::Primitive(prim)) => colon_hex(&prim.take_all()?),
            (_, Content::Constructed(inner)) => colon_hex(&inner.capture_all()?.into_bytes()),
        };
        Ok(GeneralName {
            tag: index,
            raw_tag: tag.to_string(),
            value,
        })
    }
}

impl fmt::Display for GeneralName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.value)
    }
}

/// Content of a name outside the choice: the text if it is printable, hex otherwise.
fn raw_string(octets: &[u8]) -> String {
    match std::str::from_utf8(octets) {
        Ok(text) if !text.chars().any(char::is_control) => text.to_string(),
        _ => colon_hex(octets),
    }
}

/// Reads GeneralNames until the end of `cons`.
pub fn take_general_name_list(
    cons: &mut Constructed<Bytes>,
) -> Result<Vec<GeneralName>, decode::Error> {
    let mut names = Vec::new();
    while let Some(name) = GeneralName::take_opt_from(cons)? {
        names.push(name);
    }
    Ok(names)
}

pub fn take_general_names(cons: &mut Constructed<Bytes>) -> Result<Vec<GeneralName>, decode::Error> {
    cons.take_sequence(take_general_name_list)
}

/// `GeneralNames {DNS: a | URI: b}`
pub fn general_names_string(names: &[GeneralName]) -> String {
    format!(
        "GeneralNames {{{}}}",
        names
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" | ")
    )
}

/// Formats an iPAddress name. Name constraints carry an address and a mask of the same length.
pub fn ip_address(octets: &[u8]) -> String {
    if let Ok(v4) = <[u8; 4]>::try_from(octets) {
        return Ipv4Addr::from(v4).to_string();
    }
    if let Ok(v6) = <[u8; 16]>::try_from(octets) {
        return Ipv6Addr::from(v6).to_string();
    }
    match octets.len() {
        8 | 32 => {
            let (addr, mask) = octets.split_at(octets.len() / 2);
            format!("{}/{}", ip_address(addr), ip_address(mask))
        }
        _ => colon_hex(octets),
    }
}

#[cfg(test)]
mod test {
    use bcder::Mode;

    use super::*;

    fn decode_names(hex_str: &str) -> Vec<GeneralName> {
        let bytes = Bytes::from(hex::decode(hex_str).unwrap());
        Constructed::decode(bytes, Mode::Der, take_general_names).unwrap()
    }

    #[test]
    fn simple_names() {
        let names = decode_names(
            "3061820f7777772e6578616d706c652e636f6d81066140622e73658608687474703a2f2f788704c0000201\
             88022a03a013060a2b060104018237140203a0050c03754078a41d301b310b3009060355040613025345\
             310c300a06035504031303426f62",
        );
        let strings: Vec<_> = names.iter().map(ToString::to_string).collect();
        assert_eq!(
            strings,
            vec![
                "DNS: www.example.com",
                "E-Mail: a@b.se",
                "URI: http://x",
                "IP Address: 192.0.2.1",
                "Registered ID: 1.2.3",
                "Other Name: 1.3.6.1.4.1.311.20.2.3: u@x",
                "Directory Name: C=SE,CN=Bob",
            ]
        );
        assert_eq!(names[0].label(), "DNS");
        assert_eq!(names[0].value, "www.example.com");
    }

    #[test]
    fn tags_outside_the_choice() {
        // [9] "abc", [10] 00 ff
        let names = decode_names("300989036162638a0200ff");
        assert_eq!(names[0].tag, None);
        assert_eq!(names[0].label(), "[9]");
        assert_eq!(names[0].to_string(), "[9]: abc");
        assert_eq!(names[1].to_string(), "[10]: 00:ff");
    }

    #[test]
    fn ip_forms() {
        assert_eq!(ip_address(&[10, 0, 0, 0, 255, 0, 0, 0]), "10.0.0.0/255.0.0.0");
        let mut v6 = [0u8; 16];
        v6[0] = 0x20;
        v6[1] = 0x01;
        v6[2] = 0x0d;
        v6[3] = 0xb8;
        v6[15] = 1;
        assert_eq!(ip_address(&v6), "2001:db8::1");
        assert_eq!(ip_address(&[1, 2, 3]), "01:02:03");
    }

    #[test]
    fn joined() {
        let names = vec![
            GeneralName {
                tag: Some(2),
                raw_tag: "[2]".to_string(),
                value: "a".to_string(),
            },
            GeneralName {
                tag: Some(6),
                raw_tag: "[6]".to_string(),
                value: "b".to_string(),
            },
        ];
        assert_eq!(general_names_string(&names), "GeneralNames {DNS: a | URI: b}");
    }
}
