// SPDX-License-Identifier: Apache-2.0
// decodes loosely typed DER values into displayable strings
use bcder::{
    decode::{self, Constructed, Content},
    Mode, Oid, Tag,
};
use bytes::Bytes;

use crate::time;

/// Decodes `bytes` as the content of a constructed value.
pub fn decode_der<T, F>(bytes: &Bytes, op: F) -> Result<T, decode::Error>
where
    F: FnOnce(&mut Constructed<Bytes>) -> Result<T, decode::Error>,
{
    Constructed::decode(bytes.clone(), Mode::Der, op)
}

pub fn take_integer(cons: &mut Constructed<Bytes>) -> Result<Bytes, decode::Error> {
    cons.take_primitive_if(Tag::INTEGER, |prim| prim.take_all())
}

pub fn take_opt_integer(cons: &mut Constructed<Bytes>) -> Result<Option<Bytes>, decode::Error> {
    cons.take_opt_primitive_if(Tag::INTEGER, |prim| prim.take_all())
}

pub fn take_oid_string(cons: &mut Constructed<Bytes>) -> Result<String, decode::Error> {
    oid_to_string(&Oid::take_from(cons)?)
}

/// Dotted form of an OID.
///
/// `Oid`'s own `Display` panics on empty content, so everything that shows an OID goes through
/// here instead.
pub fn oid_to_string<T: AsRef<[u8]>>(oid: &Oid<T>) -> Result<String, decode::Error> {
    let arcs = oid_arcs(oid.as_ref())?;
    let (first, second) = match arcs[0] {
        arc @ 0..=39 => (0, arc),
        arc @ 40..=79 => (1, arc - 40),
        arc => (2, arc - 80),
    };
    let mut text = format!("{}.{}", first, second);
    for arc in &arcs[1..] {
        text.push_str(&format!(".{}", arc));
    }
    Ok(text)
}

/// Splits base-128 subidentifiers. Fails on empty or truncated content and on arcs too large to
/// show.
fn oid_arcs(bytes: &[u8]) -> Result<Vec<u128>, decode::Error> {
    let mut arcs = Vec::new();
    let mut arc: u128 = 0;
    let mut pending = false;
    for &b in bytes {
        if arc >> (128 - 7) != 0 {
            return Err(decode::Error::Malformed);
        }
        arc = (arc << 7) | u128::from(b & 0x7f);
        pending = b & 0x80 != 0;
        if !pending {
            arcs.push(arc);
            arc = 0;
        }
    }
    if pending || arcs.is_empty() {
        return Err(decode::Error::Malformed);
    }
    Ok(arcs)
}

/// Takes the next value, whatever it is, and turns it into text.
///
/// Character strings are decoded according to their type, times become ISO-8601 dates and
/// anything else falls back to `#` followed by the hex of the content octets.
pub fn take_any_string(cons: &mut Constructed<Bytes>) -> Result<String, decode::Error> {
    cons.take_value(content_to_string)
}

pub fn take_opt_any_string(cons: &mut Constructed<Bytes>) -> Result<Option<String>, decode::Error> {
    cons.take_opt_value(content_to_string)
}

fn content_to_string(tag: Tag, content: &mut Content<Bytes>) -> Result<String, decode::Error> {
    match content {
        Content::Primitive(prim) => {
            let bytes = prim.take_all()?;
            Ok(primitive_to_string(tag, &bytes))
        }
        Content::Constructed(inner) => {
            let bytes = inner.capture_all()?;
            Ok(format!("#{}", plain_hex(&bytes)))
        }
    }
}

/// Like [`take_any_string`], but only accepts the character string types.
pub fn take_char_string(cons: &mut Constructed<Bytes>) -> Result<String, decode::Error> {
    cons.take_value(content_to_char_string)
}

pub fn take_opt_char_string(cons: &mut Constructed<Bytes>) -> Result<Option<String>, decode::Error> {
    cons.take_opt_value(content_to_char_string)
}

fn content_to_char_string(tag: Tag, content: &mut Content<Bytes>) -> Result<String, decode::Error> {
    match content {
        Content::Primitive(prim) => {
            let bytes = prim.take_all()?;
            char_string(tag, &bytes).ok_or(decode::Error::Malformed)
        }
        Content::Constructed(_) => Err(decode::Error::Malformed),
    }
}

fn char_string(tag: Tag, bytes: &[u8]) -> Option<String> {
    if tag == Tag::UTF8_STRING
        || tag == Tag::PRINTABLE_STRING
        || tag == Tag::IA5_STRING
        || tag == Tag::NUMERIC_STRING
        || tag == Tag::VISIBLE_STRING
    {
        Some(String::from_utf8_lossy(bytes).into_owned())
    } else if tag == Tag::TELETEX_STRING {
        // treated as Latin-1, like most other tools do
        Some(bytes.iter().map(|&b| b as char).collect())
    } else if tag == Tag::BMP_STRING {
        let units = bytes
            .chunks(2)
            .map(|pair| u16::from_be_bytes([pair[0], *pair.get(1).unwrap_or(&0)]));
        Some(
            char::decode_utf16(units)
                .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect(),
        )
    } else if tag == Tag::UNIVERSAL_STRING {
        Some(
            bytes
                .chunks(4)
                .map(|quad| {
                    let mut word = [0u8; 4];
                    word[..quad.len()].copy_from_slice(quad);
                    char::from_u32(u32::from_be_bytes(word)).unwrap_or(char::REPLACEMENT_CHARACTER)
                })
                .collect(),
        )
    } else {
        None
    }
}

fn primitive_to_string(tag: Tag, bytes: &[u8]) -> String {
    if let Some(text) = char_string(tag, bytes) {
        return text;
    }
    let date = if tag == Tag::GENERALIZED_TIME {
        time::parse_generalized_time(bytes)
    } else if tag == Tag::UTC_TIME {
        time::parse_utc_time(bytes)
    } else {
        None
    };
    if let Some(date) = date {
        return date.format("%Y-%m-%d").to_string();
    }
    if tag == Tag::INTEGER {
        int_to_decimal(bytes)
    } else if tag == Tag::OID {
        oid_to_string(&Oid(bytes)).unwrap_or_else(|_| format!("#{}", plain_hex(bytes)))
    } else if tag == Tag::BOOLEAN {
        (bytes.first().copied().unwrap_or(0) != 0).to_string()
    } else {
        format!("#{}", plain_hex(bytes))
    }
}

/// Lowercase hex without separators.
pub fn plain_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn is_negative(bytes: &[u8]) -> bool {
    bytes.first().map_or(false, |b| b & 0x80 != 0)
}

/// Magnitude of a two's complement big-endian integer, without leading zero octets.
fn magnitude(bytes: &[u8]) -> Vec<u8> {
    let mut mag = bytes.to_vec();
    if is_negative(bytes) {
        for b in mag.iter_mut() {
            *b = !*b;
        }
        for b in mag.iter_mut().rev() {
            let (sum, carry) = b.overflowing_add(1);
            *b = sum;
            if !carry {
                break;
            }
        }
    }
    let first = mag.iter().position(|&b| b != 0).unwrap_or(mag.len());
    mag.split_off(first)
}

/// Formats an INTEGER's content octets in base 10.
pub fn int_to_decimal(bytes: &[u8]) -> String {
    let mut mag = magnitude(bytes);
    if mag.is_empty() {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while !mag.is_empty() {
        let mut rem = 0u32;
        for b in mag.iter_mut() {
            let cur = (rem << 8) | u32::from(*b);
            *b = (cur / 10) as u8;
            rem = cur % 10;
        }
        digits.push(char::from(b'0' + rem as u8));
        let first = mag.iter().position(|&b| b != 0).unwrap_or(mag.len());
        mag.drain(..first);
    }
    if is_negative(bytes) {
        digits.push('-');
    }
    digits.iter().rev().collect()
}

/// Formats an INTEGER's content octets in base 16, lowercase and without leading zeros.
pub fn int_to_hex(bytes: &[u8]) -> String {
    let mag = magnitude(bytes);
    let hex = plain_hex(&mag);
    let hex = hex.trim_start_matches('0');
    let hex = if hex.is_empty() { "0" } else { hex };
    if is_negative(bytes) {
        format!("-{}", hex)
    } else {
        hex.to_string()
    }
}

/// Number of significant bits in the magnitude of an INTEGER.
pub fn int_bit_length(bytes: &[u8]) -> usize {
    let mag = magnitude(bytes);
    match mag.first() {
        Some(first) => (mag.len() - 1) * 8 + (8 - first.leading_zeros() as usize),
        None => 0,
    }
}

pub fn int_to_u64(bytes: &[u8]) -> Option<u64> {
    if is_negative(bytes) {
        return None;
    }
    let mag = magnitude(bytes);
    if mag.len() > 8 {
        return None;
    }
    Some(mag.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
}
