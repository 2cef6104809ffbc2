// SPDX-License-Identifier: Apache-2.0
//! Classifies subject public keys and estimates their size.
use bcder::{
    decode::{self, Constructed},
    BitString,
};
use bytes::Bytes;
use log::debug;

use crate::{
    ber::{decode_der, int_bit_length, take_integer, take_oid_string},
    oid::oid_name,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFamily {
    Rsa,
    RsassaPss,
    Ecdsa,
    Dsa,
    Dh,
    Unknown,
}

impl KeyFamily {
    pub fn from_oid(oid: &str) -> Self {
        match oid {
            "1.2.840.113549.1.1.1" => KeyFamily::Rsa,
            "1.2.840.113549.1.1.10" => KeyFamily::RsassaPss,
            "1.2.840.10045.2.1" => KeyFamily::Ecdsa,
            "1.2.840.10040.4.1" => KeyFamily::Dsa,
            "1.2.840.10046.2.1" => KeyFamily::Dh,
            _ => KeyFamily::Unknown,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            KeyFamily::Rsa => "RSA",
            KeyFamily::RsassaPss => "RSASSA-PSS",
            KeyFamily::Ecdsa => "EC",
            KeyFamily::Dsa => "DSA",
            KeyFamily::Dh => "DH",
            KeyFamily::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectPublicKeyInfo {
    pub algorithm: String,
    /// Encoded algorithm parameters, empty when absent.
    pub parameters: Bytes,
    /// Content of the `subjectPublicKey` bit string.
    pub key: Bytes,
}

impl SubjectPublicKeyInfo {
    pub fn take_from(cons: &mut Constructed<Bytes>) -> Result<Self, decode::Error> {
        cons.take_sequence(|cons| {
            let (algorithm, parameters) = cons.take_sequence(|cons| {
                let algorithm = take_oid_string(cons)?;
                let parameters = cons.capture_all()?.into_bytes();
                Ok((algorithm, parameters))
            })?;
            let key = BitString::take_from(cons)?.octet_bytes();
            Ok(SubjectPublicKeyInfo {
                algorithm,
                parameters,
                key,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyParams {
    Rsa { modulus: Bytes, exponent: Bytes },
    Ec { curve: Option<String>, point: Bytes },
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDescriptor {
    pub algorithm_oid: String,
    pub algorithm_name: String,
    pub family: KeyFamily,
    /// 0 when the key couldn't be measured.
    pub bit_length: usize,
    pub params: KeyParams,
}

fn take_rsa_key(cons: &mut Constructed<Bytes>) -> Result<(Bytes, Bytes), decode::Error> {
    cons.take_sequence(|cons| Ok((take_integer(cons)?, take_integer(cons)?)))
}

/// Rough key size guess from the raw key length, tuned for RSA-like encodings.
pub fn estimate_bit_length(byte_len: usize) -> usize {
    match byte_len {
        128..=149 => 1024,
        256..=279 => 2048,
        512..=539 => 4096,
        _ => byte_len.saturating_sub(12) * 8,
    }
}

/// Works out what kind of key `spki` holds and how large it is.
///
/// Never fails: a key that doesn't decode is reported with a bit length of 0.
pub fn analyze(spki: &SubjectPublicKeyInfo) -> KeyDescriptor {
    let family = KeyFamily::from_oid(&spki.algorithm);
    let (bit_length, params) = match family {
        KeyFamily::Rsa => match decode_der(&spki.key, take_rsa_key) {
            Ok((modulus, exponent)) => {
                (int_bit_length(&modulus), KeyParams::Rsa { modulus, exponent })
            }
            Err(e) => {
                debug!("Unable to decode RSA public key: {:?}", e);
                (0, KeyParams::Other)
            }
        },
        // this assumes an uncompressed point (leading 0x04); compressed points come out too small
        KeyFamily::Ecdsa => (
            spki.key.len().saturating_sub(1) * 4,
            KeyParams::Ec {
                curve: decode_der(&spki.parameters, take_oid_string).ok(),
                point: spki.key.clone(),
            },
        ),
        KeyFamily::RsassaPss | KeyFamily::Dsa | KeyFamily::Dh | KeyFamily::Unknown => {
            (estimate_bit_length(spki.key.len()), KeyParams::Other)
        }
    };
    KeyDescriptor {
        algorithm_oid: spki.algorithm.clone(),
        algorithm_name: oid_name(&spki.algorithm),
        family,
        bit_length,
        params,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn spki(algorithm: &str, key: Vec<u8>) -> SubjectPublicKeyInfo {
        SubjectPublicKeyInfo {
            algorithm: algorithm.to_string(),
            parameters: Bytes::new(),
            key: Bytes::from(key),
        }
    }

    fn rsa_key(modulus_len: usize) -> Vec<u8> {
        // SEQUENCE { INTEGER modulus, INTEGER 65537 }
        let int_len = modulus_len + 1;
        let mut integer = vec![0x02, 0x82, (int_len >> 8) as u8, int_len as u8, 0x00, 0xc3];
        integer.extend(std::iter::repeat(0x11).take(modulus_len - 1));
        integer.extend_from_slice(&[0x02, 0x03, 0x01, 0x00, 0x01]);
        let mut key = vec![0x30, 0x82, (integer.len() >> 8) as u8, integer.len() as u8];
        key.extend(integer);
        key
    }

    #[test]
    fn rsa_bits_from_modulus() {
        let key = analyze(&spki("1.2.840.113549.1.1.1", rsa_key(256)));
        assert_eq!(key.family, KeyFamily::Rsa);
        assert_eq!(key.algorithm_name, "RSA");
        assert_eq!(key.bit_length, 2048);
        match key.params {
            KeyParams::Rsa { exponent, .. } => assert_eq!(&exponent[..], &[0x01, 0x00, 0x01]),
            other => panic!("unexpected params {:?}", other),
        }
        assert_eq!(analyze(&spki("1.2.840.113549.1.1.1", rsa_key(384))).bit_length, 3072);
    }

    #[test]
    fn broken_rsa_key() {
        let key = analyze(&spki("1.2.840.113549.1.1.1", vec![0x30, 0x03, 0x02]));
        assert_eq!(key.bit_length, 0);
        assert_eq!(key.params, KeyParams::Other);
    }

    #[test]
    fn ec_point() {
        let mut point = vec![0x04];
        point.extend([0xab; 64]);
        let mut info = spki("1.2.840.10045.2.1", point);
        info.parameters = Bytes::from_static(&[0x06, 0x08, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07]);
        let key = analyze(&info);
        assert_eq!(key.family, KeyFamily::Ecdsa);
        assert_eq!(key.bit_length, 256);
        match key.params {
            KeyParams::Ec { curve, .. } => assert_eq!(curve.as_deref(), Some("1.2.840.10045.3.1.7")),
            other => panic!("unexpected params {:?}", other),
        }
        assert_eq!(analyze(&spki("1.2.840.10045.2.1", vec![])).bit_length, 0);
    }

    #[test]
    fn heuristic_sizes() {
        assert_eq!(estimate_bit_length(140), 1024);
        assert_eq!(estimate_bit_length(270), 2048);
        assert_eq!(estimate_bit_length(526), 4096);
        assert_eq!(estimate_bit_length(44), 256);
        assert_eq!(estimate_bit_length(5), 0);
        let key = analyze(&spki("1.2.840.113549.1.1.10", vec![0; 270]));
        assert_eq!(key.family, KeyFamily::RsassaPss);
        assert_eq!(key.bit_length, 2048);
        assert_eq!(analyze(&spki("1.3.101.112", vec![0; 32])).family, KeyFamily::Unknown);
    }
}
