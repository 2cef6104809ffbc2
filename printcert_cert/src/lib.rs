// SPDX-License-Identifier: Apache-2.0
//! Loading of X.509 certificates for display purposes.
//!
//! Nothing here verifies anything: a certificate only has to be well-formed enough to be shown.
use bcder::{
    decode::{self, Constructed},
    BitString, Tag,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use ring::digest;
use x509_certificate::{certificate::X509Certificate, rfc5280::Certificate};

pub mod ber;
pub mod extension;
pub mod key;
pub mod name;
pub mod oid;
pub mod time;

pub use extension::{DecodedExtension, ExtensionKind};
pub use key::{KeyDescriptor, KeyFamily, KeyParams, SubjectPublicKeyInfo};
pub use name::SubjectAttribute;

use ber::{decode_der, int_to_u64, take_integer, take_oid_string};

const PEM_BEGIN: &str = "-----BEGIN CERTIFICATE-----";
const PEM_END: &str = "-----END CERTIFICATE-----";
const PEM_LINE_LEN: usize = 76;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("certificate is not valid DER: {0:?}")]
    Der(decode::Error),
    #[error("no PEM certificate found")]
    Pem,
    #[error("invalid base64 in PEM certificate: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl From<decode::Error> for Error {
    fn from(e: decode::Error) -> Self {
        Error::Der(e)
    }
}

/// A decoded certificate.
///
/// The Names are kept encoded so that a Name that doesn't decode only spoils its own field.
#[derive(Debug, Clone)]
pub struct PrintCertificate {
    encoded: Bytes,
    version: u64,
    serial_number: Bytes,
    issuer: Bytes,
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
    subject: Bytes,
    public_key_info: SubjectPublicKeyInfo,
    extensions: Vec<DecodedExtension>,
    signature_algorithm: String,
    signature: Bytes,
}

fn take_algorithm(cons: &mut Constructed<Bytes>) -> Result<String, decode::Error> {
    cons.take_sequence(|cons| {
        let oid = take_oid_string(cons)?;
        // parameters are not interpreted
        cons.capture_all()?;
        Ok(oid)
    })
}

impl PrintCertificate {
    pub fn from_der(bytes: impl Into<Bytes>) -> Result<Self, Error> {
        let encoded: Bytes = bytes.into();
        let cert = decode_der(&encoded, |cons| {
            cons.take_sequence(|cons| {
                let cert = cons.take_sequence(|cons| {
                    let version = cons
                        .take_opt_constructed_if(Tag::CTX_0, take_integer)?
                        .and_then(|v| int_to_u64(&v))
                        .unwrap_or(0)
                        + 1;
                    let serial_number = take_integer(cons)?;
                    // repeated in the outer structure
                    take_algorithm(cons)?;
                    let issuer = cons.capture_one()?.into_bytes();
                    let (not_before, not_after) = cons.take_sequence(|cons| {
                        Ok((time::take_time(cons)?, time::take_time(cons)?))
                    })?;
                    let subject = cons.capture_one()?.into_bytes();
                    let public_key_info = SubjectPublicKeyInfo::take_from(cons)?;
                    // issuerUniqueID and subjectUniqueID
                    cons.take_opt_primitive_if(Tag::CTX_1, |prim| prim.skip_all())?;
                    cons.take_opt_primitive_if(Tag::CTX_2, |prim| prim.skip_all())?;
                    let extensions = cons
                        .take_opt_constructed_if(Tag::CTX_3, |cons| cons.capture_all())?
                        .map(|captured| extension::decode_extensions(&captured.into_bytes()))
                        .unwrap_or_default();
                    Ok(PrintCertificate {
                        encoded: encoded.clone(),
                        version,
                        serial_number,
                        issuer,
                        not_before,
                        not_after,
                        subject,
                        public_key_info,
                        extensions,
                        signature_algorithm: String::new(),
                        signature: Bytes::new(),
                    })
                })?;
                let signature_algorithm = take_algorithm(cons)?;
                let signature = BitString::take_from(cons)?.octet_bytes();
                Ok(PrintCertificate {
                    signature_algorithm,
                    signature,
                    ..cert
                })
            })
        })?;
        debug!(
            "Loaded v{} certificate with {} extensions",
            cert.version,
            cert.extensions.len()
        );
        Ok(cert)
    }

    /// Loads the first PEM certificate in `text`.
    pub fn from_pem(text: &str) -> Result<Self, Error> {
        let start = text.find(PEM_BEGIN).ok_or(Error::Pem)? + PEM_BEGIN.len();
        let len = text[start..].find(PEM_END).ok_or(Error::Pem)?;
        let body: String = text[start..start + len]
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        Self::from_der(base64::decode(body)?)
    }

    pub fn to_pem(&self) -> String {
        let body = base64::encode(&self.encoded);
        let mut pem = String::with_capacity(body.len() + body.len() / PEM_LINE_LEN + 64);
        pem.push_str(PEM_BEGIN);
        pem.push('\n');
        for line in body.as_bytes().chunks(PEM_LINE_LEN) {
            pem.push_str(&String::from_utf8_lossy(line));
            pem.push('\n');
        }
        pem.push_str(PEM_END);
        pem
    }

    pub fn encoded(&self) -> &Bytes {
        &self.encoded
    }

    /// 1 for v1, 3 for v3.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Content octets of the serial number INTEGER.
    pub fn serial_number(&self) -> &Bytes {
        &self.serial_number
    }

    /// The encoded issuer Name.
    pub fn issuer(&self) -> &Bytes {
        &self.issuer
    }

    /// The encoded subject Name.
    pub fn subject(&self) -> &Bytes {
        &self.subject
    }

    pub fn not_before(&self) -> DateTime<Utc> {
        self.not_before
    }

    pub fn not_after(&self) -> DateTime<Utc> {
        self.not_after
    }

    pub fn public_key_info(&self) -> &SubjectPublicKeyInfo {
        &self.public_key_info
    }

    pub fn public_key(&self) -> KeyDescriptor {
        key::analyze(&self.public_key_info)
    }

    pub fn extensions(&self) -> &[DecodedExtension] {
        &self.extensions
    }

    pub fn signature_algorithm(&self) -> &str {
        &self.signature_algorithm
    }

    pub fn signature(&self) -> &Bytes {
        &self.signature
    }

    pub fn fingerprint_sha1(&self) -> Vec<u8> {
        digest::digest(&digest::SHA1_FOR_LEGACY_USE_ONLY, &self.encoded)
            .as_ref()
            .to_vec()
    }

    /// Structural dump of the whole certificate.
    pub fn to_original_string(&self) -> String {
        match X509Certificate::from_der(&self.encoded[..]) {
            Ok(x509) => {
                let cert: &Certificate = x509.as_ref();
                format!("{:#?}", cert)
            }
            Err(e) => {
                warn!("Unable to dump certificate structure: {:?}", e);
                format!("{:#?}", self)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn rsa_leaf() -> PrintCertificate {
        PrintCertificate::from_der(&include_bytes!("../../test_certs/rsa_leaf.der")[..]).unwrap()
    }

    #[test]
    fn tbs_fields() {
        let cert = rsa_leaf();
        assert_eq!(cert.version(), 3);
        assert_eq!(ber::int_to_hex(cert.serial_number()), "a1b2c3d4e5f");
        assert_eq!(cert.signature_algorithm(), "1.2.840.113549.1.1.11");
        assert_eq!(cert.signature().len(), 256);
        assert_eq!(cert.not_before().to_rfc3339(), "2022-01-01T00:00:00+00:00");
        assert_eq!(cert.not_after().to_rfc3339(), "2032-12-31T23:59:59+00:00");
        assert_eq!(
            name::name_to_string(&name::parse_name(cert.issuer()).unwrap()).unwrap(),
            "C=SE,O=Example CA Org,CN=Example Issuing CA"
        );
        let kinds: Vec<_> = cert.extensions().iter().map(|ext| ext.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ExtensionKind::BasicConstraints,
                ExtensionKind::KeyUsage,
                ExtensionKind::ExtendedKeyUsage,
                ExtensionKind::SubjectAlternativeName,
                ExtensionKind::SubjectKeyIdentifier,
                ExtensionKind::AuthorityKeyIdentifier,
                ExtensionKind::CrlDistributionPoints,
                ExtensionKind::AuthorityInfoAccess,
                ExtensionKind::CertificatePolicies,
                ExtensionKind::Unknown,
            ]
        );
        assert!(cert.extensions()[9].critical);
        assert_eq!(cert.extensions()[9].oid, "1.2.3.4.5.6");
    }

    #[test]
    fn key_info() {
        let key = rsa_leaf().public_key();
        assert_eq!(key.family, KeyFamily::Rsa);
        assert_eq!(key.bit_length, 2048);
    }

    #[test]
    fn pem_round_trip() {
        let cert = rsa_leaf();
        let pem = cert.to_pem();
        assert!(pem.starts_with("-----BEGIN CERTIFICATE-----\n"));
        assert!(pem.lines().all(|line| line.len() <= 76));
        let again = PrintCertificate::from_pem(&format!("junk before\n{}\n", pem)).unwrap();
        assert_eq!(again.encoded(), cert.encoded());
    }

    #[test]
    fn pem_errors() {
        assert!(matches!(
            PrintCertificate::from_pem("nothing here"),
            Err(Error::Pem)
        ));
        assert!(matches!(
            PrintCertificate::from_pem("-----BEGIN CERTIFICATE-----\n!!!!\n-----END CERTIFICATE-----"),
            Err(Error::Base64(_))
        ));
    }

    #[test]
    fn not_a_certificate() {
        assert!(matches!(
            PrintCertificate::from_der(&b"\x30\x03\x02\x01\x01"[..]),
            Err(Error::Der(_))
        ));
    }

    #[test]
    fn fingerprint() {
        let cert = rsa_leaf();
        let expected = digest::digest(&digest::SHA1_FOR_LEGACY_USE_ONLY, cert.encoded());
        assert_eq!(cert.fingerprint_sha1(), expected.as_ref());
        assert_eq!(cert.fingerprint_sha1().len(), 20);
    }

    #[test]
    fn original_string() {
        let dump = rsa_leaf().to_original_string();
        assert!(dump.contains("tbs_certificate"));
    }
}
