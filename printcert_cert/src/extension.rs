// SPDX-License-Identifier: Apache-2.0
use bytes::Bytes;
use log::{trace, warn};
use x509_certificate::rfc5280::{Extension, Extensions};

use bcder::decode;

use crate::ber::{decode_der, oid_to_string};

macro_rules! extension_kinds {
    ($($variant:ident $oid:literal $name:literal),+ $(,)?) => {
        /// The extensions this crate knows how to describe.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ExtensionKind {
            $($variant,)+
            Unknown,
        }

        impl ExtensionKind {
            pub const ALL: &'static [ExtensionKind] = &[$(ExtensionKind::$variant,)+ ExtensionKind::Unknown];

            /// Resolves an extension by its dotted OID. Unregistered OIDs map to `Unknown`.
            pub fn from_oid(oid: &str) -> Self {
                match oid {
                    $($oid => ExtensionKind::$variant,)+
                    _ => ExtensionKind::Unknown,
                }
            }

            pub fn oid(self) -> Option<&'static str> {
                match self {
                    $(ExtensionKind::$variant => Some($oid),)+
                    ExtensionKind::Unknown => None,
                }
            }

            pub fn display_name(self) -> &'static str {
                match self {
                    $(ExtensionKind::$variant => $name,)+
                    ExtensionKind::Unknown => "Unknown extension",
                }
            }
        }
    };
}

extension_kinds![
    BasicConstraints "2.5.29.19" "Basic Constraints",
    AuthorityInfoAccess "1.3.6.1.5.5.7.1.1" "Authority Info Access",
    AuthorityKeyIdentifier "2.5.29.35" "Authority Key Identifier",
    BiometricInfo "1.3.6.1.5.5.7.1.2" "Biometric Info",
    CrlDistributionPoints "2.5.29.31" "CRL Distribution Point",
    CertificateIssuer "2.5.29.29" "Certificate Issuer",
    CertificatePolicies "2.5.29.32" "Certificate Policies",
    ExtendedKeyUsage "2.5.29.37" "Extended Key Usage",
    InhibitAnyPolicy "2.5.29.54" "Inhibit Any Policy",
    IssuerAlternativeName "2.5.29.18" "Issuer Alternative Name",
    KeyUsage "2.5.29.15" "Key Usage",
    LogoType "1.3.6.1.5.5.7.1.12" "Logotype",
    NameConstraints "2.5.29.30" "Name Constraints",
    PolicyConstraints "2.5.29.36" "Policy Constraints",
    PolicyMappings "2.5.29.33" "Policy Mapping",
    PrivateKeyUsagePeriod "2.5.29.16" "Private Key Usage Period",
    QcStatements "1.3.6.1.5.5.7.1.3" "QC Statements",
    SubjectAlternativeName "2.5.29.17" "Subject Alt Name",
    SubjectDirectoryAttributes "2.5.29.9" "Subject Directory Attributes",
    SubjectInfoAccess "1.3.6.1.5.5.7.1.11" "Subject Info Access",
    SubjectKeyIdentifier "2.5.29.14" "Subject Key Identifier",
    OcspNocheck "1.3.6.1.5.5.7.48.1.5" "OCSP No Check",
    AuthContext "1.2.752.201.5.1" "Authentication Context",
    SignedCertificateTimestampList "1.3.6.1.4.1.11129.2.4.2" "Signed Certificate Timestamp List",
    NetscapeCertType "2.16.840.1.113730.1.1" "Netscape Certificate Type",
];

/// One certificate extension, with its value still encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedExtension {
    /// Zero-based position in the certificate's extension list.
    pub index: usize,
    pub oid: String,
    pub kind: ExtensionKind,
    pub critical: bool,
    /// Contents of the `extnValue` OCTET STRING.
    pub value: Bytes,
}

impl DecodedExtension {
    fn from_extension(index: usize, ext: &Extension) -> Result<Self, decode::Error> {
        let oid = oid_to_string(&ext.id)?;
        Ok(DecodedExtension {
            index,
            kind: ExtensionKind::from_oid(&oid),
            oid,
            critical: ext.critical == Some(true),
            value: ext.value.to_bytes(),
        })
    }
}

/// Decodes the content of the `[3]` extensions field of a TBS certificate.
///
/// A broken extension list isn't fatal: the certificate is still worth showing. An extension whose
/// `extnID` can't be read is dropped, the others keep their positions.
pub fn decode_extensions(bytes: &Bytes) -> Vec<DecodedExtension> {
    match decode_der(bytes, |cons| Extensions::take_from(cons)) {
        Ok(exts) => {
            let decoded: Vec<_> = exts
                .iter()
                .enumerate()
                .filter_map(|(idx, ext)| match DecodedExtension::from_extension(idx, ext) {
                    Ok(decoded) => Some(decoded),
                    Err(e) => {
                        warn!("Skipping extension {} with invalid extnID: {:?}", idx, e);
                        None
                    }
                })
                .collect();
            trace!("Decoded {} extensions", decoded.len());
            decoded
        }
        Err(e) => {
            warn!("Cert has invalid extensions field: {:?}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lookup_is_total() {
        assert_eq!(ExtensionKind::from_oid("2.5.29.19"), ExtensionKind::BasicConstraints);
        assert_eq!(ExtensionKind::from_oid("1.2.3.4.5.6"), ExtensionKind::Unknown);
        assert_eq!(ExtensionKind::from_oid(""), ExtensionKind::Unknown);
        assert_eq!(ExtensionKind::Unknown.display_name(), "Unknown extension");
    }

    #[test]
    fn oids_round_trip() {
        for kind in ExtensionKind::ALL {
            match kind.oid() {
                Some(oid) => assert_eq!(ExtensionKind::from_oid(oid), *kind),
                None => assert_eq!(*kind, ExtensionKind::Unknown),
            }
        }
        assert_eq!(ExtensionKind::ALL.len(), 26);
    }

    #[test]
    fn decodes_extension_list() {
        // SEQUENCE { SEQUENCE { basicConstraints, TRUE, OCTET STRING { SEQUENCE {} } } }
        let bytes = Bytes::from(hex::decode("300e300c0603551d130101ff04023000").unwrap());
        let exts = decode_extensions(&bytes);
        assert_eq!(
            exts,
            vec![DecodedExtension {
                index: 0,
                oid: "2.5.29.19".to_string(),
                kind: ExtensionKind::BasicConstraints,
                critical: true,
                value: Bytes::from_static(&[0x30, 0x00]),
            }]
        );
    }

    #[test]
    fn empty_extension_id() {
        let _ = env_logger::builder().is_test(true).try_init();
        // basicConstraints, then an extension whose OID has no content
        let bytes = Bytes::from(
            hex::decode("3017300c0603551d130101ff0402300030070600040330010a").unwrap(),
        );
        let exts = decode_extensions(&bytes);
        assert_eq!(exts.len(), 1);
        assert_eq!(exts[0].kind, ExtensionKind::BasicConstraints);
    }

    #[test]
    fn broken_extension_list() {
        let _ = env_logger::builder().is_test(true).try_init();
        let bytes = Bytes::from_static(&[0x30, 0x05, 0x01]);
        assert!(decode_extensions(&bytes).is_empty());
    }
}
