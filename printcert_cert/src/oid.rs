// SPDX-License-Identifier: Apache-2.0
//! Human readable names for well-known object identifiers.
use std::collections::HashMap;

use lazy_static::lazy_static;

const OID_NAMES: &[(&str, &str)] = &[
    // public key algorithms
    ("1.2.840.113549.1.1.1", "RSA"),
    ("1.2.840.113549.1.1.10", "RSASSA-PSS"),
    ("1.2.840.10045.2.1", "EC"),
    ("1.2.840.10040.4.1", "DSA"),
    ("1.2.840.10046.2.1", "DH"),
    ("1.3.101.112", "Ed25519"),
    ("1.3.101.113", "Ed448"),
    // signature algorithms
    ("1.2.840.113549.1.1.4", "MD5withRSA"),
    ("1.2.840.113549.1.1.5", "SHA1withRSA"),
    ("1.2.840.113549.1.1.11", "SHA256withRSA"),
    ("1.2.840.113549.1.1.12", "SHA384withRSA"),
    ("1.2.840.113549.1.1.13", "SHA512withRSA"),
    ("1.2.840.10045.4.1", "SHA1withECDSA"),
    ("1.2.840.10045.4.3.2", "SHA256withECDSA"),
    ("1.2.840.10045.4.3.3", "SHA384withECDSA"),
    ("1.2.840.10045.4.3.4", "SHA512withECDSA"),
    ("1.2.840.10040.4.3", "SHA1withDSA"),
    // named curves
    ("1.2.840.10045.3.1.7", "secp256r1 [NIST P-256]"),
    ("1.3.132.0.34", "secp384r1 [NIST P-384]"),
    ("1.3.132.0.35", "secp521r1 [NIST P-521]"),
    ("1.3.36.3.3.2.8.1.1.7", "brainpoolP256r1"),
    ("1.3.36.3.3.2.8.1.1.11", "brainpoolP384r1"),
    ("1.3.36.3.3.2.8.1.1.13", "brainpoolP512r1"),
    // hash algorithms
    ("1.3.14.3.2.26", "SHA-1"),
    ("2.16.840.1.101.3.4.2.1", "SHA-256"),
    ("2.16.840.1.101.3.4.2.2", "SHA-384"),
    ("2.16.840.1.101.3.4.2.3", "SHA-512"),
    // extended key usage
    ("2.5.29.37.0", "anyExtendedKeyUsage"),
    ("1.3.6.1.5.5.7.3.1", "serverAuth"),
    ("1.3.6.1.5.5.7.3.2", "clientAuth"),
    ("1.3.6.1.5.5.7.3.3", "codeSigning"),
    ("1.3.6.1.5.5.7.3.4", "emailProtection"),
    ("1.3.6.1.5.5.7.3.8", "timeStamping"),
    ("1.3.6.1.5.5.7.3.9", "OCSPSigning"),
    ("1.3.6.1.4.1.311.10.3.12", "documentSigning"),
    // access methods
    ("1.3.6.1.5.5.7.48.1", "ocsp"),
    ("1.3.6.1.5.5.7.48.2", "caIssuers"),
    ("1.3.6.1.5.5.7.48.3", "timeStamping"),
    ("1.3.6.1.5.5.7.48.5", "caRepository"),
    // policies and qualifiers
    ("2.5.29.32.0", "anyPolicy"),
    ("1.3.6.1.5.5.7.2.1", "cps"),
    ("1.3.6.1.5.5.7.2.2", "unotice"),
    ("2.23.140.1.1", "EV Guidelines"),
    ("2.23.140.1.2.1", "Domain Validated"),
    ("2.23.140.1.2.2", "Organization Validated"),
    ("2.23.140.1.2.3", "Individual Validated"),
    ("0.4.0.194112.1.0", "QCP-n"),
    ("0.4.0.194112.1.1", "QCP-l"),
    ("0.4.0.194112.1.2", "QCP-n-qscd"),
    ("0.4.0.194112.1.3", "QCP-l-qscd"),
    ("0.4.0.194112.1.4", "QCP-w"),
    // qualified certificate semantics
    ("0.4.0.194121.1.1", "Natural person semantics"),
    ("0.4.0.194121.1.2", "Legal person semantics"),
    ("0.4.0.194121.1.3", "eIDAS natural person semantics"),
    ("0.4.0.194121.1.4", "eIDAS legal person semantics"),
    ("1.3.6.1.5.5.7.11.1", "PKIX semantics v1"),
    ("1.3.6.1.5.5.7.11.2", "PKIX semantics v2"),
    // name attributes
    ("2.5.4.3", "commonName"),
    ("2.5.4.4", "surname"),
    ("2.5.4.5", "serialNumber"),
    ("2.5.4.6", "countryName"),
    ("2.5.4.7", "localityName"),
    ("2.5.4.8", "stateOrProvinceName"),
    ("2.5.4.9", "streetAddress"),
    ("2.5.4.10", "organizationName"),
    ("2.5.4.11", "organizationalUnitName"),
    ("2.5.4.12", "title"),
    ("2.5.4.17", "postalCode"),
    ("2.5.4.20", "telephoneNumber"),
    ("2.5.4.41", "name"),
    ("2.5.4.42", "givenName"),
    ("2.5.4.43", "initials"),
    ("2.5.4.97", "organizationIdentifier"),
    ("0.9.2342.19200300.100.1.1", "userId"),
    ("0.9.2342.19200300.100.1.3", "mail"),
    ("1.2.840.113549.1.9.1", "emailAddress"),
    ("1.2.840.113549.1.9.2", "unstructuredName"),
    ("1.3.6.1.5.5.7.9.5", "countryOfResidence"),
];

lazy_static! {
    static ref NAMES_BY_OID: HashMap<&'static str, &'static str> =
        OID_NAMES.iter().copied().collect();
}

/// Looks up a name for a dotted OID.
pub fn oid_name_opt(oid: &str) -> Option<&'static str> {
    NAMES_BY_OID.get(oid).copied()
}

/// Looks up a name for a dotted OID, falling back to the OID itself.
pub fn oid_name(oid: &str) -> String {
    oid_name_opt(oid).unwrap_or(oid).to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_oid() {
        assert_eq!(oid_name("1.3.6.1.5.5.7.3.1"), "serverAuth");
        assert_eq!(oid_name_opt("2.5.4.97"), Some("organizationIdentifier"));
    }

    #[test]
    fn unknown_oid() {
        assert_eq!(oid_name("2.1057762.30"), "2.1057762.30");
        assert_eq!(oid_name_opt("1.2.3.4"), None);
    }
}
