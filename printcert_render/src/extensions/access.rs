// SPDX-License-Identifier: Apache-2.0
use bcder::Tag;
use bytes::Bytes;
use log::warn;
use printcert_cert::{
    ber::{decode_der, take_oid_string},
    oid::oid_name,
};

use super::{indexed, take_entries, Rows};
use crate::{
    display::Row,
    general_name::{take_general_name_list, GeneralName},
};

/// Authority and subject info access. A broken access description is left out.
pub fn info_access(value: &Bytes) -> Rows {
    let mut rows = Vec::new();
    for (idx, entry) in take_entries(value)?.into_iter().enumerate() {
        let decoded = entry.map(|entry| {
            decode_der(&entry, |cons| {
                Ok((take_oid_string(cons)?, GeneralName::take_from(cons)?))
            })
        });
        match decoded {
            Some(Ok((method, location))) => {
                rows.push(Row::new(indexed("accessMethod", idx), oid_name(&method)));
                rows.push(Row::new("  accessLocation", location.to_string()));
            }
            Some(Err(e)) => warn!("Skipping access description {}: {:?}", idx, e),
            None => warn!("Skipping access description {}: not a sequence", idx),
        }
    }
    Ok(rows)
}

/// Only full names are shown; points named relative to the CRL issuer are skipped.
pub fn crl_distribution_points(value: &Bytes) -> Rows {
    let mut rows = Vec::new();
    for (idx, entry) in take_entries(value)?.into_iter().enumerate() {
        let entry = match entry {
            Some(entry) => entry,
            None => continue,
        };
        let names = decode_der(&entry, |cons| {
            let names = cons
                .take_opt_constructed_if(Tag::CTX_0, |cons| {
                    let full_name = cons.take_opt_constructed_if(Tag::CTX_0, take_general_name_list)?;
                    cons.skip_all()?;
                    Ok(full_name)
                })?
                .flatten();
            // reasons and cRLIssuer
            cons.skip_all()?;
            Ok(names.unwrap_or_default())
        });
        match names {
            Ok(names) => rows.extend(
                names
                    .into_iter()
                    .map(|name| Row::new(indexed("DistributionPoint", idx), name.to_string())),
            ),
            Err(e) => warn!("Skipping distribution point {}: {:?}", idx, e),
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod test {
    use printcert_cert::ExtensionKind;

    use super::super::test::{pairs, rows};

    #[test]
    fn info_access_skips_broken_entries() {
        assert_eq!(
            rows(
                ExtensionKind::AuthorityInfoAccess,
                "305b302306082b060105050730018617687474703a2f2f6f6373702e6578616d706c652e636f6d\
                 300a06082b06010505073002302806082b06010505073002861c687474703a2f2f63612e6578616d\
                 706c652e636f6d2f63612e637274"
            ),
            pairs(&[
                ("accessMethod[0]", "ocsp"),
                ("  accessLocation", "URI: http://ocsp.example.com"),
                ("accessMethod[2]", "caIssuers"),
                ("  accessLocation", "URI: http://ca.example.com/ca.crt"),
            ])
        );
    }

    #[test]
    fn distribution_points() {
        assert_eq!(
            rows(
                ExtensionKind::CrlDistributionPoints,
                "30513022a020a01e861c687474703a2f2f63726c2e6578616d706c652e636f6d2f612e63726c300e\
                 a00ca10a30080603550403130178301ba015a013860b687474703a2f2f63726c32820463726c33\
                 81020640"
            ),
            pairs(&[
                ("DistributionPoint[0]", "URI: http://crl.example.com/a.crl"),
                ("DistributionPoint[2]", "URI: http://crl2"),
                ("DistributionPoint[2]", "DNS: crl3"),
            ])
        );
    }
}
