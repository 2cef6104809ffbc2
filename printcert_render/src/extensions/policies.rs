// SPDX-License-Identifier: Apache-2.0
use bcder::{
    decode::{self, Constructed},
    Tag,
};
use bytes::Bytes;
use printcert_cert::{
    ber::{
        decode_der, int_to_decimal, take_char_string, take_integer, take_oid_string,
        take_opt_char_string,
    },
    oid::oid_name,
};

use super::{indexed, Rows};
use crate::display::Row;

const CPS_QUALIFIER: &str = "1.3.6.1.5.5.7.2.1";
const USER_NOTICE_QUALIFIER: &str = "1.3.6.1.5.5.7.2.2";

struct Qualifier {
    id: String,
    /// Label and text of the qualifier kinds we know how to show.
    detail: Option<(&'static str, String)>,
}

fn take_user_notice(cons: &mut Constructed<Bytes>) -> Result<String, decode::Error> {
    cons.take_sequence(|cons| {
        let notice_ref = cons.take_opt_sequence(|cons| {
            let organization = take_char_string(cons)?;
            let numbers = cons.take_sequence(|cons| {
                let mut numbers = Vec::new();
                while let Some(number) =
                    cons.take_opt_primitive_if(Tag::INTEGER, |prim| prim.take_all())?
                {
                    numbers.push(int_to_decimal(&number));
                }
                Ok(numbers)
            })?;
            Ok(format!("{} ({})", organization, numbers.join(", ")))
        })?;
        let explicit_text = take_opt_char_string(cons)?;
        let parts: Vec<String> = notice_ref.into_iter().chain(explicit_text).collect();
        Ok(parts.join(" - "))
    })
}

fn take_qualifier(cons: &mut Constructed<Bytes>) -> Result<Option<Qualifier>, decode::Error> {
    cons.take_opt_sequence(|cons| {
        let id = take_oid_string(cons)?;
        let detail = match id.as_str() {
            CPS_QUALIFIER => Some(("  - CPS URI", take_char_string(cons)?)),
            USER_NOTICE_QUALIFIER => Some(("  - User Notice", take_user_notice(cons)?)),
            _ => {
                cons.skip_all()?;
                None
            }
        };
        Ok(Qualifier { id, detail })
    })
}

pub fn certificate_policies(value: &Bytes) -> Rows {
    decode_der(value, |cons| {
        cons.take_sequence(|cons| {
            let mut rows = Vec::new();
            let mut idx = 0;
            while let Some(policy_rows) = cons.take_opt_sequence(|cons| {
                let policy = take_oid_string(cons)?;
                let mut rows = vec![Row::new(indexed("certificatePolicy", idx), oid_name(&policy))];
                let qualifiers = cons
                    .take_opt_sequence(|cons| {
                        let mut qualifiers = Vec::new();
                        while let Some(qualifier) = take_qualifier(cons)? {
                            qualifiers.push(qualifier);
                        }
                        Ok(qualifiers)
                    })?
                    .unwrap_or_default();
                for (qualifier_idx, qualifier) in qualifiers.into_iter().enumerate() {
                    rows.push(Row::new(
                        format!("  {}", indexed("qualifier", qualifier_idx)),
                        oid_name(&qualifier.id),
                    ));
                    if let Some((label, text)) = qualifier.detail {
                        rows.push(Row::new(label, text));
                    }
                }
                Ok(rows)
            })? {
                rows.extend(policy_rows);
                idx += 1;
            }
            Ok(rows)
        })
    })
}

pub fn policy_constraints(value: &Bytes) -> Rows {
    decode_der(value, |cons| {
        cons.take_sequence(|cons| {
            let mut rows = Vec::new();
            if let Some(skip) = cons.take_opt_primitive_if(Tag::CTX_0, |prim| prim.take_all())? {
                rows.push(Row::new("Require explicit", int_to_decimal(&skip)));
            }
            if let Some(skip) = cons.take_opt_primitive_if(Tag::CTX_1, |prim| prim.take_all())? {
                rows.push(Row::new("Inhibit mapping", int_to_decimal(&skip)));
            }
            Ok(rows)
        })
    })
}

pub fn policy_mappings(value: &Bytes) -> Rows {
    decode_der(value, |cons| {
        cons.take_sequence(|cons| {
            let mut rows = Vec::new();
            while let Some((issuer, subject)) = cons.take_opt_sequence(|cons| {
                Ok((take_oid_string(cons)?, take_oid_string(cons)?))
            })? {
                rows.push(Row::new(
                    "Mapping",
                    format!("issuer: {} --> subject: {}", issuer, subject),
                ));
            }
            Ok(rows)
        })
    })
}

pub fn inhibit_any_policy(value: &Bytes) -> Rows {
    let skip = decode_der(value, take_integer)?;
    Ok(vec![Row::new("Skip certs", int_to_decimal(&skip))])
}
