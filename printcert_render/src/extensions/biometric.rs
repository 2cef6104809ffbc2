// SPDX-License-Identifier: Apache-2.0
use bcder::{
    decode::{self, Constructed},
    OctetString, Tag,
};
use bytes::Bytes;
use printcert_cert::ber::{
    decode_der, int_to_decimal, plain_hex, take_oid_string, take_opt_char_string,
};

use super::{indexed, Rows};
use crate::display::Row;

fn take_biometric_type(cons: &mut Constructed<Bytes>) -> Result<String, decode::Error> {
    if let Some(predefined) = cons.take_opt_primitive_if(Tag::INTEGER, |prim| prim.take_all())? {
        return Ok(match &predefined[..] {
            [0] => "Picture".to_string(),
            [1] => "Handwritten signature".to_string(),
            _ => int_to_decimal(&predefined),
        });
    }
    take_oid_string(cons)
}

fn take_hash_algorithm(cons: &mut Constructed<Bytes>) -> Result<String, decode::Error> {
    cons.take_sequence(|cons| {
        let algorithm = take_oid_string(cons)?;
        cons.skip_all()?;
        Ok(algorithm)
    })
}

pub fn biometric_info(value: &Bytes) -> Rows {
    decode_der(value, |cons| {
        cons.take_sequence(|cons| {
            let mut rows = Vec::new();
            let mut idx = 0;
            while let Some(data_rows) = cons.take_opt_sequence(|cons| {
                let typ = take_biometric_type(cons)?;
                let hash_algorithm = take_hash_algorithm(cons)?;
                let hash = OctetString::take_from(cons)?.to_bytes();
                let source = take_opt_char_string(cons)?;
                let mut rows = vec![
                    Row::new(indexed("Biometric data", idx), format!("Type: {}", typ)),
                    Row::new("  Hash algoritm", hash_algorithm),
                    Row::new("  Hash value", plain_hex(&hash)),
                ];
                if let Some(source) = source {
                    rows.push(Row::new("  Source UIR", source));
                }
                Ok(rows)
            })? {
                rows.extend(data_rows);
                idx += 1;
            }
            Ok(rows)
        })
    })
}
