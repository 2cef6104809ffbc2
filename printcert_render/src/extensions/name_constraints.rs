// SPDX-License-Identifier: Apache-2.0
use bcder::{
    decode::{self, Constructed},
    Tag,
};
use bytes::Bytes;
use printcert_cert::ber::{decode_der, int_to_decimal};

use super::{indexed, Rows};
use crate::{display::Row, general_name::GeneralName};

struct Subtree {
    base: GeneralName,
    minimum: Option<Bytes>,
    maximum: Option<Bytes>,
}

fn take_subtrees(cons: &mut Constructed<Bytes>) -> Result<Vec<Subtree>, decode::Error> {
    let mut subtrees = Vec::new();
    while let Some(subtree) = cons.take_opt_sequence(|cons| {
        Ok(Subtree {
            base: GeneralName::take_from(cons)?,
            minimum: cons.take_opt_primitive_if(Tag::CTX_0, |prim| prim.take_all())?,
            maximum: cons.take_opt_primitive_if(Tag::CTX_1, |prim| prim.take_all())?,
        })
    })? {
        subtrees.push(subtree);
    }
    Ok(subtrees)
}

fn subtree_rows(title: &str, subtrees: Vec<Subtree>, rows: &mut Vec<Row>) {
    for (idx, subtree) in subtrees.into_iter().enumerate() {
        rows.push(Row::new(indexed(title, idx), subtree.base.to_string()));
        if let Some(minimum) = subtree.minimum {
            rows.push(Row::new("  minimum", int_to_decimal(&minimum)));
        }
        if let Some(maximum) = subtree.maximum {
            rows.push(Row::new("  maximum", int_to_decimal(&maximum)));
        }
    }
}

pub fn name_constraints(value: &Bytes) -> Rows {
    decode_der(value, |cons| {
        cons.take_sequence(|cons| {
            let permitted = cons.take_opt_constructed_if(Tag::CTX_0, take_subtrees)?;
            let excluded = cons.take_opt_constructed_if(Tag::CTX_1, take_subtrees)?;
            let mut rows = Vec::new();
            subtree_rows("Permitted Subtree", permitted.unwrap_or_default(), &mut rows);
            subtree_rows("Excluded Subtree", excluded.unwrap_or_default(), &mut rows);
            Ok(rows)
        })
    })
}

#[cfg(test)]
mod test {
    use printcert_cert::ExtensionKind;

    use super::super::test::{pairs, rows};

    #[test]
    fn permitted_and_excluded() {
        assert_eq!(
            rows(
                ExtensionKind::NameConstraints,
                "3026a010300e820c2e6578616d706c652e636f6da112301087080a000000ff000000800101810105"
            ),
            pairs(&[
                ("Permitted Subtree[0]", "DNS: .example.com"),
                ("Excluded Subtree[0]", "IP Address: 10.0.0.0/255.0.0.0"),
                ("  minimum", "1"),
                ("  maximum", "5"),
            ])
        );
    }
}
