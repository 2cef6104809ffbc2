// SPDX-License-Identifier: Apache-2.0

/// Lowercase hex octets separated by colons, e.g. `0a:1b:2c`.
pub fn colon_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect::<Vec<_>>()
        .join(":")
}

/// Whether bit `n` (numbered from the most significant bit of the first octet) is set.
pub fn bit_is_set(octets: &[u8], n: usize) -> bool {
    octets
        .get(n / 8)
        .map_or(false, |octet| octet & (0x80 >> (n % 8)) != 0)
}

/// Names of the set bits of a named bit list, in bit order.
pub fn asserted_bits(octets: &[u8], names: &[&'static str]) -> Vec<&'static str> {
    names
        .iter()
        .enumerate()
        .filter(|(n, _)| bit_is_set(octets, *n))
        .map(|(_, name)| *name)
        .collect()
}
