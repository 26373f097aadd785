use crate::NANOS_PER_UNIT;

/// Decimal SI suffixes, largest first, with their power of ten in nano-units.
const DECIMAL_SUFFIXES: [(&str, u32); 10] = [
    ("E", 27),
    ("P", 24),
    ("T", 21),
    ("G", 18),
    ("M", 15),
    ("k", 12),
    ("", 9),
    ("m", 6),
    ("u", 3),
    ("n", 0),
];

/// Binary SI suffixes, largest first, with their power of two in bytes.
const BINARY_SUFFIXES: [(&str, u32); 6] = [
    ("Ei", 60),
    ("Pi", 50),
    ("Ti", 40),
    ("Gi", 30),
    ("Mi", 20),
    ("Ki", 10),
];

fn sign(nanos: i128) -> &'static str {
    if nanos < 0 { "-" } else { "" }
}

/// Largest decimal suffix that leaves an integer mantissa: `1500m`, `2`, `3k`.
pub(crate) fn decimal(nanos: i128) -> String {
    if nanos == 0 {
        return "0".to_string();
    }
    let magnitude = nanos.unsigned_abs();
    DECIMAL_SUFFIXES
        .iter()
        .find(|(_, power)| magnitude % 10u128.pow(*power) == 0)
        .map(|(suffix, power)| {
            format!("{}{}{}", sign(nanos), magnitude / 10u128.pow(*power), suffix)
        })
        .unwrap_or_else(|| format!("{}{}n", sign(nanos), magnitude))
}

/// Largest exact binary suffix for whole byte counts of at least 1Ki,
/// falling back to [`decimal`] for everything else.
pub(crate) fn binary_or_decimal(nanos: i128) -> String {
    let magnitude = nanos.unsigned_abs();
    let unit = NANOS_PER_UNIT as u128;
    if magnitude % unit == 0 {
        let bytes = magnitude / unit;
        if bytes >= 1024 {
            if let Some((suffix, shift)) = BINARY_SUFFIXES
                .iter()
                .find(|(_, shift)| bytes % (1u128 << shift) == 0)
            {
                return format!("{}{}{}", sign(nanos), bytes >> shift, suffix);
            }
        }
    }
    decimal(nanos)
}
