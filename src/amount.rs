use num_bigint::BigUint;
use num_traits::One;

/// An arbitrary-precision, unsigned token amount.
pub type Amount = BigUint;

/// The largest amount an on-chain token balance can hold (`2^256 - 1`).
///
/// Used as the default seed of the bottleneck scan, i.e. the amount treated as "unbounded".
pub fn max_token_amount() -> Amount {
    (Amount::one() << 256usize) - 1u32
}

/// Serde helpers that (de)serialize an [`Amount`] as a base-10 string, which is how token
/// amounts travel between the snapshot collaborators and the transaction builder.
pub mod decimal {
    use core::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    use super::Amount;

    pub fn serialize<S: Serializer>(amount: &Amount, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(amount)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
        deserializer.deserialize_str(DecimalVisitor)
    }

    struct DecimalVisitor;

    impl<'de> Visitor<'de> for DecimalVisitor {
        type Value = Amount;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative base-10 integer string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Amount::parse_bytes(v.trim().as_bytes(), 10)
                .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Amount::from(v))
        }
    }
}
