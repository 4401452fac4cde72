//! Money amounts in whole rubles.

use serde::{Deserialize, Deserializer};

/// Whole rubles. Every price and total in the venue is an integer amount.
pub type Rubles = i64;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Int(i64),
    Float(f64),
}

impl RawAmount {
    fn rubles(self) -> Rubles {
        match self {
            RawAmount::Int(v) => v,
            RawAmount::Float(v) => v.round() as Rubles,
        }
    }
}

/// Accept an amount sent either as an integer or as a float (broom prices are
/// stored as floats upstream) and round it to whole rubles.
pub fn deserialize_rubles<'de, D>(deserializer: D) -> Result<Rubles, D::Error>
where
    D: Deserializer<'de>,
{
    RawAmount::deserialize(deserializer).map(RawAmount::rubles)
}

/// Same as [`deserialize_rubles`] for optional amounts.
pub fn deserialize_optional_rubles<'de, D>(deserializer: D) -> Result<Option<Rubles>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawAmount>::deserialize(deserializer).map(|raw| raw.map(RawAmount::rubles))
}
