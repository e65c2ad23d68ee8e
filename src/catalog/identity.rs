use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Versioned key for a demon catalog (e.g., `black_deal_v1`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogKey(pub String);

/// Stable identifier for an individual demon entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DemonId(pub u32);

impl fmt::Display for DemonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Demon category shown in the type selector.
///
/// Known variants cover the shipped catalog; `Other` keeps alternate catalogs
/// loadable when they declare additional types. Equality is exact on the
/// label, so `Other("пищевой")` never equals `Food`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum DemonType {
    Food,
    Animal,
    Plant,
    Household,
    Object,
    Energy,
    Ephemeral,
    Elemental,
    Fungal,
    Corrosive,
    Other(String),
}

impl Serialize for DemonType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DemonType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_label(&value))
    }
}

impl DemonType {
    pub fn as_str(&self) -> &str {
        match self {
            DemonType::Food => "Пищевой",
            DemonType::Animal => "Животный",
            DemonType::Plant => "Растительный",
            DemonType::Household => "Бытовой",
            DemonType::Object => "Предметный",
            DemonType::Energy => "Энергетический",
            DemonType::Ephemeral => "Эфемерный",
            DemonType::Elemental => "Стихийный",
            DemonType::Fungal => "Грибковый",
            DemonType::Corrosive => "Коррозийный",
            DemonType::Other(value) => value.as_str(),
        }
    }

    pub fn from_label(value: &str) -> Self {
        match value {
            "Пищевой" => DemonType::Food,
            "Животный" => DemonType::Animal,
            "Растительный" => DemonType::Plant,
            "Бытовой" => DemonType::Household,
            "Предметный" => DemonType::Object,
            "Энергетический" => DemonType::Energy,
            "Эфемерный" => DemonType::Ephemeral,
            "Стихийный" => DemonType::Elemental,
            "Грибковый" => DemonType::Fungal,
            "Коррозийный" => DemonType::Corrosive,
            other => DemonType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for DemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
