use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::domain::types::{
    CategoryId, CategorySlug, ComponentId, ComponentName, ComponentPrice, RamType, Socket, Watts,
};

/// A catalog component annotated with its category slug.
///
/// `socket`, `ram_type`, `tdp` and `psu_wattage` are only populated for the
/// categories where they matter; `None` means "not applicable" and never
/// produces a false incompatibility during filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    pub category_id: CategoryId,
    pub category: CategorySlug,
    pub name: ComponentName,
    pub price: ComponentPrice,
    pub image: Option<String>,
    pub socket: Option<Socket>,
    pub ram_type: Option<RamType>,
    pub tdp: Option<Watts>,
    pub psu_wattage: Option<Watts>,
    pub specs: ComponentSpecs,
}

impl Component {
    /// Declared TDP, with missing data counted as zero watts.
    pub fn tdp_or_zero(&self) -> i32 {
        self.tdp.map(Watts::get).unwrap_or(0)
    }

    /// Declared PSU output, with missing data counted as zero watts.
    pub fn psu_wattage_or_zero(&self) -> i32 {
        self.psu_wattage.map(Watts::get).unwrap_or(0)
    }
}

/// Typed view of the opaque `specs_json` column.
///
/// Known keys get dedicated fields; everything else is preserved in `extra`.
/// Values are parsed defensively: a missing or malformed key means the
/// corresponding constraint simply does not apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpecs {
    /// Physical core count, for CPUs.
    #[serde(default, deserialize_with = "flexible_uint")]
    pub cores: Option<u32>,
    /// Memory capacity in gigabytes, for RAM modules. Catalog data sometimes
    /// stores this as a string such as `"16GB"`.
    #[serde(default, deserialize_with = "flexible_uint", alias = "capacity_gb")]
    pub capacity: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ComponentSpecs {
    /// Parse the raw JSON column, falling back to empty specs on any error.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.cores.is_none() && self.capacity.is_none() && self.extra.is_empty()
    }
}

/// Accepts `16`, `16.0`, `"16"` or `"16GB"`; anything else becomes `None`.
fn flexible_uint<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(uint_from_value))
}

fn uint_from_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => {
            let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
            digits.parse().ok()
        }
        _ => None,
    }
}
