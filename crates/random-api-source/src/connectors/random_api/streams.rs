//! Random Data API streams
//!
//! See <https://random-data-api.com/documentation>.

use crate::error::Result;
use crate::registry::{StreamDefinition, StreamRegistry};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Stream name for [`Appliance`] records
pub const APPLIANCES: &str = "appliances";

/// Stream name for [`Beer`] records
pub const BEERS: &str = "beers";

/// A household appliance
///
/// Missing or `null` fields decode to their zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Appliance {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub uid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub brand: String,
    #[serde(deserialize_with = "null_as_default")]
    pub equipment: String,
}

/// A beer
///
/// Missing or `null` fields decode to their zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Beer {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub uid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub brand: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub style: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hop: String,
    #[serde(deserialize_with = "null_as_default")]
    pub yeast: String,
    #[serde(deserialize_with = "null_as_default")]
    pub malts: String,
    /// Bitterness, e.g. "34 IBU"
    #[serde(deserialize_with = "null_as_default")]
    pub ibu: String,
    /// Alcohol by volume, e.g. "5.2%"
    #[serde(deserialize_with = "null_as_default")]
    pub alcohol: String,
    /// Degrees Balling, e.g. "12.6°Blg"
    #[serde(deserialize_with = "null_as_default")]
    pub blg: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Registry with every stream the Random Data API source offers
///
/// Registration order is catalog order and also the order `check` probes in.
pub fn random_api_streams() -> Result<StreamRegistry> {
    StreamRegistry::new()
        .with(StreamDefinition::typed::<Beer>(BEERS)?)?
        .with(StreamDefinition::typed::<Appliance>(APPLIANCES)?)
}
