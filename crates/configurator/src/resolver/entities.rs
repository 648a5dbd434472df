use base::entities::{EntityId, Item};
use serde::{Deserialize, Serialize};

use crate::address::entities::{
    AddressField, ApartmentId, BuildingId, CityId, Entrance, Floor, RegionId, StreetId,
};

/// What an autocomplete query is looking for, with the parent entity it's
/// restricted to.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchScope {
    City,
    Street { city_id: CityId },
    Building { street_id: StreetId },
    Apartment { building_id: BuildingId },
}

impl SearchScope {
    pub fn field(&self) -> AddressField {
        match self {
            SearchScope::City => AddressField::City,
            SearchScope::Street { .. } => AddressField::Street,
            SearchScope::Building { .. } => AddressField::HouseNumber,
            SearchScope::Apartment { .. } => AddressField::ApartmentNumber,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SearchScope::City => "city",
            SearchScope::Street { .. } => "street",
            SearchScope::Building { .. } => "building",
            SearchScope::Apartment { .. } => "apartment",
        }
    }

    pub fn parent_id(&self) -> Option<EntityId> {
        match *self {
            SearchScope::City => None,
            SearchScope::Street { city_id } => Some(city_id),
            SearchScope::Building { street_id } => Some(street_id),
            SearchScope::Apartment { building_id } => Some(building_id),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSuggestion {
    pub id: EntityId,
    pub label: String,
    #[serde(default)]
    pub region_id: Option<RegionId>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityParams {
    pub name: String,
    pub region_id: Option<RegionId>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreetParams {
    pub name: String,
    pub city_id: CityId,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingParams {
    pub street_id: StreetId,
    pub house_number: String,
    pub corpus_number: Option<String>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApartmentParams {
    pub building_id: BuildingId,
    pub apartment_number: String,
    pub entrance: Option<Entrance>,
    pub floor: Option<Floor>,
}

#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct BuildingProperties {
    pub house_number: String,
    pub corpus_number: Option<String>,
    pub entrances: Option<Entrance>,
    pub floors: Option<Floor>,
}

#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct ApartmentProperties {
    pub number: String,
    pub entrance: Option<Entrance>,
    pub floor: Option<Floor>,
}

pub type Building = Item<BuildingId, BuildingProperties>;
pub type Apartment = Item<ApartmentId, ApartmentProperties>;
