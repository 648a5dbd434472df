use base::entities::EntityId;
use base::helpers::has_text;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type RegionId = EntityId;
pub type CityId = EntityId;
pub type StreetId = EntityId;
pub type BuildingId = EntityId;
pub type ApartmentId = EntityId;

pub type Entrance = u32;
pub type Floor = u32;

#[derive(Default, Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionType {
    Apartment,
    Private,
    Office,
    #[default]
    Unset,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressField {
    ConnectionType,
    City,
    Street,
    HouseNumber,
    CorpusNumber,
    Entrance,
    Floor,
    ApartmentNumber,
    PrivacyConsent,
}

pub type ErrorMessage = String;
pub type FieldErrors = BTreeMap<AddressField, ErrorMessage>;

/// Address form of the connection request. Every text field keeps user input
/// even when the matching id is not resolved yet. The record is changed only
/// through [`crate::address::reduce`].
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub(crate) connection_type: ConnectionType,

    pub(crate) region_id: Option<RegionId>,
    pub(crate) city_id: Option<CityId>,
    pub(crate) street_id: Option<StreetId>,
    pub(crate) building_id: Option<BuildingId>,
    pub(crate) apartment_id: Option<ApartmentId>,

    pub(crate) city: Option<String>,
    pub(crate) street: Option<String>,
    pub(crate) house_number: Option<String>,
    pub(crate) corpus_number: Option<String>,
    pub(crate) apartment_number: Option<String>,

    pub(crate) entrance: Option<Entrance>,
    pub(crate) floor: Option<Floor>,

    pub(crate) privacy_consent: bool,

    pub(crate) errors: FieldErrors,
}

impl AddressRecord {
    pub fn connection_type(&self) -> ConnectionType {
        self.connection_type
    }

    pub fn region_id(&self) -> Option<RegionId> {
        self.region_id
    }

    pub fn city_id(&self) -> Option<CityId> {
        self.city_id
    }

    pub fn street_id(&self) -> Option<StreetId> {
        self.street_id
    }

    pub fn building_id(&self) -> Option<BuildingId> {
        self.building_id
    }

    pub fn apartment_id(&self) -> Option<ApartmentId> {
        self.apartment_id
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn street(&self) -> Option<&str> {
        self.street.as_deref()
    }

    pub fn house_number(&self) -> Option<&str> {
        self.house_number.as_deref()
    }

    pub fn corpus_number(&self) -> Option<&str> {
        self.corpus_number.as_deref()
    }

    pub fn apartment_number(&self) -> Option<&str> {
        self.apartment_number.as_deref()
    }

    pub fn entrance(&self) -> Option<Entrance> {
        self.entrance
    }

    pub fn floor(&self) -> Option<Floor> {
        self.floor
    }

    pub fn privacy_consent(&self) -> bool {
        self.privacy_consent
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: AddressField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn has_city(&self) -> bool {
        self.city_id.is_some() || has_text(&self.city)
    }

    pub fn has_street(&self) -> bool {
        self.street_id.is_some() || has_text(&self.street)
    }

    pub fn has_house(&self) -> bool {
        self.building_id.is_some() || has_text(&self.house_number)
    }

    pub fn has_apartment(&self) -> bool {
        self.apartment_id.is_some() || has_text(&self.apartment_number)
    }

    /// Human readable one-line address.
    pub fn label(&self) -> String {
        let mut parts = Vec::new();

        if let Some(city) = self.city() {
            parts.push(city.to_string());
        }
        if let Some(street) = self.street() {
            parts.push(street.to_string());
        }
        if let Some(house) = self.house_number() {
            match self.corpus_number() {
                Some(corpus) => parts.push(format!("{} bld. {}", house, corpus)),
                None => parts.push(house.to_string()),
            }
        }
        if let Some(apartment) = self.apartment_number() {
            parts.push(format!("apt. {}", apartment));
        }

        parts.join(", ")
    }
}
