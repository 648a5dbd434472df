use base::entities::EntityId;
use serde::Serialize;
use thiserror::Error;

use crate::address::entities::{
    AddressField, AddressRecord, ApartmentId, BuildingId, CityId, RegionId, StreetId,
};
use crate::address::reducer::{reduce, AddressUpdate};
use crate::resolver::api::AddressResolver;
use crate::resolver::entities::{ApartmentParams, BuildingParams, CityParams, StreetParams};

pub const CITY_NOT_RESOLVED: &str = "The city can't be saved, try again later";
pub const STREET_NOT_RESOLVED: &str = "The street can't be saved, try again later";
pub const HOUSE_NOT_RESOLVED: &str = "The house can't be saved, try again later";
pub const APARTMENT_NOT_RESOLVED: &str = "The apartment can't be saved, try again later";
pub const FIELD_MISSING: &str = "Fill in this field";

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("{field:?} is missing in the address")]
    Missing { field: AddressField },
    #[error("{field:?} can't be resolved")]
    Resolver {
        field: AddressField,
        #[source]
        source: anyhow::Error,
    },
}

impl SubmissionError {
    pub fn field(&self) -> AddressField {
        match self {
            SubmissionError::Missing { field } => *field,
            SubmissionError::Resolver { field, .. } => *field,
        }
    }

    /// Message shown next to the failed field.
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmissionError::Missing { .. } => FIELD_MISSING,
            SubmissionError::Resolver { field, .. } => match field {
                AddressField::City => CITY_NOT_RESOLVED,
                AddressField::Street => STREET_NOT_RESOLVED,
                AddressField::ApartmentNumber => APARTMENT_NOT_RESOLVED,
                _ => HOUSE_NOT_RESOLVED,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct ResolvedAddress {
    pub region_id: Option<RegionId>,
    pub city_id: CityId,
    pub street_id: StreetId,
    pub building_id: BuildingId,
    pub apartment_id: Option<ApartmentId>,
}

/// Creates or finds every address entity the record has only text for. Ids
/// are written back into the record as soon as they are known, so calling it
/// again after a failure continues from the failed stage.
pub fn promote_address(
    record: &mut AddressRecord,
    resolver: &impl AddressResolver,
) -> Result<ResolvedAddress, SubmissionError> {
    let city_id = match record.city_id() {
        Some(city_id) => city_id,
        None => {
            let params = CityParams {
                name: required_text(record.city(), AddressField::City)?,
                region_id: record.region_id(),
            };

            let city_id = resolver
                .create_or_find_city(&params)
                .map_err(|source| resolver_error(AddressField::City, source))?;

            write_back(record, AddressField::City, city_id);
            city_id
        }
    };

    let street_id = match record.street_id() {
        Some(street_id) => street_id,
        None => {
            let params = StreetParams {
                name: required_text(record.street(), AddressField::Street)?,
                city_id,
            };

            let street_id = resolver
                .create_or_find_street(&params)
                .map_err(|source| resolver_error(AddressField::Street, source))?;

            write_back(record, AddressField::Street, street_id);
            street_id
        }
    };

    let building_id = match record.building_id() {
        Some(building_id) => building_id,
        None => {
            let params = BuildingParams {
                street_id,
                house_number: required_text(record.house_number(), AddressField::HouseNumber)?,
                corpus_number: record.corpus_number().map(str::to_string),
            };

            let building_id = resolver
                .create_or_find_building(&params)
                .map_err(|source| resolver_error(AddressField::HouseNumber, source))?;

            write_back(record, AddressField::HouseNumber, building_id);
            building_id
        }
    };

    let apartment_number = record.apartment_number().map(str::to_string);

    let apartment_id = match (record.apartment_id(), apartment_number) {
        (Some(apartment_id), _) => Some(apartment_id),
        (None, None) => None,
        (None, Some(apartment_number)) => {
            let params = ApartmentParams {
                building_id,
                apartment_number,
                entrance: record.entrance(),
                floor: record.floor(),
            };

            let apartment_id = resolver
                .create_or_find_apartment(&params)
                .map_err(|source| resolver_error(AddressField::ApartmentNumber, source))?;

            write_back(record, AddressField::ApartmentNumber, apartment_id);
            Some(apartment_id)
        }
    };

    Ok(ResolvedAddress {
        region_id: record.region_id(),
        city_id,
        street_id,
        building_id,
        apartment_id,
    })
}

fn required_text(text: Option<&str>, field: AddressField) -> Result<String, SubmissionError> {
    text.map(str::to_string)
        .ok_or(SubmissionError::Missing { field })
}

fn resolver_error(field: AddressField, source: anyhow::Error) -> SubmissionError {
    log::warn!("{:?} of the address can't be resolved: {:?}", field, source);
    SubmissionError::Resolver { field, source }
}

fn write_back(record: &mut AddressRecord, field: AddressField, id: EntityId) {
    log::debug!("{:?} of the address is resolved to {}", field, id);

    let current = std::mem::take(record);
    *record = reduce(current, AddressUpdate::ResolvedId { field, id });
}
