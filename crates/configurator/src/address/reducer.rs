use base::entities::EntityId;
use base::helpers::normalize_text;
use serde::{Deserialize, Serialize};

use crate::address::entities::{
    AddressField, AddressRecord, ApartmentId, BuildingId, CityId, ConnectionType, Entrance,
    ErrorMessage, FieldErrors, Floor, RegionId, StreetId,
};

/// Every way the address form can change.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum AddressUpdate {
    ConnectionType(ConnectionType),
    City {
        city_id: Option<CityId>,
        city: Option<String>,
        region_id: Option<RegionId>,
    },
    Street {
        street_id: Option<StreetId>,
        street: Option<String>,
    },
    HouseNumber {
        building_id: Option<BuildingId>,
        house_number: Option<String>,
        apartment_id: Option<ApartmentId>,
    },
    CorpusNumber(Option<String>),
    Entrance(Option<Entrance>),
    Floor(Option<Floor>),
    ApartmentNumber {
        apartment_id: Option<ApartmentId>,
        apartment_number: Option<String>,
    },
    PrivacyConsent(bool),
    /// An id created for free-text input at submission time. The text stays
    /// and nothing below the field is invalidated.
    ResolvedId {
        field: AddressField,
        id: EntityId,
    },
    ReplaceErrors(FieldErrors),
    FieldError {
        field: AddressField,
        message: ErrorMessage,
    },
    ClearErrors,
    Clear,
}

pub fn reduce(mut record: AddressRecord, update: AddressUpdate) -> AddressRecord {
    match update {
        AddressUpdate::ConnectionType(connection_type) => {
            record.connection_type = connection_type;
            record.errors.remove(&AddressField::ConnectionType);
        }
        AddressUpdate::City {
            city_id,
            city,
            region_id,
        } => {
            record.city_id = city_id;
            record.city = normalize_text(city);
            record.region_id = region_id;
            record.errors.remove(&AddressField::City);

            clear_street(&mut record);
        }
        AddressUpdate::Street { street_id, street } => {
            record.street_id = street_id;
            record.street = normalize_text(street);
            record.errors.remove(&AddressField::Street);

            clear_building(&mut record);
        }
        AddressUpdate::HouseNumber {
            building_id,
            house_number,
            apartment_id,
        } => {
            record.building_id = building_id;
            record.house_number = normalize_text(house_number);
            record.errors.remove(&AddressField::HouseNumber);

            clear_entrance_and_floor(&mut record);

            // Apartment text belongs to the previous id unless the same id is kept.
            if apartment_id.is_none() || apartment_id != record.apartment_id {
                clear_apartment(&mut record);
            }
            record.apartment_id = apartment_id;
        }
        AddressUpdate::CorpusNumber(corpus_number) => {
            record.corpus_number = normalize_text(corpus_number);
            record.building_id = None;
            record.errors.remove(&AddressField::CorpusNumber);

            clear_entrance_and_floor(&mut record);
            clear_apartment(&mut record);
        }
        AddressUpdate::Entrance(entrance) => {
            record.entrance = entrance;
            record.errors.remove(&AddressField::Entrance);

            clear_apartment(&mut record);
        }
        AddressUpdate::Floor(floor) => {
            record.floor = floor;
            record.errors.remove(&AddressField::Floor);

            clear_apartment(&mut record);
        }
        AddressUpdate::ApartmentNumber {
            apartment_id,
            apartment_number,
        } => {
            record.apartment_id = apartment_id;
            record.apartment_number = normalize_text(apartment_number);
            record.errors.remove(&AddressField::ApartmentNumber);
        }
        AddressUpdate::PrivacyConsent(consent) => {
            record.privacy_consent = consent;
            record.errors.remove(&AddressField::PrivacyConsent);
        }
        AddressUpdate::ResolvedId { field, id } => match field {
            AddressField::City => record.city_id = Some(id),
            AddressField::Street => record.street_id = Some(id),
            AddressField::HouseNumber => record.building_id = Some(id),
            AddressField::ApartmentNumber => record.apartment_id = Some(id),
            field => log::warn!("an id {} can't be assigned to a field {:?}", id, field),
        },
        AddressUpdate::ReplaceErrors(errors) => {
            record.errors = errors;
        }
        AddressUpdate::FieldError { field, message } => {
            record.errors.insert(field, message);
        }
        AddressUpdate::ClearErrors => {
            record.errors.clear();
        }
        AddressUpdate::Clear => {
            record = AddressRecord::default();
        }
    }

    record
}

fn clear_street(record: &mut AddressRecord) {
    record.street_id = None;
    record.street = None;

    clear_building(record);
}

fn clear_building(record: &mut AddressRecord) {
    record.building_id = None;
    record.house_number = None;
    record.corpus_number = None;

    clear_entrance_and_floor(record);
    clear_apartment(record);
}

fn clear_entrance_and_floor(record: &mut AddressRecord) {
    record.entrance = None;
    record.floor = None;
}

fn clear_apartment(record: &mut AddressRecord) {
    record.apartment_id = None;
    record.apartment_number = None;
}
