use crate::address::entities::{AddressField, AddressRecord, ConnectionType, FieldErrors};

pub const CONNECTION_TYPE_REQUIRED: &str = "Choose where the connection is needed";
pub const CITY_REQUIRED: &str = "Enter a city";
pub const STREET_REQUIRED: &str = "Enter a street";
pub const HOUSE_NUMBER_REQUIRED: &str = "Enter a house number";
pub const APARTMENT_NUMBER_REQUIRED: &str = "Enter an apartment number";
pub const PRIVACY_CONSENT_REQUIRED: &str = "Consent to personal data processing is required";

/// Errors of the address step. The apartment is not required here, it's
/// checked on submission.
pub fn validate_form(record: &AddressRecord) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if record.connection_type() == ConnectionType::Unset {
        errors.insert(
            AddressField::ConnectionType,
            CONNECTION_TYPE_REQUIRED.to_string(),
        );
    }

    if !record.has_city() {
        errors.insert(AddressField::City, CITY_REQUIRED.to_string());
    }

    if !record.has_street() {
        errors.insert(AddressField::Street, STREET_REQUIRED.to_string());
    }

    if !record.has_house() {
        errors.insert(AddressField::HouseNumber, HOUSE_NUMBER_REQUIRED.to_string());
    }

    if !record.privacy_consent() {
        errors.insert(
            AddressField::PrivacyConsent,
            PRIVACY_CONSENT_REQUIRED.to_string(),
        );
    }

    errors
}

pub fn validate_for_submission(record: &AddressRecord) -> FieldErrors {
    let mut errors = validate_form(record);

    if record.connection_type() == ConnectionType::Apartment && !record.has_apartment() {
        errors.insert(
            AddressField::ApartmentNumber,
            APARTMENT_NUMBER_REQUIRED.to_string(),
        );
    }

    errors
}
