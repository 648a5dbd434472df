use crate::address::entities::{
    AddressField, AddressRecord, ApartmentId, BuildingId, CityId, ConnectionType, Entrance,
    FieldErrors, Floor, RegionId, StreetId,
};
use crate::address::reducer::{reduce, AddressUpdate};
use crate::address::validation::{validate_for_submission, validate_form};
use crate::drafts::{clear_or_warn, load_or_warn, save_or_warn, DraftRepository};
use crate::resolver::api::AddressResolver;
use crate::resolver::promotion::{promote_address, ResolvedAddress, SubmissionError};

/// Address step of the order. Holds the record and persists it to the draft
/// repository after every change.
pub struct AddressState<R>
where
    R: DraftRepository<AddressRecord>,
{
    record: AddressRecord,
    drafts: R,
}

impl<R> AddressState<R>
where
    R: DraftRepository<AddressRecord>,
{
    /// Restores the record from a draft when there is one.
    pub fn new(drafts: R) -> Self {
        let record = load_or_warn(&drafts).unwrap_or_default();

        Self { record, drafts }
    }

    pub fn record(&self) -> &AddressRecord {
        &self.record
    }

    pub fn errors(&self) -> &FieldErrors {
        self.record.errors()
    }

    pub fn apply(&mut self, update: AddressUpdate) {
        log::debug!("address update: {:?}", update);

        let current = std::mem::take(&mut self.record);
        self.record = reduce(current, update);

        save_or_warn(&mut self.drafts, &self.record);
    }

    pub fn update_connection_type(&mut self, connection_type: ConnectionType) {
        self.apply(AddressUpdate::ConnectionType(connection_type));
    }

    pub fn update_city(
        &mut self,
        city_id: Option<CityId>,
        city: Option<String>,
        region_id: Option<RegionId>,
    ) {
        self.apply(AddressUpdate::City {
            city_id,
            city,
            region_id,
        });
    }

    pub fn update_street(&mut self, street_id: Option<StreetId>, street: Option<String>) {
        self.apply(AddressUpdate::Street { street_id, street });
    }

    pub fn update_house_number(
        &mut self,
        building_id: Option<BuildingId>,
        house_number: Option<String>,
        apartment_id: Option<ApartmentId>,
    ) {
        self.apply(AddressUpdate::HouseNumber {
            building_id,
            house_number,
            apartment_id,
        });
    }

    pub fn update_corpus_number(&mut self, corpus_number: Option<String>) {
        self.apply(AddressUpdate::CorpusNumber(corpus_number));
    }

    pub fn update_entrance(&mut self, entrance: Option<Entrance>) {
        self.apply(AddressUpdate::Entrance(entrance));
    }

    pub fn update_floor(&mut self, floor: Option<Floor>) {
        self.apply(AddressUpdate::Floor(floor));
    }

    pub fn update_apartment_number(
        &mut self,
        apartment_id: Option<ApartmentId>,
        apartment_number: Option<String>,
    ) {
        self.apply(AddressUpdate::ApartmentNumber {
            apartment_id,
            apartment_number,
        });
    }

    pub fn update_privacy_consent(&mut self, consent: bool) {
        self.apply(AddressUpdate::PrivacyConsent(consent));
    }

    /// Replaces the errors with the result of the form validation. Returns
    /// whether the form is valid.
    pub fn validate_form(&mut self) -> bool {
        let errors = validate_form(&self.record);
        let is_valid = errors.is_empty();

        self.apply(AddressUpdate::ReplaceErrors(errors));

        is_valid
    }

    pub fn validate_for_submission(&mut self) -> bool {
        let errors = validate_for_submission(&self.record);
        let is_valid = errors.is_empty();

        self.apply(AddressUpdate::ReplaceErrors(errors));

        is_valid
    }

    pub fn set_field_error(&mut self, field: AddressField, message: &str) {
        self.apply(AddressUpdate::FieldError {
            field,
            message: message.to_string(),
        });
    }

    pub fn clear_errors(&mut self) {
        self.apply(AddressUpdate::ClearErrors);
    }

    pub fn clear_address(&mut self) {
        self.record = reduce(std::mem::take(&mut self.record), AddressUpdate::Clear);
        clear_or_warn(&mut self.drafts);
    }

    /// Resolves every text-only part of the address into ids. A failure is
    /// shown as an error of the failed field.
    pub fn promote(
        &mut self,
        resolver: &impl AddressResolver,
    ) -> Result<ResolvedAddress, SubmissionError> {
        let result = promote_address(&mut self.record, resolver);

        match &result {
            Ok(resolved) => {
                log::debug!("the address is resolved: {:?}", resolved);
                save_or_warn(&mut self.drafts, &self.record);
            }
            Err(e) => {
                log::warn!("the address can't be submitted: {}", e);
                self.set_field_error(e.field(), e.user_message());
            }
        }

        result
    }
}
