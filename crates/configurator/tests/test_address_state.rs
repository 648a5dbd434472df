use anyhow::{bail, Result};
use base::entities::EntityId;
use base::stores::draft_store::{DraftStore, DraftValue};
use base::stores::in_memory_draft_store::InMemoryDraftStore;
use configurator::address::entities::{AddressField, AddressRecord, BuildingId, StreetId};
use configurator::address::validation::{
    APARTMENT_NUMBER_REQUIRED, HOUSE_NUMBER_REQUIRED, PRIVACY_CONSENT_REQUIRED, STREET_REQUIRED,
};
use configurator::address::{AddressState, ConnectionType};
use configurator::autocomplete::{free_text_update, suggestion_update};
use configurator::drafts::{KeyedDraftRepository, NoDraftRepository};
use configurator::resolver::entities::{
    AddressSuggestion, Apartment, ApartmentParams, Building, BuildingParams, CityParams,
    SearchScope, StreetParams,
};
use configurator::resolver::promotion::CITY_NOT_RESOLVED;
use configurator::resolver::AddressResolver;
use log::Level;
use std::cell::RefCell;
use std::rc::Rc;

type SharedStore = Rc<RefCell<InMemoryDraftStore>>;

fn repository(store: &SharedStore) -> KeyedDraftRepository<SharedStore, AddressRecord> {
    KeyedDraftRepository::new(store.clone(), String::from("session_address"))
}

fn filled_state() -> AddressState<NoDraftRepository> {
    let mut state = AddressState::new(NoDraftRepository);

    state.update_connection_type(ConnectionType::Apartment);
    state.update_city(Some(1), Some(String::from("Kazan")), Some(16));
    state.update_street(Some(2), Some(String::from("Baumana")));
    state.update_house_number(Some(3), Some(String::from("7")), None);
    state.update_entrance(Some(1));
    state.update_floor(Some(2));
    state.update_apartment_number(Some(4), Some(String::from("12")));
    state.update_privacy_consent(true);

    state
}

#[test]
fn changing_city_should_clear_everything_below_it() {
    let mut state = filled_state();

    state.update_city(None, Some(String::from("Innopolis")), None);

    let record = state.record();
    assert_eq!(record.city(), Some("Innopolis"));
    assert_eq!(record.city_id(), None);
    assert_eq!(record.street_id(), None);
    assert_eq!(record.street(), None);
    assert_eq!(record.building_id(), None);
    assert_eq!(record.house_number(), None);
    assert_eq!(record.apartment_id(), None);
    assert_eq!(record.apartment_number(), None);
    assert_eq!(record.entrance(), None);
    assert_eq!(record.floor(), None);
}

#[test]
fn house_number_with_apartment_id_should_keep_apartment() {
    let mut state = filled_state();

    state.update_house_number(Some(5), Some(String::from("9")), Some(4));

    assert_eq!(state.record().apartment_id(), Some(4));
    assert_eq!(state.record().apartment_number(), Some("12"));
    assert_eq!(state.record().entrance(), None);

    state.update_house_number(Some(6), Some(String::from("11")), Some(8));

    assert_eq!(state.record().apartment_id(), Some(8));
    assert_eq!(state.record().apartment_number(), None);
}

#[test]
fn validate_form_should_report_exactly_the_empty_fields_and_be_repeatable() {
    let mut state = AddressState::new(NoDraftRepository);

    state.update_connection_type(ConnectionType::Apartment);
    state.update_city(None, Some(String::from("Kazan")), None);

    assert!(!state.validate_form());
    let first = state.errors().clone();

    assert!(!state.validate_form());
    assert_eq!(state.errors(), &first);

    assert_eq!(
        first.keys().copied().collect::<Vec<_>>(),
        vec![
            AddressField::Street,
            AddressField::HouseNumber,
            AddressField::PrivacyConsent,
        ]
    );
    assert_eq!(state.record().error(AddressField::Street), Some(STREET_REQUIRED));
    assert_eq!(
        state.record().error(AddressField::HouseNumber),
        Some(HOUSE_NUMBER_REQUIRED)
    );
    assert_eq!(
        state.record().error(AddressField::PrivacyConsent),
        Some(PRIVACY_CONSENT_REQUIRED)
    );
}

#[test]
fn updating_a_field_should_clear_only_its_error() {
    let mut state = AddressState::new(NoDraftRepository);

    state.validate_form();
    state.update_privacy_consent(true);

    assert_eq!(state.record().error(AddressField::PrivacyConsent), None);
    assert!(state.record().error(AddressField::City).is_some());

    state.clear_errors();
    assert!(state.errors().is_empty());
}

#[test]
fn validate_for_submission_should_require_apartment_for_apartment_connection() {
    let mut state = filled_state();
    state.update_apartment_number(None, None);

    assert!(state.validate_form());
    assert!(!state.validate_for_submission());
    assert_eq!(
        state.record().error(AddressField::ApartmentNumber),
        Some(APARTMENT_NUMBER_REQUIRED)
    );

    state.update_connection_type(ConnectionType::Private);
    assert!(state.validate_for_submission());
}

#[test]
fn picked_and_free_text_suggestions_should_update_matching_field() {
    let mut state = filled_state();
    let scope = SearchScope::Street { city_id: 1 };

    state.apply(suggestion_update(
        &scope,
        &AddressSuggestion {
            id: 8,
            label: String::from("Pushkina"),
            region_id: None,
        },
    ));

    assert_eq!(state.record().street_id(), Some(8));
    assert_eq!(state.record().house_number(), None);

    state.apply(free_text_update(&scope, "Kremlevskaya"));

    assert_eq!(state.record().street_id(), None);
    assert_eq!(state.record().street(), Some("Kremlevskaya"));
}

#[test]
fn address_should_be_restored_from_draft_after_reload() {
    let store = SharedStore::default();

    let mut state = AddressState::new(repository(&store));
    state.update_city(None, Some(String::from("Kazan")), None);
    state.update_street(None, Some(String::from("Baumana")));

    let restored = AddressState::new(repository(&store));
    assert_eq!(restored.record(), state.record());

    let mut restored = restored;
    restored.clear_address();

    assert_eq!(restored.record(), &AddressRecord::default());
    assert!(store.borrow().is_empty());
}

struct BrokenStore;

impl DraftStore for BrokenStore {
    fn read_draft(&self, _key: &str) -> Result<Option<DraftValue>> {
        bail!("storage is disabled")
    }

    fn write_draft(&mut self, _key: &str, _value: DraftValue) -> Result<()> {
        bail!("storage is disabled")
    }

    fn remove_draft(&mut self, _key: &str) -> Result<()> {
        bail!("storage is disabled")
    }
}

#[test]
fn unavailable_draft_store_should_log_warnings_and_keep_the_form_working() {
    testing_logger::setup();

    let mut state = AddressState::new(KeyedDraftRepository::new(
        BrokenStore,
        String::from("session_address"),
    ));
    state.update_city(None, Some(String::from("Kazan")), None);

    assert_eq!(state.record().city(), Some("Kazan"));

    testing_logger::validate(|captured_logs| {
        let warnings = captured_logs
            .iter()
            .filter(|log| log.level == Level::Warn)
            .count();

        assert_eq!(warnings, 2);
    });
}

struct UnavailableResolver {
    city_calls: RefCell<u32>,
}

impl AddressResolver for UnavailableResolver {
    fn autocomplete(&self, _query: &str, _scope: &SearchScope) -> Result<Vec<AddressSuggestion>> {
        bail!("locations service is unavailable")
    }

    fn create_or_find_city(&self, _params: &CityParams) -> Result<EntityId> {
        *self.city_calls.borrow_mut() += 1;
        bail!("locations service is unavailable")
    }

    fn create_or_find_street(&self, _params: &StreetParams) -> Result<EntityId> {
        bail!("locations service is unavailable")
    }

    fn create_or_find_building(&self, _params: &BuildingParams) -> Result<EntityId> {
        bail!("locations service is unavailable")
    }

    fn create_or_find_apartment(&self, _params: &ApartmentParams) -> Result<EntityId> {
        bail!("locations service is unavailable")
    }

    fn get_buildings(&self, _street_id: StreetId) -> Result<Vec<Building>> {
        bail!("locations service is unavailable")
    }

    fn get_apartments(&self, _building_id: BuildingId) -> Result<Vec<Apartment>> {
        bail!("locations service is unavailable")
    }
}

#[test]
fn failed_promotion_should_show_error_on_the_failed_field() {
    let resolver = UnavailableResolver {
        city_calls: RefCell::new(0),
    };
    let mut state = AddressState::new(NoDraftRepository);

    state.update_city(None, Some(String::from("Kazan")), None);
    state.update_street(None, Some(String::from("Baumana")));
    state.update_house_number(None, Some(String::from("7")), None);

    let error = state.promote(&resolver).unwrap_err();

    assert_eq!(error.field(), AddressField::City);
    assert_eq!(state.record().error(AddressField::City), Some(CITY_NOT_RESOLVED));
    assert_eq!(*resolver.city_calls.borrow(), 1);
}

#[test]
fn failed_promotion_error_should_be_kept_in_draft_until_field_is_edited() {
    let store = SharedStore::default();
    let resolver = UnavailableResolver {
        city_calls: RefCell::new(0),
    };
    let mut state = AddressState::new(repository(&store));

    state.update_city(None, Some(String::from("Kazan")), None);
    state.update_street(None, Some(String::from("Baumana")));
    state.update_house_number(None, Some(String::from("7")), None);
    assert!(state.promote(&resolver).is_err());

    let mut restored = AddressState::new(repository(&store));
    assert_eq!(
        restored.record().error(AddressField::City),
        Some(CITY_NOT_RESOLVED)
    );

    restored.update_city(None, Some(String::from("Kazan")), None);
    assert_eq!(restored.record().error(AddressField::City), None);
}

#[test]
fn set_field_error_should_replace_message_of_that_field_only() {
    let mut state = filled_state();

    state.set_field_error(AddressField::Street, "first");
    state.set_field_error(AddressField::Street, "second");
    state.set_field_error(AddressField::HouseNumber, "house");

    assert_eq!(state.record().error(AddressField::Street), Some("second"));
    assert_eq!(state.record().error(AddressField::HouseNumber), Some("house"));
    assert_eq!(state.errors().len(), 2);
}
