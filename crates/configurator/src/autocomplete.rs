use anyhow::Result;
use std::time::{Duration, Instant};

use crate::address::reducer::AddressUpdate;
use crate::resolver::api::AddressResolver;
use crate::resolver::entities::{AddressSuggestion, SearchScope};

pub const AUTOCOMPLETE_DEBOUNCE: Duration = Duration::from_millis(300);

pub type Ticket = u64;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PendingLookup {
    pub ticket: Ticket,
    pub query: String,
    pub scope: SearchScope,
    pub due_at: Instant,
}

/// Debounced lookups of one address field. Every input supersedes the pending
/// lookup and only the result of the latest ticket is applied.
#[derive(Debug)]
pub struct AutocompleteSession {
    debounce: Duration,
    last_ticket: Ticket,
    pending: Option<PendingLookup>,
    in_flight: Option<Ticket>,
    suggestions: Vec<AddressSuggestion>,
    free_text: bool,
}

impl Default for AutocompleteSession {
    fn default() -> Self {
        Self {
            debounce: AUTOCOMPLETE_DEBOUNCE,
            last_ticket: 0,
            pending: None,
            in_flight: None,
            suggestions: Vec::new(),
            free_text: false,
        }
    }
}

impl AutocompleteSession {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn on_input(&mut self, query: &str, scope: SearchScope, now: Instant) -> Ticket {
        self.last_ticket += 1;
        self.in_flight = None;

        let query = query.trim();

        if query.is_empty() {
            self.pending = None;
            self.suggestions.clear();
            self.free_text = false;
        } else {
            self.pending = Some(PendingLookup {
                ticket: self.last_ticket,
                query: query.to_string(),
                scope,
                due_at: now + self.debounce,
            });
        }

        self.last_ticket
    }

    /// Hands out the pending lookup once its debounce interval is over.
    pub fn take_due(&mut self, now: Instant) -> Option<PendingLookup> {
        match &self.pending {
            Some(pending) if pending.due_at <= now => {
                self.in_flight = Some(pending.ticket);
                self.pending.take()
            }
            _ => None,
        }
    }

    /// Returns whether the result was applied. Results of superseded tickets
    /// are dropped.
    pub fn apply_result(&mut self, ticket: Ticket, result: Result<Vec<AddressSuggestion>>) -> bool {
        if ticket != self.last_ticket || self.in_flight != Some(ticket) {
            log::debug!("a stale autocomplete result {} is dropped", ticket);
            return false;
        }

        self.in_flight = None;

        match result {
            Ok(suggestions) if !suggestions.is_empty() => {
                self.suggestions = suggestions;
                self.free_text = false;
            }
            Ok(_) => {
                self.suggestions.clear();
                self.free_text = true;
            }
            Err(e) => {
                log::warn!("autocomplete is unavailable, switching to free text: {:?}", e);
                self.suggestions.clear();
                self.free_text = true;
            }
        }

        true
    }

    /// Runs the due lookup against the resolver.
    pub fn poll(&mut self, now: Instant, resolver: &impl AddressResolver) -> bool {
        match self.take_due(now) {
            Some(lookup) => {
                let result = resolver.autocomplete(&lookup.query, &lookup.scope);
                self.apply_result(lookup.ticket, result)
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
        self.in_flight = None;
        self.last_ticket += 1;
    }

    pub fn pending(&self) -> Option<&PendingLookup> {
        self.pending.as_ref()
    }

    pub fn suggestions(&self) -> &[AddressSuggestion] {
        &self.suggestions
    }

    pub fn is_free_text(&self) -> bool {
        self.free_text
    }
}

/// Update of the field the scope belongs to with a picked suggestion.
pub fn suggestion_update(scope: &SearchScope, suggestion: &AddressSuggestion) -> AddressUpdate {
    match scope {
        SearchScope::City => AddressUpdate::City {
            city_id: Some(suggestion.id),
            city: Some(suggestion.label.clone()),
            region_id: suggestion.region_id,
        },
        SearchScope::Street { .. } => AddressUpdate::Street {
            street_id: Some(suggestion.id),
            street: Some(suggestion.label.clone()),
        },
        SearchScope::Building { .. } => AddressUpdate::HouseNumber {
            building_id: Some(suggestion.id),
            house_number: Some(suggestion.label.clone()),
            apartment_id: None,
        },
        SearchScope::Apartment { .. } => AddressUpdate::ApartmentNumber {
            apartment_id: Some(suggestion.id),
            apartment_number: Some(suggestion.label.clone()),
        },
    }
}

/// Update of the field the scope belongs to with text only.
pub fn free_text_update(scope: &SearchScope, text: &str) -> AddressUpdate {
    let text = Some(text.to_string());

    match scope {
        SearchScope::City => AddressUpdate::City {
            city_id: None,
            city: text,
            region_id: None,
        },
        SearchScope::Street { .. } => AddressUpdate::Street {
            street_id: None,
            street: text,
        },
        SearchScope::Building { .. } => AddressUpdate::HouseNumber {
            building_id: None,
            house_number: text,
            apartment_id: None,
        },
        SearchScope::Apartment { .. } => AddressUpdate::ApartmentNumber {
            apartment_id: None,
            apartment_number: text,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::entities::{BuildingId, StreetId};
    use crate::resolver::entities::{
        Apartment, ApartmentParams, Building, BuildingParams, CityParams, StreetParams,
    };
    use anyhow::bail;
    use base::entities::EntityId;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeResolver {
        queries: RefCell<Vec<String>>,
        is_unavailable: bool,
    }

    impl AddressResolver for FakeResolver {
        fn autocomplete(&self, query: &str, _scope: &SearchScope) -> Result<Vec<AddressSuggestion>> {
            self.queries.borrow_mut().push(query.to_string());

            if self.is_unavailable {
                bail!("locations service is unavailable");
            }

            Ok(vec![AddressSuggestion {
                id: 1,
                label: format!("{} city", query),
                region_id: Some(16),
            }])
        }

        fn create_or_find_city(&self, _params: &CityParams) -> Result<EntityId> {
            unimplemented!()
        }

        fn create_or_find_street(&self, _params: &StreetParams) -> Result<EntityId> {
            unimplemented!()
        }

        fn create_or_find_building(&self, _params: &BuildingParams) -> Result<EntityId> {
            unimplemented!()
        }

        fn create_or_find_apartment(&self, _params: &ApartmentParams) -> Result<EntityId> {
            unimplemented!()
        }

        fn get_buildings(&self, _street_id: StreetId) -> Result<Vec<Building>> {
            unimplemented!()
        }

        fn get_apartments(&self, _building_id: BuildingId) -> Result<Vec<Apartment>> {
            unimplemented!()
        }
    }

    fn suggestion(label: &str) -> AddressSuggestion {
        AddressSuggestion {
            id: 1,
            label: label.to_string(),
            region_id: None,
        }
    }

    #[test]
    #[allow(non_snake_case)]
    fn poll__several_keystrokes_within_debounce__should_lookup_only_the_last_query() {
        let resolver = FakeResolver::default();
        let mut session = AutocompleteSession::new();
        let start = Instant::now();

        session.on_input("Ka", SearchScope::City, start);
        session.on_input("Kaz", SearchScope::City, start + Duration::from_millis(100));
        session.on_input("Kazan", SearchScope::City, start + Duration::from_millis(200));

        assert!(!session.poll(start + Duration::from_millis(400), &resolver));
        assert!(session.poll(start + Duration::from_millis(500), &resolver));

        assert_eq!(*resolver.queries.borrow(), vec![String::from("Kazan")]);
        assert_eq!(session.suggestions()[0].label, "Kazan city");
    }

    #[test]
    #[allow(non_snake_case)]
    fn apply_result__stale_ticket__should_not_update_suggestions() {
        let mut session = AutocompleteSession::new();
        let start = Instant::now();

        let first = session.on_input("Ka", SearchScope::City, start);
        let first_lookup = session.take_due(start + AUTOCOMPLETE_DEBOUNCE).unwrap();
        assert_eq!(first_lookup.ticket, first);

        let second = session.on_input("Kaz", SearchScope::City, start + AUTOCOMPLETE_DEBOUNCE);
        session.take_due(start + AUTOCOMPLETE_DEBOUNCE * 2).unwrap();

        assert!(!session.apply_result(first, Ok(vec![suggestion("Kaliningrad")])));
        assert!(session.suggestions().is_empty());

        assert!(session.apply_result(second, Ok(vec![suggestion("Kazan")])));
        assert_eq!(session.suggestions(), &[suggestion("Kazan")]);
    }

    #[test]
    #[allow(non_snake_case)]
    fn poll__resolver_unavailable__should_switch_to_free_text() {
        let resolver = FakeResolver {
            is_unavailable: true,
            ..Default::default()
        };
        let mut session = AutocompleteSession::new();
        let start = Instant::now();

        session.on_input("Kazan", SearchScope::City, start);

        assert!(session.poll(start + AUTOCOMPLETE_DEBOUNCE, &resolver));
        assert!(session.is_free_text());
        assert!(session.suggestions().is_empty());
    }

    #[test]
    #[allow(non_snake_case)]
    fn apply_result__empty_result__should_switch_to_free_text() {
        let mut session = AutocompleteSession::new();
        let start = Instant::now();

        let ticket = session.on_input("Nowhere", SearchScope::City, start);
        session.take_due(start + AUTOCOMPLETE_DEBOUNCE).unwrap();

        assert!(session.apply_result(ticket, Ok(vec![])));
        assert!(session.is_free_text());
    }

    #[test]
    #[allow(non_snake_case)]
    fn cancel__pending_lookup__should_drop_it() {
        let resolver = FakeResolver::default();
        let mut session = AutocompleteSession::new();
        let start = Instant::now();

        session.on_input("Kazan", SearchScope::City, start);
        session.cancel();

        assert!(!session.poll(start + AUTOCOMPLETE_DEBOUNCE, &resolver));
        assert!(resolver.queries.borrow().is_empty());
    }

    #[test]
    #[allow(non_snake_case)]
    fn on_input__blank_query__should_clear_suggestions_without_lookup() {
        let mut session = AutocompleteSession::new();
        let start = Instant::now();

        let ticket = session.on_input("Kazan", SearchScope::City, start);
        session.take_due(start + AUTOCOMPLETE_DEBOUNCE).unwrap();
        session.apply_result(ticket, Ok(vec![suggestion("Kazan")]));

        session.on_input("  ", SearchScope::City, start + AUTOCOMPLETE_DEBOUNCE);

        assert!(session.suggestions().is_empty());
        assert!(session.pending().is_none());
    }

    #[test]
    #[allow(non_snake_case)]
    fn suggestion_update__street_scope__should_carry_id_and_label() {
        let update = suggestion_update(
            &SearchScope::Street { city_id: 1 },
            &AddressSuggestion {
                id: 5,
                label: String::from("Baumana"),
                region_id: None,
            },
        );

        assert_eq!(
            update,
            AddressUpdate::Street {
                street_id: Some(5),
                street: Some(String::from("Baumana")),
            }
        );
    }

    #[test]
    #[allow(non_snake_case)]
    fn free_text_update__building_scope__should_have_no_id() {
        let update = free_text_update(&SearchScope::Building { street_id: 5 }, "7a");

        assert_eq!(
            update,
            AddressUpdate::HouseNumber {
                building_id: None,
                house_number: Some(String::from("7a")),
                apartment_id: None,
            }
        );
    }
}
