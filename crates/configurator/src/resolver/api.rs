use anyhow::Result;
use base::entities::EntityId;

use crate::address::entities::{BuildingId, StreetId};
use crate::resolver::entities::{
    AddressSuggestion, Apartment, ApartmentParams, Building, BuildingParams, CityParams,
    SearchScope, StreetParams,
};

/// Canonical store of address entities.
pub trait AddressResolver {
    fn autocomplete(&self, query: &str, scope: &SearchScope) -> Result<Vec<AddressSuggestion>>;

    fn create_or_find_city(&self, params: &CityParams) -> Result<EntityId>;
    fn create_or_find_street(&self, params: &StreetParams) -> Result<EntityId>;
    fn create_or_find_building(&self, params: &BuildingParams) -> Result<EntityId>;
    fn create_or_find_apartment(&self, params: &ApartmentParams) -> Result<EntityId>;

    fn get_buildings(&self, street_id: StreetId) -> Result<Vec<Building>>;
    fn get_apartments(&self, building_id: BuildingId) -> Result<Vec<Apartment>>;
}
