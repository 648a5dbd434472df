use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::address::entities::{AddressRecord, ConnectionType, Entrance, Floor};
use crate::address::AddressState;
use crate::catalog::{CatalogApi, Operator, Tariff, TariffId};
use crate::drafts::{clear_or_warn, load_or_warn, save_or_warn, DraftRepository};
use crate::equipment::EquipmentSelection;
use crate::order_summary::{OrderSummaryController, SummaryLine};
use crate::pricing::{compute_monthly, PricedOrder, PricingRates};
use crate::resolver::api::AddressResolver;
use crate::resolver::promotion::ResolvedAddress;
use crate::timers::DismissibleBanner;
use crate::wizard::{Advance, EquipmentWizard, Retreat, WizardAnswer, WizardStep};

pub const NOTICE_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum CheckoutStage {
    #[default]
    Address,
    Tariffs,
    Equipment,
    Summary,
    Placed,
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("the address is not submitted yet")]
    AddressNotResolved,
    #[error("no tariff is selected")]
    TariffNotSelected,
    #[error("a tariff {0} is not available at the address")]
    TariffNotFound(TariffId),
    #[error("the equipment questions are not answered yet")]
    WizardIncomplete,
    #[error("the catalog can't be loaded")]
    Catalog(#[source] anyhow::Error),
}

/// Part of the order kept between reloads besides the address.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardDraft {
    pub tariff: Option<Tariff>,
    pub wizard: EquipmentWizard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    pub address: ResolvedAddress,
    pub connection_type: ConnectionType,
    pub entrance: Option<Entrance>,
    pub floor: Option<Floor>,
    pub tariff_id: TariffId,
    pub equipment: EquipmentSelection,
    pub priced: PricedOrder,
}

/// The whole connection order from the address to the placed request.
pub struct CheckoutSession<A, C, AD, WD>
where
    A: AddressResolver,
    C: CatalogApi,
    AD: DraftRepository<AddressRecord>,
    WD: DraftRepository<WizardDraft>,
{
    resolver: A,
    catalog: C,
    rates: PricingRates,
    address: AddressState<AD>,
    wizard_drafts: WD,
    draft: WizardDraft,
    stage: CheckoutStage,
    resolved_address: Option<ResolvedAddress>,
    tariffs: Vec<Tariff>,
    operators: Vec<Operator>,
    notice: DismissibleBanner,
    notice_text: Option<String>,
}

impl<A, C, AD, WD> CheckoutSession<A, C, AD, WD>
where
    A: AddressResolver,
    C: CatalogApi,
    AD: DraftRepository<AddressRecord>,
    WD: DraftRepository<WizardDraft>,
{
    pub fn new(resolver: A, catalog: C, rates: PricingRates, address_drafts: AD, wizard_drafts: WD) -> Self {
        let draft = load_or_warn(&wizard_drafts).unwrap_or_default();

        Self {
            resolver,
            catalog,
            rates,
            address: AddressState::new(address_drafts),
            wizard_drafts,
            draft,
            stage: CheckoutStage::Address,
            resolved_address: None,
            tariffs: Vec::new(),
            operators: Vec::new(),
            notice: DismissibleBanner::new(),
            notice_text: None,
        }
    }

    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    pub fn address(&self) -> &AddressState<AD> {
        &self.address
    }

    pub fn address_mut(&mut self) -> &mut AddressState<AD> {
        &mut self.address
    }

    pub fn resolver(&self) -> &A {
        &self.resolver
    }

    pub fn resolved_address(&self) -> Option<&ResolvedAddress> {
        self.resolved_address.as_ref()
    }

    pub fn tariffs(&self) -> &[Tariff] {
        &self.tariffs
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    pub fn selected_tariff(&self) -> Option<&Tariff> {
        self.draft.tariff.as_ref()
    }

    pub fn wizard(&self) -> &EquipmentWizard {
        &self.draft.wizard
    }

    pub fn rates(&self) -> &PricingRates {
        &self.rates
    }

    /// Validates the address and resolves it into ids. Errors are shown on
    /// the address fields.
    pub fn submit_address(&mut self) -> bool {
        if !self.address.validate_for_submission() {
            log::debug!("the address is not valid: {:?}", self.address.errors());
            return false;
        }

        match self.address.promote(&self.resolver) {
            Ok(resolved) => {
                self.resolved_address = Some(resolved);
                self.stage = CheckoutStage::Tariffs;
                true
            }
            Err(e) => {
                self.show_notice(e.user_message(), Instant::now());
                false
            }
        }
    }

    pub fn load_tariffs(&mut self) -> Result<&[Tariff], CheckoutError> {
        let building_id = self
            .resolved_address
            .ok_or(CheckoutError::AddressNotResolved)?
            .building_id;

        self.tariffs = self
            .catalog
            .get_tariffs(building_id)
            .map_err(CheckoutError::Catalog)?;

        log::debug!("{} tariffs are available at {}", self.tariffs.len(), building_id);

        self.load_operators();

        Ok(&self.tariffs)
    }

    /// Without the operator list operator answers are taken unchecked.
    fn load_operators(&mut self) {
        match self.catalog.get_operators() {
            Ok(operators) => self.operators = operators,
            Err(e) => {
                log::warn!("operators can't be loaded, operator answers are not checked: {:?}", e);
                self.operators.clear();
            }
        }
    }

    /// Answers given for the same tariff before a reload are kept.
    pub fn select_tariff(&mut self, tariff_id: TariffId) -> Result<(), CheckoutError> {
        let tariff = self
            .tariffs
            .iter()
            .find(|tariff| tariff.id == tariff_id)
            .cloned()
            .ok_or(CheckoutError::TariffNotFound(tariff_id))?;

        let is_same_tariff = self
            .draft
            .tariff
            .as_ref()
            .map_or(false, |selected| selected.id == tariff_id);

        if !is_same_tariff {
            self.draft.wizard.restart();
        }

        self.draft.tariff = Some(tariff);
        self.stage = if self.draft.wizard.is_completed() {
            CheckoutStage::Summary
        } else {
            CheckoutStage::Equipment
        };

        self.save_wizard_draft();

        Ok(())
    }

    /// Returns whether the answer is accepted. Operator answers must name an
    /// operator of the catalog once the list is loaded.
    pub fn select(&mut self, answer: WizardAnswer) -> bool {
        if let Some(operator_id) = answer.operator_id() {
            let is_known = self.operators.is_empty()
                || self.operators.iter().any(|operator| operator.id == operator_id);

            if !is_known {
                log::warn!("an operator {} is not in the catalog", operator_id);
                return false;
            }
        }

        let is_applied = self.draft.wizard.select(answer);

        if is_applied {
            self.save_wizard_draft();
        }

        is_applied
    }

    pub fn go_next(&mut self) -> Advance {
        let advance = self.draft.wizard.go_next();

        if advance == Advance::Moved(WizardStep::OrderSummary) {
            self.stage = CheckoutStage::Summary;
        }

        self.save_wizard_draft();

        advance
    }

    pub fn go_back(&mut self) -> Retreat {
        let retreat = self.draft.wizard.go_back();

        self.stage = match retreat {
            Retreat::LeftWizard => CheckoutStage::Tariffs,
            Retreat::Moved(WizardStep::OrderSummary) => CheckoutStage::Summary,
            Retreat::Moved(_) => CheckoutStage::Equipment,
        };

        self.save_wizard_draft();

        retreat
    }

    pub fn priced_order(&self) -> Result<PricedOrder, CheckoutError> {
        let tariff = self.draft.tariff.as_ref().ok_or(CheckoutError::TariffNotSelected)?;

        Ok(compute_monthly(
            tariff.props.monthly_price.unwrap_or_default(),
            self.draft.wizard.selection(),
            &self.rates,
        ))
    }

    pub fn summary_lines(&self) -> Result<Vec<SummaryLine>, CheckoutError> {
        let tariff = self.draft.tariff.as_ref().ok_or(CheckoutError::TariffNotSelected)?;
        let mut wizard = self.draft.wizard.clone();

        Ok(OrderSummaryController::new(tariff, &self.rates, &mut wizard).lines())
    }

    /// Runs an inline change of the summary and persists its result.
    pub fn update_summary<F>(&mut self, update: F) -> Result<(), CheckoutError>
    where
        F: FnOnce(&mut OrderSummaryController),
    {
        let tariff = self.draft.tariff.as_ref().ok_or(CheckoutError::TariffNotSelected)?;

        let mut summary = OrderSummaryController::new(tariff, &self.rates, &mut self.draft.wizard);
        update(&mut summary);

        self.stage = if self.draft.wizard.is_completed() {
            CheckoutStage::Summary
        } else {
            CheckoutStage::Equipment
        };

        self.save_wizard_draft();

        Ok(())
    }

    /// Builds the order request and forgets the drafts.
    pub fn place_order(&mut self) -> Result<OrderRequest, CheckoutError> {
        let address = self.resolved_address.ok_or(CheckoutError::AddressNotResolved)?;
        let tariff_id = self
            .draft
            .tariff
            .as_ref()
            .ok_or(CheckoutError::TariffNotSelected)?
            .id;

        if !self.draft.wizard.is_completed() {
            return Err(CheckoutError::WizardIncomplete);
        }

        let record = self.address.record();
        let order = OrderRequest {
            address,
            connection_type: record.connection_type(),
            entrance: record.entrance(),
            floor: record.floor(),
            tariff_id,
            equipment: self.draft.wizard.selection().clone(),
            priced: self.priced_order()?,
        };

        log::debug!("an order is placed: {:?}", order);

        self.address.clear_address();
        clear_or_warn(&mut self.wizard_drafts);
        self.stage = CheckoutStage::Placed;

        Ok(order)
    }

    pub fn restart(&mut self) {
        log::debug!("the order is restarted");

        self.address.clear_address();
        self.draft = WizardDraft::default();
        clear_or_warn(&mut self.wizard_drafts);

        self.stage = CheckoutStage::Address;
        self.resolved_address = None;
        self.tariffs.clear();
        self.notice.unmount();
        self.notice_text = None;
    }

    pub fn show_notice(&mut self, text: &str, now: Instant) {
        self.notice_text = Some(text.to_string());
        self.notice.show(now, Some(NOTICE_DURATION));
    }

    pub fn dismiss_notice(&mut self) {
        self.notice.dismiss();
    }

    pub fn notice(&self) -> Option<&str> {
        if self.notice.is_visible() {
            self.notice_text.as_deref()
        } else {
            None
        }
    }

    /// Advances the timers of the session.
    pub fn tick(&mut self, now: Instant) {
        if self.notice.tick(now) {
            log::debug!("the notice is hidden");
        }
    }

    fn save_wizard_draft(&mut self) {
        save_or_warn(&mut self.wizard_drafts, &self.draft);
    }
}
