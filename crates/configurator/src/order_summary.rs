use crate::catalog::{ServiceKind, Tariff};
use crate::equipment::{
    DeviceCount, EquipmentSelection, PurchaseOption, RouterNeed, SimConnectionType, TvBoxNeed,
    MAX_DEVICE_COUNT, MIN_DEVICE_COUNT,
};
use crate::pricing::{
    compute_monthly, router_monthly_price, sim_monthly_price, tv_monthly_price, Price,
    PricedOrder, PricingRates,
};
use crate::wizard::{EquipmentWizard, WizardAnswer, WizardSection, WizardStep};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SummarySection {
    Tariff(ServiceKind),
    Equipment(WizardSection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub section: SummarySection,
    pub title: String,
    pub details: Option<String>,
    /// Only equipment lines carry a price, tariff services are in the base.
    pub monthly_price: Option<Price>,
}

/// The last step of the order. Simple changes are made in place, anything
/// that needs several answers goes back into the wizard.
pub struct OrderSummaryController<'a> {
    tariff: &'a Tariff,
    rates: &'a PricingRates,
    wizard: &'a mut EquipmentWizard,
}

impl<'a> OrderSummaryController<'a> {
    pub fn new(tariff: &'a Tariff, rates: &'a PricingRates, wizard: &'a mut EquipmentWizard) -> Self {
        Self {
            tariff,
            rates,
            wizard,
        }
    }

    pub fn selection(&self) -> &EquipmentSelection {
        self.wizard.selection()
    }

    pub fn priced_order(&self) -> PricedOrder {
        let base = self.tariff.props.monthly_price.unwrap_or_default();

        compute_monthly(base, self.wizard.selection(), self.rates)
    }

    pub fn lines(&self) -> Vec<SummaryLine> {
        let selection = self.wizard.selection();

        let mut lines: Vec<SummaryLine> = self
            .tariff
            .props
            .services
            .iter()
            .map(|service| SummaryLine {
                section: SummarySection::Tariff(service.kind),
                title: service.description.clone(),
                details: None,
                monthly_price: None,
            })
            .collect();

        let router = &selection.router;
        if router.need != RouterNeed::NoThanks {
            let details = match router.need {
                RouterNeed::Need => router.active_purchase_option().map(purchase_label),
                RouterNeed::FromOperator => Some(String::from("from the operator")),
                _ => Some(String::from("own router")),
            };

            lines.push(SummaryLine {
                section: SummarySection::Equipment(WizardSection::Router),
                title: String::from("Router"),
                details,
                monthly_price: Some(router_monthly_price(router, self.rates)),
            });
        }

        let tv_box = &selection.tv_box;
        if let Some(count) = tv_box.active_tv_count() {
            lines.push(SummaryLine {
                section: SummarySection::Equipment(WizardSection::TvBox),
                title: format!("TV box x{}", count),
                details: tv_box.active_purchase_option().map(purchase_label),
                monthly_price: Some(tv_monthly_price(tv_box, self.rates)),
            });
        }

        let sim_card = &selection.sim_card;
        if let Some(count) = sim_card.active_smartphone_count() {
            let details = if sim_card.keeps_number() {
                "keeping the current number"
            } else {
                "new number"
            };

            lines.push(SummaryLine {
                section: SummarySection::Equipment(WizardSection::Sim),
                title: format!("SIM card x{}", count),
                details: Some(details.to_string()),
                monthly_price: Some(sim_monthly_price(sim_card, self.rates)),
            });
        }

        lines
    }

    pub fn increment_tv_count(&mut self) {
        self.wizard.update_selection(|selection| {
            if selection.tv_box.is_needed() {
                selection.tv_box.tv_count = Some(incremented(selection.tv_box.active_tv_count()));
            }
        });
    }

    /// At one box the TV box is removed from the order.
    pub fn decrement_tv_count(&mut self) {
        self.wizard.update_selection(|selection| match selection.tv_box.active_tv_count() {
            Some(count) if count > MIN_DEVICE_COUNT => selection.tv_box.tv_count = Some(count - 1),
            Some(_) => selection.tv_box.need = None,
            None => {}
        });
    }

    pub fn increment_smartphone_count(&mut self) {
        self.wizard.update_selection(|selection| {
            if selection.sim_card.is_needed() {
                selection.sim_card.smartphone_count =
                    Some(incremented(selection.sim_card.active_smartphone_count()));
            }
        });
    }

    /// At one smartphone the SIM card is removed from the order.
    pub fn decrement_smartphone_count(&mut self) {
        self.wizard.update_selection(|selection| {
            match selection.sim_card.active_smartphone_count() {
                Some(count) if count > MIN_DEVICE_COUNT => {
                    selection.sim_card.smartphone_count = Some(count - 1)
                }
                Some(_) => selection.sim_card.connection_type = Some(SimConnectionType::NoThanks),
                None => {}
            }
        });
    }

    /// Buy, installment and rent in turn. Does nothing unless the router is
    /// needed.
    pub fn cycle_router_purchase_option(&mut self) {
        self.wizard.update_selection(|selection| {
            if selection.router.is_needed() {
                selection.router.purchase_option = Some(
                    selection
                        .router
                        .purchase_option
                        .map_or(PurchaseOption::Buy, PurchaseOption::cycled),
                );
            }
        });
    }

    pub fn add_router(&mut self) {
        self.wizard.enter_for_edit(
            WizardSection::Router,
            WizardStep::RouterPurchase,
            vec![
                WizardAnswer::RouterNeed(RouterNeed::Need),
                WizardAnswer::RouterPurchase(PurchaseOption::Buy),
            ],
        );
    }

    pub fn add_tv_box(&mut self) {
        self.wizard.enter_for_edit(
            WizardSection::TvBox,
            WizardStep::TvBoxCount,
            vec![
                WizardAnswer::TvBoxNeed(TvBoxNeed::Need),
                WizardAnswer::TvCount(MIN_DEVICE_COUNT),
                WizardAnswer::TvBoxPurchase(PurchaseOption::Buy),
            ],
        );
    }

    pub fn add_sim(&mut self) {
        self.wizard.enter_for_edit(
            WizardSection::Sim,
            WizardStep::SimConnectionType,
            vec![
                WizardAnswer::SimConnectionType(SimConnectionType::NewNumber),
                WizardAnswer::SmartphoneCount(MIN_DEVICE_COUNT),
            ],
        );
    }

    /// Re-enters a section with its current answers.
    pub fn edit(&mut self, target: WizardSection) {
        self.wizard
            .enter_for_edit(target, target.entry_step(), Vec::new());
    }

    pub fn remove_router(&mut self) {
        self.wizard
            .update_selection(|selection| selection.router.need = RouterNeed::NoThanks);
    }

    pub fn remove_tv_box(&mut self) {
        self.wizard
            .update_selection(|selection| selection.tv_box.need = None);
    }

    pub fn remove_sim(&mut self) {
        self.wizard.update_selection(|selection| {
            selection.sim_card.connection_type = Some(SimConnectionType::NoThanks)
        });
    }
}

fn incremented(count: Option<DeviceCount>) -> DeviceCount {
    count
        .unwrap_or(MIN_DEVICE_COUNT)
        .saturating_add(1)
        .min(MAX_DEVICE_COUNT)
}

fn purchase_label(option: PurchaseOption) -> String {
    let label = match option {
        PurchaseOption::Buy => "purchase",
        PurchaseOption::Installment => "installment",
        PurchaseOption::Rent => "rent",
    };

    label.to_string()
}
