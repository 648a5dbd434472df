use serde::{Deserialize, Serialize};

use crate::equipment::{
    clamp_device_count, ClientStatus, DeviceCount, EquipmentSelection, OperatorId,
    PurchaseOption, RouterConfigOption, RouterNeed, SimConnectionType, TvBoxNeed,
};

pub mod steps;

pub use steps::{ReturnTarget, WizardSection, WizardStep};

use steps::{is_on_path, last_sim_step, next_step, previous_step};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Advance {
    Moved(WizardStep),
    /// The current question has no answer yet.
    Blocked,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Retreat {
    Moved(WizardStep),
    LeftWizard,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum WizardAnswer {
    RouterNeed(RouterNeed),
    RouterPurchase(PurchaseOption),
    RouterOperator(OperatorId),
    RouterConfig(RouterConfigOption),
    TvBoxNeed(TvBoxNeed),
    TvCount(DeviceCount),
    TvBoxPurchase(PurchaseOption),
    TvBoxOperator(OperatorId),
    SimConnectionType(SimConnectionType),
    ClientStatus(ClientStatus),
    PersonFullName(String),
    PersonPhone(String),
    SimRegion(String),
    CurrentOperator(OperatorId),
    SmartphoneCount(DeviceCount),
}

impl WizardAnswer {
    pub fn apply(self, selection: &mut EquipmentSelection) {
        match self {
            WizardAnswer::RouterNeed(need) => selection.router.need = need,
            WizardAnswer::RouterPurchase(option) => selection.router.purchase_option = Some(option),
            WizardAnswer::RouterOperator(id) => selection.router.operator_id = Some(id),
            WizardAnswer::RouterConfig(option) => selection.router.config_option = Some(option),
            WizardAnswer::TvBoxNeed(need) => selection.tv_box.need = Some(need),
            WizardAnswer::TvCount(count) => {
                selection.tv_box.tv_count = Some(clamp_device_count(Some(count)))
            }
            WizardAnswer::TvBoxPurchase(option) => selection.tv_box.purchase_option = Some(option),
            WizardAnswer::TvBoxOperator(id) => selection.tv_box.operator_id = Some(id),
            WizardAnswer::SimConnectionType(connection_type) => {
                selection.sim_card.connection_type = Some(connection_type)
            }
            WizardAnswer::ClientStatus(status) => selection.sim_card.client_status = Some(status),
            WizardAnswer::PersonFullName(name) => selection.sim_card.person.full_name = Some(name),
            WizardAnswer::PersonPhone(phone) => selection.sim_card.person.phone = Some(phone),
            WizardAnswer::SimRegion(region) => selection.sim_card.region = Some(region),
            WizardAnswer::CurrentOperator(id) => selection.sim_card.current_operator = Some(id),
            WizardAnswer::SmartphoneCount(count) => {
                selection.sim_card.smartphone_count = Some(clamp_device_count(Some(count)))
            }
        }
    }

    /// The question the answer belongs to.
    pub fn step(&self) -> WizardStep {
        match self {
            WizardAnswer::RouterNeed(_) => WizardStep::RouterNeed,
            WizardAnswer::RouterPurchase(_) => WizardStep::RouterPurchase,
            WizardAnswer::RouterOperator(_) => WizardStep::RouterOperator,
            WizardAnswer::RouterConfig(_) => WizardStep::RouterConfig,
            WizardAnswer::TvBoxNeed(_) => WizardStep::TvBoxNeed,
            WizardAnswer::TvCount(_) => WizardStep::TvBoxCount,
            WizardAnswer::TvBoxPurchase(_) => WizardStep::TvBoxPurchase,
            WizardAnswer::TvBoxOperator(_) => WizardStep::TvBoxOperator,
            WizardAnswer::SimConnectionType(_) => WizardStep::SimConnectionType,
            WizardAnswer::ClientStatus(_) => WizardStep::SimClientStatus,
            WizardAnswer::PersonFullName(_) | WizardAnswer::PersonPhone(_) => {
                WizardStep::SimInfoPerson
            }
            WizardAnswer::SimRegion(_) | WizardAnswer::CurrentOperator(_) => {
                WizardStep::SimInfoRegion
            }
            WizardAnswer::SmartphoneCount(_) => WizardStep::SimSmartphoneCount,
        }
    }

    pub fn operator_id(&self) -> Option<OperatorId> {
        match self {
            WizardAnswer::RouterOperator(id)
            | WizardAnswer::TvBoxOperator(id)
            | WizardAnswer::CurrentOperator(id) => Some(*id),
            _ => None,
        }
    }
}

/// Equipment questionnaire. The next step is a function of the answers given
/// so far, see [`steps::route`].
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct EquipmentWizard {
    current_step: WizardStep,
    selection: EquipmentSelection,
    last_step_before_summary: Option<WizardStep>,
    return_target: Option<ReturnTarget>,
    edit_snapshot: Option<EquipmentSelection>,
    show_validation: bool,
}

impl EquipmentWizard {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    pub fn selection(&self) -> &EquipmentSelection {
        &self.selection
    }

    pub fn last_step_before_summary(&self) -> Option<WizardStep> {
        self.last_step_before_summary
    }

    pub fn return_target(&self) -> Option<ReturnTarget> {
        self.return_target
    }

    pub fn show_validation(&self) -> bool {
        self.show_validation
    }

    pub fn is_completed(&self) -> bool {
        self.current_step == WizardStep::OrderSummary
    }

    /// Answers to questions of another section than the current one are
    /// ignored. Returns whether the answer is applied.
    pub fn select(&mut self, answer: WizardAnswer) -> bool {
        if answer.step().section() != self.current_step.section() {
            log::warn!(
                "an answer {:?} doesn't belong to {:?} and is ignored",
                answer,
                self.current_step
            );
            return false;
        }

        log::debug!("wizard answer on {:?}: {:?}", self.current_step, answer);

        answer.apply(&mut self.selection);
        self.show_validation = false;

        true
    }

    pub fn go_next(&mut self) -> Advance {
        let current_step = self.current_step;

        if current_step == WizardStep::OrderSummary {
            return Advance::Moved(current_step);
        }

        if current_step.is_count_step() {
            self.default_count(current_step);
        }

        let mut next = match next_step(current_step, &self.selection) {
            Some(next) => next,
            None => {
                log::debug!("{:?} has no answer, the wizard is blocked", current_step);
                self.show_validation = true;
                return Advance::Blocked;
            }
        };

        if let Some(target) = self.return_target {
            if next.section() != Some(target) {
                next = WizardStep::OrderSummary;
                self.finish_edit();
            }
        }

        if next == WizardStep::OrderSummary {
            self.last_step_before_summary = Some(current_step);
        }

        self.move_to(next);

        Advance::Moved(next)
    }

    pub fn go_back(&mut self) -> Retreat {
        let previous = if self.current_step == WizardStep::OrderSummary {
            Some(
                self.last_step_before_summary
                    .filter(|step| is_on_path(*step, &self.selection))
                    .unwrap_or_else(|| last_sim_step(&self.selection)),
            )
        } else {
            previous_step(self.current_step, &self.selection)
        };

        if let Some(target) = self.return_target {
            if previous.and_then(|step| step.section()) != Some(target) {
                self.cancel_edit();
                return Retreat::Moved(WizardStep::OrderSummary);
            }
        }

        match previous {
            Some(previous) => {
                self.move_to(previous);
                Retreat::Moved(previous)
            }
            None => {
                log::debug!("the wizard is left from {:?}", self.current_step);
                Retreat::LeftWizard
            }
        }
    }

    /// Re-enters a section from the summary with the given answers forced.
    /// Leaving the section forward returns to the summary, leaving it back
    /// restores the selection as it was before the edit.
    pub fn enter_for_edit(&mut self, target: ReturnTarget, step: WizardStep, seed: Vec<WizardAnswer>) {
        if self.edit_snapshot.is_none() {
            self.edit_snapshot = Some(self.selection.clone());
        }

        for answer in seed {
            answer.apply(&mut self.selection);
        }

        let step = if step.section() == Some(target) {
            step
        } else {
            target.entry_step()
        };

        log::debug!("the wizard is entered to edit {:?} at {:?}", target, step);

        self.return_target = Some(target);
        self.move_to(step);
    }

    /// Changes the selection outside of the questionnaire.
    pub fn update_selection(&mut self, update: impl FnOnce(&mut EquipmentSelection)) {
        update(&mut self.selection);
        self.resync_summary_marker();
    }

    /// Keeps the back target of the summary on the path the current answers
    /// produce.
    pub fn resync_summary_marker(&mut self) {
        let is_stale = match self.last_step_before_summary {
            Some(step) => !is_on_path(step, &self.selection),
            None => self.current_step == WizardStep::OrderSummary,
        };

        if is_stale {
            self.last_step_before_summary = Some(last_sim_step(&self.selection));
        }
    }

    pub fn restart(&mut self) {
        *self = Self::new();
    }

    fn default_count(&mut self, step: WizardStep) {
        match step {
            WizardStep::TvBoxCount if self.selection.tv_box.tv_count.is_none() => {
                self.selection.tv_box.tv_count = Some(clamp_device_count(None))
            }
            WizardStep::SimSmartphoneCount if self.selection.sim_card.smartphone_count.is_none() => {
                self.selection.sim_card.smartphone_count = Some(clamp_device_count(None))
            }
            _ => {}
        }
    }

    fn move_to(&mut self, step: WizardStep) {
        log::debug!("wizard step {:?} -> {:?}", self.current_step, step);

        self.current_step = step;
        self.show_validation = false;
    }

    fn finish_edit(&mut self) {
        self.return_target = None;
        self.edit_snapshot = None;
    }

    fn cancel_edit(&mut self) {
        log::debug!("the edit of {:?} is cancelled", self.return_target);

        if let Some(snapshot) = self.edit_snapshot.take() {
            self.selection = snapshot;
        }

        self.return_target = None;
        self.move_to(WizardStep::OrderSummary);
        self.resync_summary_marker();
    }
}
