use base::helpers::has_text;
use serde::{Deserialize, Serialize};

use crate::equipment::{EquipmentSelection, RouterNeed, SimConnectionType, TvBoxNeed};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    RouterNeed,
    RouterPurchase,
    RouterOperator,
    RouterConfig,
    TvBoxNeed,
    TvBoxCount,
    TvBoxPurchase,
    TvBoxOperator,
    SimConnectionType,
    SimClientStatus,
    SimInfoPerson,
    SimInfoRegion,
    SimSmartphoneCount,
    OrderSummary,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardSection {
    Router,
    TvBox,
    Sim,
}

/// Section the wizard was entered to edit. It returns to the summary as soon
/// as it leaves the section.
pub type ReturnTarget = WizardSection;

impl WizardSection {
    pub fn entry_step(&self) -> WizardStep {
        match self {
            WizardSection::Router => WizardStep::RouterNeed,
            WizardSection::TvBox => WizardStep::TvBoxNeed,
            WizardSection::Sim => WizardStep::SimConnectionType,
        }
    }
}

impl WizardStep {
    pub fn section(&self) -> Option<WizardSection> {
        match self {
            WizardStep::RouterNeed
            | WizardStep::RouterPurchase
            | WizardStep::RouterOperator
            | WizardStep::RouterConfig => Some(WizardSection::Router),
            WizardStep::TvBoxNeed
            | WizardStep::TvBoxCount
            | WizardStep::TvBoxPurchase
            | WizardStep::TvBoxOperator => Some(WizardSection::TvBox),
            WizardStep::SimConnectionType
            | WizardStep::SimClientStatus
            | WizardStep::SimInfoPerson
            | WizardStep::SimInfoRegion
            | WizardStep::SimSmartphoneCount => Some(WizardSection::Sim),
            WizardStep::OrderSummary => None,
        }
    }

    pub fn is_count_step(&self) -> bool {
        matches!(self, WizardStep::TvBoxCount | WizardStep::SimSmartphoneCount)
    }
}

/// Whether the question of the step has the answer it needs to go forward.
pub fn is_answered(step: WizardStep, selection: &EquipmentSelection) -> bool {
    let router = &selection.router;
    let tv_box = &selection.tv_box;
    let sim_card = &selection.sim_card;

    match step {
        WizardStep::RouterNeed => true,
        WizardStep::RouterPurchase => router.purchase_option.is_some(),
        WizardStep::RouterOperator => router.operator_id.is_some(),
        WizardStep::RouterConfig => router.config_option.is_some(),
        WizardStep::TvBoxNeed => tv_box.need.is_some(),
        WizardStep::TvBoxCount | WizardStep::SimSmartphoneCount => true,
        WizardStep::TvBoxPurchase => tv_box.purchase_option.is_some(),
        WizardStep::TvBoxOperator => tv_box.operator_id.is_some(),
        WizardStep::SimConnectionType => sim_card.connection_type.is_some(),
        WizardStep::SimClientStatus => sim_card.client_status.is_some(),
        WizardStep::SimInfoPerson => sim_card.person.is_complete(),
        WizardStep::SimInfoRegion => {
            has_text(&sim_card.region) && sim_card.current_operator.is_some()
        }
        WizardStep::OrderSummary => true,
    }
}

/// The step that follows the given one for the stored answers, regardless of
/// whether the step itself is answered.
pub fn route(step: WizardStep, selection: &EquipmentSelection) -> WizardStep {
    match step {
        WizardStep::RouterNeed => match selection.router.need {
            RouterNeed::Need => WizardStep::RouterPurchase,
            RouterNeed::FromOperator => WizardStep::RouterOperator,
            RouterNeed::Own => WizardStep::RouterConfig,
            RouterNeed::NoThanks => WizardStep::TvBoxNeed,
        },
        WizardStep::RouterPurchase | WizardStep::RouterOperator | WizardStep::RouterConfig => {
            WizardStep::TvBoxNeed
        }
        WizardStep::TvBoxNeed => match selection.tv_box.need {
            Some(TvBoxNeed::Need) => WizardStep::TvBoxCount,
            Some(TvBoxNeed::HaveFromOperator) => WizardStep::TvBoxOperator,
            Some(TvBoxNeed::HaveOwn) | Some(TvBoxNeed::SmartTv) | None => {
                WizardStep::SimConnectionType
            }
        },
        WizardStep::TvBoxCount => WizardStep::TvBoxPurchase,
        WizardStep::TvBoxPurchase => WizardStep::TvBoxOperator,
        WizardStep::TvBoxOperator => WizardStep::SimConnectionType,
        WizardStep::SimConnectionType => match selection.sim_card.connection_type {
            Some(SimConnectionType::KeepNumber) => WizardStep::SimClientStatus,
            Some(SimConnectionType::NewNumber) | Some(SimConnectionType::NoThanks) | None => {
                WizardStep::OrderSummary
            }
        },
        WizardStep::SimClientStatus => WizardStep::SimInfoPerson,
        WizardStep::SimInfoPerson => WizardStep::SimInfoRegion,
        WizardStep::SimInfoRegion => WizardStep::SimSmartphoneCount,
        WizardStep::SimSmartphoneCount | WizardStep::OrderSummary => WizardStep::OrderSummary,
    }
}

pub fn next_step(step: WizardStep, selection: &EquipmentSelection) -> Option<WizardStep> {
    if is_answered(step, selection) {
        Some(route(step, selection))
    } else {
        None
    }
}

/// Inverse of [`route`]. `None` means going back leaves the wizard.
pub fn previous_step(step: WizardStep, selection: &EquipmentSelection) -> Option<WizardStep> {
    let previous = match step {
        WizardStep::RouterNeed => return None,
        WizardStep::RouterPurchase | WizardStep::RouterOperator | WizardStep::RouterConfig => {
            WizardStep::RouterNeed
        }
        WizardStep::TvBoxNeed => last_router_step(selection),
        WizardStep::TvBoxCount => WizardStep::TvBoxNeed,
        WizardStep::TvBoxPurchase => WizardStep::TvBoxCount,
        WizardStep::TvBoxOperator => match selection.tv_box.need {
            Some(TvBoxNeed::Need) => WizardStep::TvBoxPurchase,
            _ => WizardStep::TvBoxNeed,
        },
        WizardStep::SimConnectionType => last_tv_box_step(selection),
        WizardStep::SimClientStatus => WizardStep::SimConnectionType,
        WizardStep::SimInfoPerson => WizardStep::SimClientStatus,
        WizardStep::SimInfoRegion => WizardStep::SimInfoPerson,
        WizardStep::SimSmartphoneCount => WizardStep::SimInfoRegion,
        WizardStep::OrderSummary => last_sim_step(selection),
    };

    Some(previous)
}

pub fn last_router_step(selection: &EquipmentSelection) -> WizardStep {
    match selection.router.need {
        RouterNeed::Need => WizardStep::RouterPurchase,
        RouterNeed::FromOperator => WizardStep::RouterOperator,
        RouterNeed::Own => WizardStep::RouterConfig,
        RouterNeed::NoThanks => WizardStep::RouterNeed,
    }
}

pub fn last_tv_box_step(selection: &EquipmentSelection) -> WizardStep {
    match selection.tv_box.need {
        Some(TvBoxNeed::Need) | Some(TvBoxNeed::HaveFromOperator) => WizardStep::TvBoxOperator,
        _ => WizardStep::TvBoxNeed,
    }
}

pub fn last_sim_step(selection: &EquipmentSelection) -> WizardStep {
    match selection.sim_card.connection_type {
        Some(SimConnectionType::KeepNumber) => WizardStep::SimSmartphoneCount,
        _ => WizardStep::SimConnectionType,
    }
}

/// Every step a full walk with the stored answers visits, summary included.
pub fn path(selection: &EquipmentSelection) -> Vec<WizardStep> {
    let mut steps = vec![WizardStep::RouterNeed];
    let mut step = WizardStep::RouterNeed;

    while step != WizardStep::OrderSummary {
        step = route(step, selection);
        steps.push(step);
    }

    steps
}

pub fn is_on_path(step: WizardStep, selection: &EquipmentSelection) -> bool {
    path(selection).contains(&step)
}
