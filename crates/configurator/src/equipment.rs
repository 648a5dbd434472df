use base::entities::EntityId;
use base::helpers::{has_text, only_digits};
use serde::{Deserialize, Serialize};

pub type OperatorId = EntityId;
pub type DeviceCount = u8;

pub const MIN_DEVICE_COUNT: DeviceCount = 1;
pub const MAX_DEVICE_COUNT: DeviceCount = 4;

const MIN_PHONE_DIGITS: usize = 10;
const MAX_PHONE_DIGITS: usize = 15;

/// Missing counts mean a single device.
pub fn clamp_device_count(count: Option<DeviceCount>) -> DeviceCount {
    count
        .unwrap_or(MIN_DEVICE_COUNT)
        .clamp(MIN_DEVICE_COUNT, MAX_DEVICE_COUNT)
}

#[derive(Default, Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouterNeed {
    #[default]
    Need,
    FromOperator,
    Own,
    NoThanks,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOption {
    Buy,
    Installment,
    Rent,
}

impl PurchaseOption {
    /// buy -> installment -> rent -> buy
    pub fn cycled(self) -> Self {
        match self {
            PurchaseOption::Buy => PurchaseOption::Installment,
            PurchaseOption::Installment => PurchaseOption::Rent,
            PurchaseOption::Rent => PurchaseOption::Buy,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouterConfigOption {
    Specialist,
    Myself,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TvBoxNeed {
    Need,
    HaveFromOperator,
    HaveOwn,
    SmartTv,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimConnectionType {
    KeepNumber,
    NewNumber,
    NoThanks,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    Individual,
    LegalEntity,
}

#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PersonInfo {
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

impl PersonInfo {
    pub fn is_complete(&self) -> bool {
        has_text(&self.full_name) && self.has_valid_phone()
    }

    pub fn has_valid_phone(&self) -> bool {
        self.phone.as_deref().map_or(false, |phone| {
            let digits = only_digits(phone).len();
            (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
        })
    }
}

/// Detail fields are kept as answered even when the governing `need` no
/// longer activates them. Read them through the `active_*` accessors.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RouterSelection {
    pub need: RouterNeed,
    pub purchase_option: Option<PurchaseOption>,
    pub operator_id: Option<OperatorId>,
    pub config_option: Option<RouterConfigOption>,
}

impl RouterSelection {
    pub fn is_needed(&self) -> bool {
        self.need == RouterNeed::Need
    }

    pub fn active_purchase_option(&self) -> Option<PurchaseOption> {
        if self.is_needed() {
            self.purchase_option
        } else {
            None
        }
    }

    pub fn active_operator_id(&self) -> Option<OperatorId> {
        match self.need {
            RouterNeed::FromOperator => self.operator_id,
            _ => None,
        }
    }

    pub fn active_config_option(&self) -> Option<RouterConfigOption> {
        match self.need {
            RouterNeed::Own => self.config_option,
            _ => None,
        }
    }
}

/// `need == None` is the "no TV box" state.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TvBoxSelection {
    pub need: Option<TvBoxNeed>,
    pub tv_count: Option<DeviceCount>,
    pub purchase_option: Option<PurchaseOption>,
    pub operator_id: Option<OperatorId>,
}

impl TvBoxSelection {
    pub fn is_needed(&self) -> bool {
        self.need == Some(TvBoxNeed::Need)
    }

    pub fn active_tv_count(&self) -> Option<DeviceCount> {
        if self.is_needed() {
            Some(clamp_device_count(self.tv_count))
        } else {
            None
        }
    }

    pub fn active_purchase_option(&self) -> Option<PurchaseOption> {
        if self.is_needed() {
            self.purchase_option
        } else {
            None
        }
    }

    pub fn active_operator_id(&self) -> Option<OperatorId> {
        match self.need {
            Some(TvBoxNeed::HaveFromOperator) => self.operator_id,
            _ => None,
        }
    }
}

#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SimCardSelection {
    pub connection_type: Option<SimConnectionType>,
    pub client_status: Option<ClientStatus>,
    pub person: PersonInfo,
    pub region: Option<String>,
    pub current_operator: Option<OperatorId>,
    pub smartphone_count: Option<DeviceCount>,
}

impl SimCardSelection {
    pub fn is_needed(&self) -> bool {
        matches!(
            self.connection_type,
            Some(SimConnectionType::KeepNumber) | Some(SimConnectionType::NewNumber)
        )
    }

    pub fn keeps_number(&self) -> bool {
        self.connection_type == Some(SimConnectionType::KeepNumber)
    }

    pub fn active_smartphone_count(&self) -> Option<DeviceCount> {
        if self.is_needed() {
            Some(clamp_device_count(self.smartphone_count))
        } else {
            None
        }
    }

    pub fn active_client_status(&self) -> Option<ClientStatus> {
        if self.keeps_number() {
            self.client_status
        } else {
            None
        }
    }

    pub fn active_person(&self) -> Option<&PersonInfo> {
        if self.keeps_number() {
            Some(&self.person)
        } else {
            None
        }
    }

    pub fn active_region(&self) -> Option<&str> {
        if self.keeps_number() {
            self.region.as_deref()
        } else {
            None
        }
    }

    pub fn active_current_operator(&self) -> Option<OperatorId> {
        if self.keeps_number() {
            self.current_operator
        } else {
            None
        }
    }
}

/// Router needed, TV box and SIM card not chosen yet.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSelection {
    pub router: RouterSelection,
    pub tv_box: TvBoxSelection,
    pub sim_card: SimCardSelection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(non_snake_case)]
    fn default__new_selection__should_need_router_only() {
        let selection = EquipmentSelection::default();

        assert_eq!(selection.router.need, RouterNeed::Need);
        assert!(!selection.tv_box.is_needed());
        assert!(!selection.sim_card.is_needed());
    }

    #[test]
    #[allow(non_snake_case)]
    fn clamp_device_count__out_of_range_values__should_clamp_into_one_to_four() {
        assert_eq!(clamp_device_count(None), 1);
        assert_eq!(clamp_device_count(Some(0)), 1);
        assert_eq!(clamp_device_count(Some(3)), 3);
        assert_eq!(clamp_device_count(Some(9)), 4);
    }

    #[test]
    #[allow(non_snake_case)]
    fn cycled__every_purchase_option__should_follow_buy_installment_rent_order() {
        assert_eq!(PurchaseOption::Buy.cycled(), PurchaseOption::Installment);
        assert_eq!(PurchaseOption::Installment.cycled(), PurchaseOption::Rent);
        assert_eq!(PurchaseOption::Rent.cycled(), PurchaseOption::Buy);
    }

    #[test]
    #[allow(non_snake_case)]
    fn active_accessors__detail_fields_of_inactive_need__should_be_absent() {
        let router = RouterSelection {
            need: RouterNeed::NoThanks,
            purchase_option: Some(PurchaseOption::Rent),
            operator_id: Some(7),
            config_option: Some(RouterConfigOption::Myself),
        };

        assert_eq!(router.active_purchase_option(), None);
        assert_eq!(router.active_operator_id(), None);
        assert_eq!(router.active_config_option(), None);

        let tv_box = TvBoxSelection {
            need: Some(TvBoxNeed::HaveOwn),
            tv_count: Some(3),
            purchase_option: Some(PurchaseOption::Buy),
            operator_id: Some(2),
        };

        assert_eq!(tv_box.active_tv_count(), None);
        assert_eq!(tv_box.active_purchase_option(), None);
        assert_eq!(tv_box.active_operator_id(), None);

        let sim_card = SimCardSelection {
            connection_type: Some(SimConnectionType::NewNumber),
            client_status: Some(ClientStatus::Individual),
            region: Some(String::from("Tatarstan")),
            smartphone_count: Some(2),
            ..Default::default()
        };

        assert_eq!(sim_card.active_client_status(), None);
        assert_eq!(sim_card.active_region(), None);
        assert_eq!(sim_card.active_smartphone_count(), Some(2));
    }

    #[test]
    #[allow(non_snake_case)]
    fn active_operator_id__router_from_operator__should_return_operator() {
        let router = RouterSelection {
            need: RouterNeed::FromOperator,
            operator_id: Some(3),
            ..Default::default()
        };

        assert_eq!(router.active_operator_id(), Some(3));
        assert_eq!(router.active_purchase_option(), None);
    }

    #[test]
    #[allow(non_snake_case)]
    fn is_complete__person_with_short_phone__should_return_false() {
        let person = PersonInfo {
            full_name: Some(String::from("Ivan Petrov")),
            phone: Some(String::from("12-34")),
        };
        assert!(!person.is_complete());

        let person = PersonInfo {
            phone: Some(String::from("+7 (999) 123-45-67")),
            ..person
        };
        assert!(person.is_complete());
    }
}
