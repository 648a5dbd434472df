use anyhow::Result;
use base::helpers::{round_price, sum_prices};
use base::params::{CsvParams, Params};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::Path;

use crate::equipment::{
    DeviceCount, EquipmentSelection, PurchaseOption, RouterSelection, SimCardSelection,
    TvBoxSelection, MIN_DEVICE_COUNT,
};

pub type Price = Decimal;

const DEFAULT_ROUTER_RENT: Price = dec!(80);
const DEFAULT_ROUTER_INSTALLMENT: Price = dec!(120);
const DEFAULT_EXTRA_TV_BOX: Price = dec!(50);
const DEFAULT_EXTRA_SIM_CARD: Price = dec!(30);

pub enum RateParam {
    RouterRent,
    RouterInstallment,
    ExtraTvBox,
    ExtraSimCard,
}

impl Display for RateParam {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            RateParam::RouterRent => write!(f, "router_rent"),
            RateParam::RouterInstallment => write!(f, "router_installment"),
            RateParam::ExtraTvBox => write!(f, "extra_tv_box"),
            RateParam::ExtraSimCard => write!(f, "extra_sim_card"),
        }
    }
}

/// Monthly rates of the equipment add-ons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRates {
    pub router_rent: Price,
    pub router_installment: Price,
    pub extra_tv_box: Price,
    pub extra_sim_card: Price,
}

impl Default for PricingRates {
    fn default() -> Self {
        Self {
            router_rent: DEFAULT_ROUTER_RENT,
            router_installment: DEFAULT_ROUTER_INSTALLMENT,
            extra_tv_box: DEFAULT_EXTRA_TV_BOX,
            extra_sim_card: DEFAULT_EXTRA_SIM_CARD,
        }
    }
}

impl PricingRates {
    /// Rates missing from `params` keep their default values.
    pub fn from_params(params: &impl Params<Param = RateParam>) -> Self {
        let defaults = Self::default();

        Self {
            router_rent: params.get_param_value_or(RateParam::RouterRent, defaults.router_rent),
            router_installment: params
                .get_param_value_or(RateParam::RouterInstallment, defaults.router_installment),
            extra_tv_box: params.get_param_value_or(RateParam::ExtraTvBox, defaults.extra_tv_box),
            extra_sim_card: params
                .get_param_value_or(RateParam::ExtraSimCard, defaults.extra_sim_card),
        }
    }

    pub fn from_csv<P: AsRef<Path>>(path_to_file: P) -> Result<Self> {
        let params: CsvParams<RateParam> = CsvParams::from_csv(path_to_file)?;
        log::debug!("pricing rates are loaded. {}", params);

        Ok(Self::from_params(&params))
    }
}

/// Derived from a tariff price and the equipment answers, never stored.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedOrder {
    pub base: Price,
    pub router: Price,
    pub tv: Price,
    pub sim: Price,
    pub total: Price,
}

pub fn router_monthly_price(router: &RouterSelection, rates: &PricingRates) -> Price {
    match router.active_purchase_option() {
        Some(PurchaseOption::Rent) => rates.router_rent,
        Some(PurchaseOption::Installment) => rates.router_installment,
        Some(PurchaseOption::Buy) | None => Price::ZERO,
    }
}

pub fn tv_monthly_price(tv_box: &TvBoxSelection, rates: &PricingRates) -> Price {
    tv_box
        .active_tv_count()
        .map_or(Price::ZERO, |count| extra_units_price(count, rates.extra_tv_box))
}

pub fn sim_monthly_price(sim_card: &SimCardSelection, rates: &PricingRates) -> Price {
    sim_card
        .active_smartphone_count()
        .map_or(Price::ZERO, |count| extra_units_price(count, rates.extra_sim_card))
}

/// The first unit is included in the tariff.
fn extra_units_price(count: DeviceCount, rate: Price) -> Price {
    Price::from(count.saturating_sub(MIN_DEVICE_COUNT)) * rate
}

pub fn compute_monthly(
    base_tariff_price: Price,
    selection: &EquipmentSelection,
    rates: &PricingRates,
) -> PricedOrder {
    let base = round_price(base_tariff_price.max(Price::ZERO));
    let router = round_price(router_monthly_price(&selection.router, rates));
    let tv = round_price(tv_monthly_price(&selection.tv_box, rates));
    let sim = round_price(sim_monthly_price(&selection.sim_card, rates));

    PricedOrder {
        base,
        router,
        tv,
        sim,
        total: sum_prices(&[base, router, tv, sim]),
    }
}

#[cfg(test)]
mod tests;
