use super::*;
use crate::equipment::{RouterNeed, SimConnectionType, TvBoxNeed};
use base::params::CsvParam;

fn nothing_selected() -> EquipmentSelection {
    EquipmentSelection {
        router: RouterSelection {
            need: RouterNeed::NoThanks,
            ..Default::default()
        },
        tv_box: TvBoxSelection {
            need: Some(TvBoxNeed::HaveOwn),
            ..Default::default()
        },
        sim_card: SimCardSelection {
            connection_type: Some(SimConnectionType::NoThanks),
            ..Default::default()
        },
    }
}

#[test]
#[allow(non_snake_case)]
fn compute_monthly__no_equipment__should_return_base_price_only() {
    let priced = compute_monthly(dec!(1000), &nothing_selected(), &PricingRates::default());

    assert_eq!(
        priced,
        PricedOrder {
            base: dec!(1000),
            router: dec!(0),
            tv: dec!(0),
            sim: dec!(0),
            total: dec!(1000),
        }
    );
}

#[test]
#[allow(non_snake_case)]
fn compute_monthly__rented_router_three_tv_boxes_two_smartphones__should_sum_add_ons() {
    let selection = EquipmentSelection {
        router: RouterSelection {
            need: RouterNeed::Need,
            purchase_option: Some(PurchaseOption::Rent),
            ..Default::default()
        },
        tv_box: TvBoxSelection {
            need: Some(TvBoxNeed::Need),
            tv_count: Some(3),
            ..Default::default()
        },
        sim_card: SimCardSelection {
            connection_type: Some(SimConnectionType::KeepNumber),
            smartphone_count: Some(2),
            ..Default::default()
        },
    };

    let priced = compute_monthly(dec!(1000), &selection, &PricingRates::default());

    assert_eq!(priced.router, dec!(80));
    assert_eq!(priced.tv, dec!(100));
    assert_eq!(priced.sim, dec!(30));
    assert_eq!(priced.total, dec!(1210));
}

#[test]
#[allow(non_snake_case)]
fn compute_monthly__default_selection__should_not_add_anything() {
    let priced = compute_monthly(dec!(650), &Default::default(), &PricingRates::default());

    assert_eq!(priced.total, dec!(650));
}

#[test]
#[allow(non_snake_case)]
fn compute_monthly__negative_base_price__should_treat_it_as_zero() {
    let priced = compute_monthly(dec!(-10), &nothing_selected(), &PricingRates::default());

    assert_eq!(priced.base, dec!(0));
    assert_eq!(priced.total, dec!(0));
}

#[test]
#[allow(non_snake_case)]
fn compute_monthly__base_price_with_three_decimal_places__should_keep_total_equal_to_parts() {
    let rates = PricingRates {
        router_rent: dec!(80.126),
        ..PricingRates::default()
    };
    let mut selection = nothing_selected();
    selection.router = RouterSelection {
        need: RouterNeed::Need,
        purchase_option: Some(PurchaseOption::Rent),
        ..Default::default()
    };

    let priced = compute_monthly(dec!(999.999), &selection, &rates);

    assert_eq!(priced.base, dec!(1000.00));
    assert_eq!(priced.router, dec!(80.13));
    assert_eq!(
        priced.total,
        priced.base + priced.router + priced.tv + priced.sim
    );
    assert_eq!(priced.total, dec!(1080.13));
}

#[test]
#[allow(non_snake_case)]
fn router_monthly_price__every_purchase_option__should_use_matching_rate() {
    let rates = PricingRates::default();
    let router = |purchase_option| RouterSelection {
        need: RouterNeed::Need,
        purchase_option,
        ..Default::default()
    };

    assert_eq!(router_monthly_price(&router(Some(PurchaseOption::Buy)), &rates), dec!(0));
    assert_eq!(
        router_monthly_price(&router(Some(PurchaseOption::Installment)), &rates),
        dec!(120)
    );
    assert_eq!(router_monthly_price(&router(Some(PurchaseOption::Rent)), &rates), dec!(80));
    assert_eq!(router_monthly_price(&router(None), &rates), dec!(0));
}

#[test]
#[allow(non_snake_case)]
fn router_monthly_price__rent_answer_with_own_router__should_be_free() {
    let router = RouterSelection {
        need: RouterNeed::Own,
        purchase_option: Some(PurchaseOption::Rent),
        ..Default::default()
    };

    assert_eq!(router_monthly_price(&router, &PricingRates::default()), dec!(0));
}

#[test]
#[allow(non_snake_case)]
fn tv_monthly_price__missing_or_out_of_range_count__should_clamp_before_arithmetic() {
    let rates = PricingRates::default();
    let tv_box = |tv_count| TvBoxSelection {
        need: Some(TvBoxNeed::Need),
        tv_count,
        ..Default::default()
    };

    assert_eq!(tv_monthly_price(&tv_box(None), &rates), dec!(0));
    assert_eq!(tv_monthly_price(&tv_box(Some(0)), &rates), dec!(0));
    assert_eq!(tv_monthly_price(&tv_box(Some(10)), &rates), dec!(150));
}

#[test]
#[allow(non_snake_case)]
fn sim_monthly_price__new_number_without_count__should_be_free() {
    let sim_card = SimCardSelection {
        connection_type: Some(SimConnectionType::NewNumber),
        ..Default::default()
    };

    assert_eq!(sim_monthly_price(&sim_card, &PricingRates::default()), dec!(0));
}

#[test]
#[allow(non_snake_case)]
fn from_params__partial_params__should_keep_defaults_for_missing_rates() {
    let params: CsvParams<RateParam> = CsvParams::from_vec(vec![
        CsvParam {
            name: String::from("router_rent"),
            value: String::from("99.90"),
        },
        CsvParam {
            name: String::from("extra_sim_card"),
            value: String::from("25"),
        },
    ])
    .unwrap();

    let rates = PricingRates::from_params(&params);

    assert_eq!(rates.router_rent, dec!(99.90));
    assert_eq!(rates.router_installment, dec!(120));
    assert_eq!(rates.extra_tv_box, dec!(50));
    assert_eq!(rates.extra_sim_card, dec!(25));
}
