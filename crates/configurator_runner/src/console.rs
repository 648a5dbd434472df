use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::io::{BufRead, Write};
use std::time::Instant;

use configurator::address::entities::{AddressRecord, ConnectionType};
use configurator::address::AddressUpdate;
use configurator::autocomplete::{
    free_text_update, suggestion_update, AutocompleteSession, AUTOCOMPLETE_DEBOUNCE,
};
use configurator::catalog::CatalogApi;
use configurator::checkout::{CheckoutSession, CheckoutStage, OrderRequest, WizardDraft};
use configurator::drafts::DraftRepository;
use configurator::resolver::entities::SearchScope;
use configurator::resolver::AddressResolver;
use configurator::wizard::{Advance, Retreat, WizardAnswer, WizardSection, WizardStep};

pub const QUIT_COMMAND: &str = "quit";
pub const BACK_COMMAND: &str = "back";

enum Flow {
    Continue,
    Quit,
    Placed(OrderRequest),
}

/// Walks the whole order in a line-based dialog. Returns `None` when the
/// input ends or the user quits before the order is placed.
pub fn run_console_checkout<A, C, AD, WD>(
    session: &mut CheckoutSession<A, C, AD, WD>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Option<OrderRequest>>
where
    A: AddressResolver,
    C: CatalogApi,
    AD: DraftRepository<AddressRecord>,
    WD: DraftRepository<WizardDraft>,
{
    loop {
        session.tick(Instant::now());

        if let Some(notice) = session.notice() {
            writeln!(output, "! {}", notice)?;
            session.dismiss_notice();
        }

        let flow = match session.stage() {
            CheckoutStage::Address => fill_address(session, input, output)?,
            CheckoutStage::Tariffs => choose_tariff(session, input, output)?,
            CheckoutStage::Equipment => answer_question(session, input, output)?,
            CheckoutStage::Summary => review_summary(session, input, output)?,
            CheckoutStage::Placed => Flow::Quit,
        };

        match flow {
            Flow::Continue => continue,
            Flow::Quit => return Ok(None),
            Flow::Placed(order) => return Ok(Some(order)),
        }
    }
}

/// `None` when the input is over or the user wants to quit.
fn ask(input: &mut impl BufRead, output: &mut impl Write, prompt: &str) -> Result<Option<String>> {
    write!(output, "{}: ", prompt)?;
    output.flush()?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("error on reading an answer")?;

    let answer = line.trim();

    if read == 0 || answer == QUIT_COMMAND {
        return Ok(None);
    }

    Ok(Some(answer.to_string()))
}

fn optional(answer: String) -> Option<String> {
    if answer.is_empty() {
        None
    } else {
        Some(answer)
    }
}

fn parse_choice<T: DeserializeOwned>(text: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(text.to_lowercase())).ok()
}

macro_rules! ask_or_quit {
    ($input:expr, $output:expr, $prompt:expr) => {
        match ask($input, $output, $prompt)? {
            Some(answer) => answer,
            None => return Ok(Flow::Quit),
        }
    };
}

/// Picks the suggestion matching the text or keeps the text as typed.
fn lookup<A: AddressResolver>(resolver: &A, scope: SearchScope, text: &str) -> AddressUpdate {
    let mut autocomplete = AutocompleteSession::new();
    let now = Instant::now();

    autocomplete.on_input(text, scope, now);
    autocomplete.poll(now + AUTOCOMPLETE_DEBOUNCE, resolver);

    let picked = autocomplete
        .suggestions()
        .iter()
        .find(|suggestion| suggestion.label.eq_ignore_ascii_case(text));

    match picked {
        Some(suggestion) => suggestion_update(&scope, suggestion),
        None => free_text_update(&scope, text),
    }
}

fn fill_address<A, C, AD, WD>(
    session: &mut CheckoutSession<A, C, AD, WD>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Flow>
where
    A: AddressResolver,
    C: CatalogApi,
    AD: DraftRepository<AddressRecord>,
    WD: DraftRepository<WizardDraft>,
{
    let connection_type = ask_or_quit!(input, output, "connection type [apartment/private/office]");
    session
        .address_mut()
        .update_connection_type(parse_choice(&connection_type).unwrap_or(ConnectionType::Unset));

    let city = ask_or_quit!(input, output, "city");
    let update = lookup(session.resolver(), SearchScope::City, &city);
    session.address_mut().apply(update);

    let street = ask_or_quit!(input, output, "street");
    let update = match session.address().record().city_id() {
        Some(city_id) => lookup(session.resolver(), SearchScope::Street { city_id }, &street),
        None => free_text_update(&SearchScope::Street { city_id: 0 }, &street),
    };
    session.address_mut().apply(update);

    let house = ask_or_quit!(input, output, "house number");
    let update = match session.address().record().street_id() {
        Some(street_id) => lookup(session.resolver(), SearchScope::Building { street_id }, &house),
        None => free_text_update(&SearchScope::Building { street_id: 0 }, &house),
    };
    session.address_mut().apply(update);

    let corpus = ask_or_quit!(input, output, "corpus (optional)");
    if let Some(corpus) = optional(corpus) {
        session.address_mut().update_corpus_number(Some(corpus));
    }

    let entrance = ask_or_quit!(input, output, "entrance (optional)");
    session.address_mut().update_entrance(entrance.parse().ok());

    let floor = ask_or_quit!(input, output, "floor (optional)");
    session.address_mut().update_floor(floor.parse().ok());

    let apartment = ask_or_quit!(input, output, "apartment (optional)");
    if let Some(apartment) = optional(apartment) {
        let update = match session.address().record().building_id() {
            Some(building_id) => lookup(
                session.resolver(),
                SearchScope::Apartment { building_id },
                &apartment,
            ),
            None => free_text_update(&SearchScope::Apartment { building_id: 0 }, &apartment),
        };
        session.address_mut().apply(update);
    }

    let consent = ask_or_quit!(input, output, "consent to personal data processing [y/n]");
    session
        .address_mut()
        .update_privacy_consent(consent.eq_ignore_ascii_case("y"));

    if session.submit_address() {
        writeln!(output, "address: {}", session.address().record().label())?;
    } else {
        for (field, message) in session.address().errors() {
            writeln!(output, "{:?}: {}", field, message)?;
        }
    }

    Ok(Flow::Continue)
}

fn choose_tariff<A, C, AD, WD>(
    session: &mut CheckoutSession<A, C, AD, WD>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Flow>
where
    A: AddressResolver,
    C: CatalogApi,
    AD: DraftRepository<AddressRecord>,
    WD: DraftRepository<WizardDraft>,
{
    if session.tariffs().is_empty() {
        if let Err(e) = session.load_tariffs() {
            log::error!("{:?}", e);
            writeln!(output, "tariffs can't be loaded, try again later")?;
            return Ok(Flow::Quit);
        }

        if session.tariffs().is_empty() {
            writeln!(output, "no tariffs are available at the address")?;
            return Ok(Flow::Quit);
        }
    }

    for tariff in session.tariffs() {
        match tariff.props.monthly_price {
            Some(price) => writeln!(output, "{}: {} - {} a month", tariff.id, tariff.props.name, price)?,
            None => writeln!(output, "{}: {}", tariff.id, tariff.props.name)?,
        }
    }

    let answer = ask_or_quit!(input, output, "tariff");

    match answer.parse() {
        Ok(tariff_id) => {
            if let Err(e) = session.select_tariff(tariff_id) {
                writeln!(output, "{}", e)?;
            }
        }
        Err(_) => writeln!(output, "enter a tariff number")?,
    }

    Ok(Flow::Continue)
}

fn question(step: WizardStep) -> &'static str {
    match step {
        WizardStep::RouterNeed => "router [need/from_operator/own/no_thanks]",
        WizardStep::RouterPurchase => "router purchase [buy/installment/rent]",
        WizardStep::RouterOperator => "router operator id",
        WizardStep::RouterConfig => "router setup [specialist/myself]",
        WizardStep::TvBoxNeed => "tv box [need/have_from_operator/have_own/smart_tv]",
        WizardStep::TvBoxCount => "number of TVs [1-4]",
        WizardStep::TvBoxPurchase => "tv box purchase [buy/installment/rent]",
        WizardStep::TvBoxOperator => "tv box operator id",
        WizardStep::SimConnectionType => "sim card [keep_number/new_number/no_thanks]",
        WizardStep::SimClientStatus => "client status [individual/legal_entity]",
        WizardStep::SimInfoPerson => "full name; phone",
        WizardStep::SimInfoRegion => "region; current operator id",
        WizardStep::SimSmartphoneCount => "number of smartphones [1-4]",
        WizardStep::OrderSummary => "order summary",
    }
}

/// Answers typed for the step. An empty line gives no answer, so the wizard
/// either blocks or takes the default of a count step.
fn parse_answers(step: WizardStep, text: &str) -> Option<Vec<WizardAnswer>> {
    if text.is_empty() && step != WizardStep::OrderSummary {
        return Some(Vec::new());
    }

    let answer = match step {
        WizardStep::RouterNeed => WizardAnswer::RouterNeed(parse_choice(text)?),
        WizardStep::RouterPurchase => WizardAnswer::RouterPurchase(parse_choice(text)?),
        WizardStep::RouterOperator => WizardAnswer::RouterOperator(text.parse().ok()?),
        WizardStep::RouterConfig => WizardAnswer::RouterConfig(parse_choice(text)?),
        WizardStep::TvBoxNeed => WizardAnswer::TvBoxNeed(parse_choice(text)?),
        WizardStep::TvBoxCount => WizardAnswer::TvCount(text.parse().ok()?),
        WizardStep::TvBoxPurchase => WizardAnswer::TvBoxPurchase(parse_choice(text)?),
        WizardStep::TvBoxOperator => WizardAnswer::TvBoxOperator(text.parse().ok()?),
        WizardStep::SimConnectionType => WizardAnswer::SimConnectionType(parse_choice(text)?),
        WizardStep::SimClientStatus => WizardAnswer::ClientStatus(parse_choice(text)?),
        WizardStep::SimInfoPerson => {
            let (full_name, phone) = text.split_once(';')?;

            return Some(vec![
                WizardAnswer::PersonFullName(full_name.trim().to_string()),
                WizardAnswer::PersonPhone(phone.trim().to_string()),
            ]);
        }
        WizardStep::SimInfoRegion => {
            let (region, operator_id) = text.split_once(';')?;

            return Some(vec![
                WizardAnswer::SimRegion(region.trim().to_string()),
                WizardAnswer::CurrentOperator(operator_id.trim().parse().ok()?),
            ]);
        }
        WizardStep::SimSmartphoneCount => WizardAnswer::SmartphoneCount(text.parse().ok()?),
        WizardStep::OrderSummary => return None,
    };

    Some(vec![answer])
}

fn answer_question<A, C, AD, WD>(
    session: &mut CheckoutSession<A, C, AD, WD>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Flow>
where
    A: AddressResolver,
    C: CatalogApi,
    AD: DraftRepository<AddressRecord>,
    WD: DraftRepository<WizardDraft>,
{
    let step = session.wizard().current_step();

    if matches!(
        step,
        WizardStep::RouterOperator | WizardStep::TvBoxOperator | WizardStep::SimInfoRegion
    ) {
        for operator in session.operators() {
            writeln!(output, "{}: {}", operator.id, operator.props.name)?;
        }
    }

    let answer = ask_or_quit!(input, output, question(step));

    if answer == BACK_COMMAND {
        if session.go_back() == Retreat::LeftWizard {
            writeln!(output, "back to tariffs")?;
        }

        return Ok(Flow::Continue);
    }

    match parse_answers(step, &answer) {
        Some(answers) => {
            for answer in answers {
                if !session.select(answer.clone()) {
                    writeln!(output, "the answer is not accepted: {:?}", answer)?;
                }
            }

            if session.go_next() == Advance::Blocked {
                writeln!(output, "an answer is required")?;
            }
        }
        None => writeln!(output, "unknown answer: {}", answer)?,
    }

    Ok(Flow::Continue)
}

fn parse_section(text: &str) -> Option<WizardSection> {
    match text {
        "router" => Some(WizardSection::Router),
        "tv" => Some(WizardSection::TvBox),
        "sim" => Some(WizardSection::Sim),
        _ => None,
    }
}

fn review_summary<A, C, AD, WD>(
    session: &mut CheckoutSession<A, C, AD, WD>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Flow>
where
    A: AddressResolver,
    C: CatalogApi,
    AD: DraftRepository<AddressRecord>,
    WD: DraftRepository<WizardDraft>,
{
    for line in session.summary_lines()? {
        let details = line.details.map(|details| format!(" ({})", details)).unwrap_or_default();

        match line.monthly_price {
            Some(price) => writeln!(output, "{}{}: +{} a month", line.title, details, price)?,
            None => writeln!(output, "{}{}", line.title, details)?,
        }
    }

    writeln!(output, "total: {} a month", session.priced_order()?.total)?;

    let command = ask_or_quit!(
        input,
        output,
        "place, back, restart, +tv, -tv, +phone, -phone, cycle, add|edit|remove router|tv|sim"
    );

    match command.as_str() {
        "place" => {
            let order = session.place_order()?;
            writeln!(output, "the order is placed")?;
            return Ok(Flow::Placed(order));
        }
        BACK_COMMAND => {
            session.go_back();
        }
        "restart" => session.restart(),
        "+tv" => session.update_summary(|summary| summary.increment_tv_count())?,
        "-tv" => session.update_summary(|summary| summary.decrement_tv_count())?,
        "+phone" => session.update_summary(|summary| summary.increment_smartphone_count())?,
        "-phone" => session.update_summary(|summary| summary.decrement_smartphone_count())?,
        "cycle" => session.update_summary(|summary| summary.cycle_router_purchase_option())?,
        command => match command.split_once(' ') {
            Some((action, section)) => match (action, parse_section(section)) {
                ("add", Some(WizardSection::Router)) => {
                    session.update_summary(|summary| summary.add_router())?
                }
                ("add", Some(WizardSection::TvBox)) => {
                    session.update_summary(|summary| summary.add_tv_box())?
                }
                ("add", Some(WizardSection::Sim)) => {
                    session.update_summary(|summary| summary.add_sim())?
                }
                ("edit", Some(section)) => {
                    session.update_summary(|summary| summary.edit(section))?
                }
                ("remove", Some(WizardSection::Router)) => {
                    session.update_summary(|summary| summary.remove_router())?
                }
                ("remove", Some(WizardSection::TvBox)) => {
                    session.update_summary(|summary| summary.remove_tv_box())?
                }
                ("remove", Some(WizardSection::Sim)) => {
                    session.update_summary(|summary| summary.remove_sim())?
                }
                _ => writeln!(output, "unknown command: {}", command)?,
            },
            None => writeln!(output, "unknown command: {}", command)?,
        },
    }

    Ok(Flow::Continue)
}
