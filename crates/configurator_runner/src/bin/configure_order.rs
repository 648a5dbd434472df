use anyhow::{Context, Result};
use base::entities::target_logger;
use base::requests::entities::RetrySettings;
use base::requests::ureq::UreqRequestApi;
use base::stores::file_draft_store::FileDraftStore;
use configurator::catalog::HttpCatalogApi;
use configurator::checkout::CheckoutSession;
use configurator::drafts::{
    draft_key, new_session_id, KeyedDraftRepository, ADDRESS_DRAFT_NAME, WIZARD_DRAFT_NAME,
};
use configurator::pricing::PricingRates;
use configurator::resolver::HttpAddressResolver;
use configurator_runner::console::run_console_checkout;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

const LOG4RS_CONFIG_FILE: &str = "log4rs.yaml";

const DRAFTS_FOLDER_ENV: &str = "DRAFTS_FOLDER";
const PRICING_PARAMS_CSV_FILE_ENV: &str = "PRICING_PARAMS_CSV_FILE";
const SESSION_ID_ENV: &str = "SESSION_ID";

const DEFAULT_DRAFTS_FOLDER: &str = "drafts";

fn main() -> Result<()> {
    dotenv::from_filename("common.env").context("common.env can't be loaded")?;
    dotenv::from_filename("configurator.env").context("configurator.env can't be loaded")?;

    log4rs::init_file(LOG4RS_CONFIG_FILE, Default::default())
        .context(format!("logging can't be configured from {}", LOG4RS_CONFIG_FILE))?;

    let target_logger = target_logger();

    let rates = match dotenv::var(PRICING_PARAMS_CSV_FILE_ENV) {
        Ok(params_file) => PricingRates::from_csv(params_file)?,
        Err(_) => PricingRates::default(),
    };

    let resolver = HttpAddressResolver::from_env(
        target_logger.clone(),
        RetrySettings::default(),
        UreqRequestApi::new(),
    )?;
    let catalog = HttpCatalogApi::from_env(
        target_logger.clone(),
        RetrySettings::default(),
        UreqRequestApi::new(),
    )?;

    // a session id from the environment continues the drafts of that session
    let session_id = dotenv::var(SESSION_ID_ENV).unwrap_or_else(|_| new_session_id());
    let drafts_folder =
        dotenv::var(DRAFTS_FOLDER_ENV).unwrap_or_else(|_| String::from(DEFAULT_DRAFTS_FOLDER));
    let store = Rc::new(RefCell::new(FileDraftStore::new(drafts_folder)));

    log::info!(target: target_logger.as_str(), "the order session {} is started", session_id);

    let mut session = CheckoutSession::new(
        resolver,
        catalog,
        rates,
        KeyedDraftRepository::new(store.clone(), draft_key(&session_id, ADDRESS_DRAFT_NAME)),
        KeyedDraftRepository::new(store, draft_key(&session_id, WIZARD_DRAFT_NAME)),
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    match run_console_checkout(&mut session, &mut input, &mut output)? {
        Some(order) => {
            let order = serde_json::to_string_pretty(&order).context("error on serializing the order")?;
            println!("{}", order);
        }
        None => println!("the order is not placed, session id: {}", session_id),
    }

    Ok(())
}
