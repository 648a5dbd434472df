use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::path::Path;

use csv::Reader;
use serde::{Deserialize, Serialize};

use crate::entities::PRICE_DECIMAL_PLACES;

pub type ParamName = String;
pub type ParamInputValue = String;
pub type ParamOutputValue = Decimal;

pub trait Params {
    type Param: Display;

    fn get_param_value(&self, name: Self::Param) -> Result<ParamOutputValue>;

    fn get_param_value_or(&self, name: Self::Param, default: ParamOutputValue) -> ParamOutputValue {
        self.get_param_value(name).unwrap_or(default)
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CsvParam {
    pub name: ParamName,
    pub value: ParamInputValue,
}

/// Monetary params read from a `name,value` csv file. Every value is rounded
/// to the price precision and must not be negative.
pub struct CsvParams<Param>
where
    Param: Display,
{
    param_values: HashMap<ParamName, ParamOutputValue>,
    param_name: PhantomData<Param>,
}

impl<Param> CsvParams<Param>
where
    Param: Display,
{
    pub fn from_csv<P: AsRef<Path>>(path_to_file: P) -> Result<Self> {
        let mut params = Self {
            param_values: Default::default(),
            param_name: PhantomData,
        };

        let mut reader = Reader::from_path(path_to_file)
            .context("an error occurred on creating a reader from the path")?;

        for param in reader.deserialize() {
            let param: CsvParam = param.context("an error on deserializing a param")?;

            params.add_param(param)?;
        }

        Ok(params)
    }

    pub fn from_vec(params: Vec<CsvParam>) -> Result<Self> {
        let mut result_params = Self {
            param_values: Default::default(),
            param_name: PhantomData,
        };

        for param in params {
            result_params.add_param(param)?;
        }

        Ok(result_params)
    }

    fn add_param(&mut self, param: CsvParam) -> Result<()> {
        let value = param.value.trim();

        if value.is_empty() {
            bail!("empty value was got for a param {}", param.name);
        }

        let numeric_param_value = value
            .parse::<ParamOutputValue>()
            .context(format!("invalid value of a param {}: {}", param.name, value))?
            .round_dp(PRICE_DECIMAL_PLACES);

        if numeric_param_value.is_sign_negative() {
            bail!(
                "a param {} must not be negative: {}",
                param.name,
                numeric_param_value
            );
        }

        self.param_values
            .insert(param.name.trim().to_string(), numeric_param_value);

        Ok(())
    }
}

impl<Param> Params for CsvParams<Param>
where
    Param: Display,
{
    type Param = Param;

    fn get_param_value(&self, name: Self::Param) -> Result<ParamOutputValue> {
        self.param_values
            .get(&name.to_string())
            .copied()
            .context(format!("a param with a name {} is not found", name))
    }
}

impl<Param> Display for CsvParams<Param>
where
    Param: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Params:")?;

        let mut names = self.param_values.keys().collect::<Vec<_>>();
        names.sort();

        for name in names {
            writeln!(f, "{}: {}", name, self.param_values[name])?;
        }

        Ok(())
    }
}
