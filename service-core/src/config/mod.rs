use crate::error::AppError;
use config::{Config as Cfg, Environment, File};
use serde::de::DeserializeOwned;

/// Load settings from `.env`, an optional `configuration` file and the
/// process environment, in increasing order of precedence.
pub fn load<T: DeserializeOwned>() -> Result<T, AppError> {
    dotenvy::dotenv().ok();

    load_from(Environment::default())
}

/// Same as [`load`] with an explicit environment source. Environment keys are
/// unprefixed and matched case-insensitively against field names.
pub fn load_from<T: DeserializeOwned>(environment: Environment) -> Result<T, AppError> {
    let config = Cfg::builder()
        .add_source(File::with_name("configuration").required(false))
        .add_source(environment)
        .build()?;

    Ok(config.try_deserialize()?)
}
