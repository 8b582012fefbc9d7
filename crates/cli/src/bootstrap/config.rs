use dblogger_domain::{CliOverrides, Config, DomainError};

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> Result<Config, DomainError> {
    let config = Config::load(path, overrides)?;
    Ok(config)
}
