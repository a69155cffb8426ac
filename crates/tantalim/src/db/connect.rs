use tantalim_core::{Driver, Error, Result};

use std::sync::Arc;
use url::Url;

/// Opens a driver for the database at `url`, chosen by its scheme.
pub async fn connect(url: &str) -> Result<Arc<dyn Driver>> {
    let parsed = Url::parse(url)
        .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url}")))?;

    match parsed.scheme() {
        "mysql" => connect_mysql(url).await,
        scheme => Err(Error::invalid_connection_url(format!(
            "unsupported database; scheme={scheme}; url={url}"
        ))),
    }
}

#[cfg(feature = "mysql")]
async fn connect_mysql(url: &str) -> Result<Arc<dyn Driver>> {
    let driver = tantalim_driver_mysql::MySQL::new(url)?;
    Ok(Arc::new(driver))
}

#[cfg(not(feature = "mysql"))]
async fn connect_mysql(_url: &str) -> Result<Arc<dyn Driver>> {
    Err(Error::invalid_connection_url("`mysql` feature not enabled"))
}
