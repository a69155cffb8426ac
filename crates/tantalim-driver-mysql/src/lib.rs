mod value;
pub(crate) use value::Value;

use mysql_async::{prelude::Queryable, Pool};
use tantalim_core::{
    async_trait,
    driver::{QuerySql, Response},
    stmt, Driver, Error, Record, Result,
};
use tantalim_sql as sql;
use url::Url;

#[derive(Debug)]
pub struct MySQL {
    pool: Pool,
}

impl MySQL {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str)
            .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url_str}")))?;

        if url.scheme() != "mysql" {
            return Err(Error::invalid_connection_url(format!(
                "connection url does not have a `mysql` scheme; url={url}"
            )));
        }

        if url.host_str().is_none() {
            return Err(Error::invalid_connection_url(format!(
                "missing host in connection URL; url={url}"
            )));
        }

        if url.path().trim_start_matches('/').is_empty() {
            return Err(Error::invalid_connection_url(format!(
                "no database specified - missing path in connection URL; url={url}"
            )));
        }

        let opts = mysql_async::Opts::from_url(url.as_ref())
            .map_err(|err| Error::invalid_connection_url(err.to_string()))?;
        let opts = mysql_async::OptsBuilder::from_opts(opts).client_found_rows(true);

        Ok(Self {
            pool: Pool::new(opts),
        })
    }
}

impl From<Pool> for MySQL {
    fn from(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Driver for MySQL {
    async fn exec(&self, op: QuerySql) -> Result<Response> {
        let serializer = sql::Serializer::mysql();

        let mut params: Vec<stmt::Value> = Vec::new();
        let sql = serializer.serialize(&op.stmt, &mut params);

        tracing::debug!(sql = %sql, params = params.len(), "tantalim.query");

        let args = params
            .into_iter()
            .map(|param| mysql_async::prelude::ToValue::to_value(&Value::from(param)))
            .collect::<Vec<_>>();

        let mut conn = self.pool.get_conn().await.map_err(Error::driver)?;

        match &op.stmt {
            stmt::Statement::Query(_) => {
                let rows: Vec<mysql_async::Row> =
                    conn.exec(&sql, args).await.map_err(Error::driver)?;

                Ok(Response::values(rows.into_iter().map(to_record).collect()))
            }
            stmt::Statement::Insert(_) => {
                conn.exec_drop(&sql, args).await.map_err(Error::driver)?;

                Ok(Response::inserted(
                    conn.affected_rows(),
                    conn.last_insert_id().unwrap_or(0),
                ))
            }
            stmt::Statement::Update(_) | stmt::Statement::Delete(_) => {
                conn.exec_drop(&sql, args).await.map_err(Error::driver)?;

                Ok(Response::count(conn.affected_rows()))
            }
        }
    }
}

/// Keys each column by its `AS` alias, which is the field name.
fn to_record(mut row: mysql_async::Row) -> Record {
    let columns = row.columns();

    columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let value = row
                .take::<mysql_async::Value, usize>(i)
                .map(|value| Value::from(value).into_inner())
                .unwrap_or_default();

            (column.name_str().into_owned(), value)
        })
        .collect()
}
