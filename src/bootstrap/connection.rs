//! MySQL connection attempt and row access.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use sqlx::mysql::{MySqlColumn, MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::types::chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::types::Json;
use sqlx::{Column, Connection, Row, TypeInfo};
use tokio::sync::Mutex;

use crate::bootstrap::settings::ConnectionConfig;
use crate::observability::metrics;

/// Prepared statements kept per connection.
const STATEMENT_CACHE_CAPACITY: usize = 100;

/// A fetched row keyed by column name.
pub type RowMap = Map<String, Value>;

/// Errors raised while establishing the store connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("could not connect to MySQL at {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: sqlx::Error,
    },

    #[error("timed out after {after:?} connecting to MySQL at {host}:{port}")]
    Timeout {
        host: String,
        port: u16,
        after: Duration,
    },
}

/// Open handle to the persistent store.
///
/// Wraps the single connection made at bootstrap; clones share it.
#[derive(Debug, Clone)]
pub struct Database {
    conn: Arc<Mutex<MySqlConnection>>,
    label: String,
}

/// Make one connection attempt with the fixed session options.
///
/// Statements go through the server-side prepare path, every server error is
/// returned as `Err`, and rows are read as column-name maps through
/// [`Database::fetch_assoc`].
pub async fn connect(config: &ConnectionConfig) -> Result<Database, ConnectionError> {
    let options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.username)
        .password(&config.password)
        .database(&config.database)
        .charset(&config.charset)
        .statement_cache_capacity(STATEMENT_CACHE_CAPACITY);

    tracing::debug!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        "Connecting to MySQL"
    );

    let attempt = tokio::time::timeout(
        config.connect_timeout,
        MySqlConnection::connect_with(&options),
    )
    .await;

    let result = match attempt {
        Ok(Ok(conn)) => Ok(conn),
        Ok(Err(source)) => Err(ConnectionError::Connect {
            host: config.host.clone(),
            port: config.port,
            source,
        }),
        Err(_) => Err(ConnectionError::Timeout {
            host: config.host.clone(),
            port: config.port,
            after: config.connect_timeout,
        }),
    };
    metrics::record_bootstrap(result.is_ok());

    let conn = result?;
    let label = format!("{}:{}/{}", config.host, config.port, config.database);
    tracing::info!(store = %label, "Connection to MySQL established");
    Ok(Database {
        conn: Arc::new(Mutex::new(conn)),
        label,
    })
}

impl Database {
    /// `host:port/database` of the open connection.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Round-trip a trivial statement.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        let mut conn = self.conn.lock().await;
        conn.ping().await
    }

    /// Run `sql` and return every row as a column-name keyed map.
    pub async fn fetch_assoc(&self, sql: &str) -> Result<Vec<RowMap>, sqlx::Error> {
        let mut conn = self.conn.lock().await;
        let rows = sqlx::query(sql).fetch_all(&mut *conn).await?;
        Ok(rows.iter().map(row_to_map).collect())
    }
}

fn row_to_map(row: &MySqlRow) -> RowMap {
    row.columns()
        .iter()
        .map(|column| (column.name().to_string(), column_value(row, column)))
        .collect()
}

/// How a column is carried into a JSON value, picked from its MySQL type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decoding {
    DateTime,
    Date,
    Time,
    /// Sent as text; kept as a string to avoid float rounding.
    Decimal,
    Json,
    Native,
}

impl Decoding {
    fn for_type(name: &str) -> Self {
        match name {
            "DATETIME" | "TIMESTAMP" => Self::DateTime,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "DECIMAL" => Self::Decimal,
            "JSON" => Self::Json,
            _ => Self::Native,
        }
    }
}

fn column_value(row: &MySqlRow, column: &MySqlColumn) -> Value {
    let index = column.ordinal();
    let type_name = column.type_info().name();

    let decoded = match Decoding::for_type(type_name) {
        Decoding::DateTime => row
            .try_get::<Option<NaiveDateTime>, _>(index)
            .map(|v| v.map(|t| Value::from(t.to_string()))),
        Decoding::Date => row
            .try_get::<Option<NaiveDate>, _>(index)
            .map(|v| v.map(|d| Value::from(d.to_string()))),
        Decoding::Time => row
            .try_get::<Option<NaiveTime>, _>(index)
            .map(|v| v.map(|t| Value::from(t.to_string()))),
        Decoding::Decimal => row
            .try_get_unchecked::<Option<String>, _>(index)
            .map(|v| v.map(Value::from)),
        Decoding::Json => row
            .try_get::<Option<Json<Value>>, _>(index)
            .map(|v| v.map(|json| json.0)),
        Decoding::Native => return native_value(row, column, type_name),
    };

    match decoded {
        Ok(value) => value.unwrap_or(Value::Null),
        Err(e) => {
            tracing::warn!(
                column = %column.name(),
                sql_type = type_name,
                error = %e,
                "Could not decode column, reading as null"
            );
            Value::Null
        }
    }
}

fn native_value(row: &MySqlRow, column: &MySqlColumn, type_name: &str) -> Value {
    let index = column.ordinal();
    if let Ok(v) = row.try_get::<Option<i64>, _>(index) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<u64>, _>(index) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(index) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<String>, _>(index) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<Vec<u8>>, _>(index) {
        return v
            .map(|bytes| Value::from(String::from_utf8_lossy(&bytes).into_owned()))
            .unwrap_or(Value::Null);
    }
    tracing::warn!(
        column = %column.name(),
        sql_type = type_name,
        "Unsupported column type, reading as null"
    );
    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_config() -> ConnectionConfig {
        ConnectionConfig {
            // Port 1 on loopback refuses connections immediately.
            host: "127.0.0.1".into(),
            port: 1,
            database: "ctf".into(),
            username: "player".into(),
            password: "secret".into(),
            charset: "utf8mb4".into(),
            connect_timeout: Duration::from_secs(2),
        }
    }

    #[tokio::test]
    async fn test_unreachable_store_fails() {
        let err = connect(&unreachable_config()).await.unwrap_err();
        match err {
            ConnectionError::Connect { host, port, .. } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_error_does_not_leak_password() {
        let err = connect(&unreachable_config()).await.unwrap_err();
        assert!(!err.to_string().contains("secret"));
    }

    // Run with: MYSQL_host=... MYSQL_database=... MYSQL_username=... MYSQL_password=... cargo test -- --ignored
    #[tokio::test]
    #[ignore = "requires database"]
    async fn test_connect_and_fetch_assoc() {
        let mut db_config = crate::config::DatabaseConfig::default();
        if let Ok(host) = std::env::var("MYSQL_host") {
            db_config.host = host;
        }
        let config = ConnectionConfig::from_env(&db_config).expect("MYSQL_* variables required");
        let db = connect(&config).await.expect("connection failed");

        db.ping().await.expect("ping failed");
        let rows = db
            .fetch_assoc("SELECT 7 AS answer, 'flag' AS word, NULL AS nothing")
            .await
            .expect("query failed");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["answer"], 7);
        assert_eq!(rows[0]["word"], "flag");
        assert_eq!(rows[0]["nothing"], Value::Null);
    }

    #[test]
    fn test_decoding_follows_type_name() {
        assert_eq!(Decoding::for_type("DATETIME"), Decoding::DateTime);
        assert_eq!(Decoding::for_type("TIMESTAMP"), Decoding::DateTime);
        assert_eq!(Decoding::for_type("DATE"), Decoding::Date);
        assert_eq!(Decoding::for_type("TIME"), Decoding::Time);
        assert_eq!(Decoding::for_type("DECIMAL"), Decoding::Decimal);
        assert_eq!(Decoding::for_type("JSON"), Decoding::Json);
        assert_eq!(Decoding::for_type("BIGINT UNSIGNED"), Decoding::Native);
        assert_eq!(Decoding::for_type("VARCHAR"), Decoding::Native);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn test_fetch_assoc_keeps_temporal_decimal_and_json() {
        let mut db_config = crate::config::DatabaseConfig::default();
        if let Ok(host) = std::env::var("MYSQL_host") {
            db_config.host = host;
        }
        let config = ConnectionConfig::from_env(&db_config).expect("MYSQL_* variables required");
        let db = connect(&config).await.expect("connection failed");

        let rows = db
            .fetch_assoc(
                "SELECT CAST('2024-03-01 12:30:00' AS DATETIME) AS solved_at, \
                 CAST('2024-03-01' AS DATE) AS day, \
                 CAST(12.50 AS DECIMAL(6,2)) AS points, \
                 JSON_OBJECT('flag', 'ctf{x}') AS meta",
            )
            .await
            .expect("query failed");

        assert_eq!(rows[0]["solved_at"], "2024-03-01 12:30:00");
        assert_eq!(rows[0]["day"], "2024-03-01");
        assert_eq!(rows[0]["points"], "12.50");
        assert_eq!(rows[0]["meta"]["flag"], "ctf{x}");
    }
}
