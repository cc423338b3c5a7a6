//! 数据库基础设施

use sqlx::{
    postgres::{PgPool, PgPoolOptions},
    Error,
};
use std::time::Duration;
use tracing::info;

use super::config::DatabaseConfig;

const CREATE_PRODUTO_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS tb_produto (
        id BIGSERIAL PRIMARY KEY,
        nome TEXT NOT NULL,
        quantidade NUMERIC NOT NULL,
        valor NUMERIC NOT NULL
    )
"#;

pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    pub async fn new(database_url: &str, config: &DatabaseConfig) -> Result<Self, Error> {
        info!("Connecting to database: {}", mask_password(database_url));

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// 建表（不存在时）
    pub async fn migrate(&self) -> Result<(), Error> {
        sqlx::query(CREATE_PRODUTO_TABLE_SQL)
            .execute(&self.pool)
            .await?;

        info!("Database schema ready");
        Ok(())
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }
}

/// 隐藏连接串中的密码
pub fn mask_password(database_url: &str) -> String {
    let Some((scheme, rest)) = database_url.split_once("://") else {
        return database_url.to_string();
    };
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return database_url.to_string();
    };

    match credentials.split_once(':') {
        Some((user, _)) => format!("{}://{}:***@{}", scheme, user, host),
        None => database_url.to_string(),
    }
}
