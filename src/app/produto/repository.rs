//! Produto 仓储抽象
//!
//! 创建与更新是两个独立的操作：输入按值传入，返回持久化后的新值。

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::model::{NovoProduto, Produto};

/// 仓储错误类型
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[cfg(feature = "database")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("no identifiers left to assign")]
    IdSpaceExhausted,
}

#[async_trait]
pub trait ProdutoRepository: Send + Sync {
    /// 按存储层的顺序返回全部记录
    async fn find_all(&self) -> Result<Vec<Produto>, RepositoryError>;

    /// 插入新记录并返回带有分配 id 的记录
    async fn create(&self, novo: NovoProduto) -> Result<Produto, RepositoryError>;

    /// 覆盖同 id 的记录；不存在时返回 `None`
    async fn update(&self, produto: Produto) -> Result<Option<Produto>, RepositoryError>;

    /// 存储可用性检查
    async fn ping(&self) -> Result<(), RepositoryError>;

    fn backend(&self) -> &'static str;
}

#[derive(Debug)]
struct MemoryState {
    rows: BTreeMap<i64, Produto>,
    /// 下一个可分配的 id；`None` 表示 id 已用尽
    next_id: Option<i64>,
}

/// 进程内存储，未配置数据库时使用
#[derive(Debug)]
pub struct InMemoryProdutoRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryProdutoRepository {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// 从指定序号开始分配 id
    pub fn starting_at(next_id: i64) -> Self {
        Self {
            state: RwLock::new(MemoryState {
                rows: BTreeMap::new(),
                next_id: Some(next_id),
            }),
        }
    }
}

impl Default for InMemoryProdutoRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProdutoRepository for InMemoryProdutoRepository {
    async fn find_all(&self) -> Result<Vec<Produto>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.rows.values().cloned().collect())
    }

    async fn create(&self, novo: NovoProduto) -> Result<Produto, RepositoryError> {
        let mut state = self.state.write().await;
        let id = state.next_id.ok_or(RepositoryError::IdSpaceExhausted)?;
        state.next_id = id.checked_add(1);

        let produto = novo.with_id(id);
        state.rows.insert(id, produto.clone());
        Ok(produto)
    }

    async fn update(&self, produto: Produto) -> Result<Option<Produto>, RepositoryError> {
        let mut state = self.state.write().await;
        match state.rows.get_mut(&produto.id()) {
            Some(row) => {
                *row = produto.clone();
                Ok(Some(produto))
            }
            None => Ok(None),
        }
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(feature = "database")]
pub use self::postgres::PgProdutoRepository;

#[cfg(feature = "database")]
mod postgres {
    use async_trait::async_trait;
    use sqlx::postgres::PgPool;

    use super::{ProdutoRepository, RepositoryError};
    use crate::app::produto::model::{NovoProduto, Produto};

    const FIND_ALL_SQL: &str = "SELECT id, nome, quantidade, valor FROM tb_produto ORDER BY id";
    const INSERT_SQL: &str = "INSERT INTO tb_produto (nome, quantidade, valor) VALUES ($1, $2, $3) \
                              RETURNING id, nome, quantidade, valor";
    const UPDATE_SQL: &str = "UPDATE tb_produto SET nome = $2, quantidade = $3, valor = $4 \
                              WHERE id = $1 RETURNING id, nome, quantidade, valor";

    /// PostgreSQL 仓储
    #[derive(Debug, Clone)]
    pub struct PgProdutoRepository {
        pool: PgPool,
    }

    impl PgProdutoRepository {
        pub fn new(pool: PgPool) -> Self {
            Self { pool }
        }
    }

    #[async_trait]
    impl ProdutoRepository for PgProdutoRepository {
        async fn find_all(&self) -> Result<Vec<Produto>, RepositoryError> {
            let produtos = sqlx::query_as::<_, Produto>(FIND_ALL_SQL)
                .fetch_all(&self.pool)
                .await?;
            Ok(produtos)
        }

        async fn create(&self, novo: NovoProduto) -> Result<Produto, RepositoryError> {
            let produto = sqlx::query_as::<_, Produto>(INSERT_SQL)
                .bind(&novo.nome)
                .bind(&novo.quantidade)
                .bind(&novo.valor)
                .fetch_one(&self.pool)
                .await?;
            Ok(produto)
        }

        async fn update(&self, produto: Produto) -> Result<Option<Produto>, RepositoryError> {
            let updated = sqlx::query_as::<_, Produto>(UPDATE_SQL)
                .bind(produto.id())
                .bind(produto.nome())
                .bind(produto.quantidade())
                .bind(produto.valor())
                .fetch_optional(&self.pool)
                .await?;
            Ok(updated)
        }

        async fn ping(&self) -> Result<(), RepositoryError> {
            sqlx::query("SELECT 1").execute(&self.pool).await?;
            Ok(())
        }

        fn backend(&self) -> &'static str {
            "postgres"
        }
    }
}
