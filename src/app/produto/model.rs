//! Produto 数据模型

use std::fmt;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 产品记录
///
/// 四个字段全部参与相等性与哈希；`id` 由存储层在创建时分配。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Produto {
    id: i64,
    nome: String,
    #[serde(with = "super::decimal")]
    quantidade: BigDecimal,
    #[serde(with = "super::decimal")]
    valor: BigDecimal,
}

impl Default for Produto {
    fn default() -> Self {
        Self::new(0, String::new(), BigDecimal::from(0), BigDecimal::from(0))
    }
}

impl Produto {
    pub fn new(id: i64, nome: impl Into<String>, quantidade: BigDecimal, valor: BigDecimal) -> Self {
        Self {
            id,
            nome: nome.into(),
            quantidade,
            valor,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    pub fn nome(&self) -> &str {
        &self.nome
    }

    pub fn set_nome(&mut self, nome: impl Into<String>) {
        self.nome = nome.into();
    }

    pub fn quantidade(&self) -> &BigDecimal {
        &self.quantidade
    }

    pub fn set_quantidade(&mut self, quantidade: BigDecimal) {
        self.quantidade = quantidade;
    }

    pub fn valor(&self) -> &BigDecimal {
        &self.valor
    }

    pub fn set_valor(&mut self, valor: BigDecimal) {
        self.valor = valor;
    }
}

impl fmt::Display for Produto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Produto{{id={}, nome='{}', quantidade={}, valor={}}}",
            self.id, self.nome, self.quantidade, self.valor
        )
    }
}

/// 尚未持久化的产品（没有 id）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NovoProduto {
    pub nome: String,
    pub quantidade: BigDecimal,
    pub valor: BigDecimal,
}

impl NovoProduto {
    /// 附上存储层分配的 id
    pub fn with_id(self, id: i64) -> Produto {
        Produto::new(id, self.nome, self.quantidade, self.valor)
    }
}

/// 保存请求体
///
/// 字段全部可选，缺失或为 null 的必填字段由 `validate()` 拒绝。
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProdutoRequest {
    #[serde(default)]
    pub id: Option<i64>,

    #[validate(required(message = "nome must not be null"))]
    pub nome: Option<String>,

    #[serde(default, deserialize_with = "super::decimal::option::deserialize")]
    #[validate(required(message = "quantidade must not be null"))]
    pub quantidade: Option<BigDecimal>,

    #[serde(default, deserialize_with = "super::decimal::option::deserialize")]
    #[validate(required(message = "valor must not be null"))]
    pub valor: Option<BigDecimal>,
}

/// 校验后的保存意图
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProdutoDraft {
    Create(NovoProduto),
    Update(Produto),
}

impl ProdutoRequest {
    /// 把已校验的请求拆成创建或更新两条分支，id 为 0 视同未提供
    ///
    /// 必填字段缺失时返回 `None`，调用方应先执行 `validate()`。
    pub fn into_draft(self) -> Option<ProdutoDraft> {
        let novo = NovoProduto {
            nome: self.nome?,
            quantidade: self.quantidade?,
            valor: self.valor?,
        };

        Some(match self.id {
            Some(id) if id != 0 => ProdutoDraft::Update(novo.with_id(id)),
            _ => ProdutoDraft::Create(novo),
        })
    }
}
