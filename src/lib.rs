//! # produtos-api
//!
//! Produto 资源的 REST 服务：
//! - `GET /api/produtos` 列出全部记录
//! - `POST /api/salvar` 创建（或按 id 覆盖）记录
//!
//! 分层结构：`app`（路由、处理器、服务、仓储）、`core`（错误、中间件）、
//! `infrastructure`（配置、数据库、日志）。

pub mod app;
pub mod core;
pub mod infrastructure;

pub use app::produto::{Produto, ProdutoRepository, ProdutoService};
pub use app::{build_repository, router, AppState};
pub use infrastructure::config::Config;
