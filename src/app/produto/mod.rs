pub mod decimal;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub use model::{NovoProduto, Produto, ProdutoRequest};
pub use repository::{InMemoryProdutoRepository, ProdutoRepository, RepositoryError};
pub use service::ProdutoService;

#[cfg(feature = "database")]
pub use repository::PgProdutoRepository;
