pub mod factory;
mod numeric;
pub mod repository;

pub use factory::SqliteRepositoryFactory;
pub use repository::SqliteRepository;

use yield_core::db::RepositoryRegistry;

/// Registry with every backend this crate provides.
pub fn registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}
