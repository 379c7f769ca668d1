mod catalog;
mod identifier;
mod resolve;

pub use catalog::CatalogError;
pub use identifier::IdentifierError;
pub use resolve::ResolveError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub type Result<T> = std::result::Result<T, Error>;
