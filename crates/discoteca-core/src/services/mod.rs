pub mod artist_resolver;
pub mod catalog_service;
pub mod genre_resolver;

pub use artist_resolver::ArtistResolver;
pub use catalog_service::CatalogService;
pub use genre_resolver::GenreResolver;
