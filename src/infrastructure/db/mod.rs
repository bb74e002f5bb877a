pub mod connection;
pub mod repository;

pub use connection::init_db;
pub use repository::Repository;
