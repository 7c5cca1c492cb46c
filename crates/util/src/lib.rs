pub mod index_containers;

pub use self::index_containers::IndexMap;
