//! Operation template editing

pub mod path_builder;

pub use path_builder::FoaasPathBuilder;
