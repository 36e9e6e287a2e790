//! Discovery implementations backed by configuration

pub mod static_list;

pub use static_list::StaticDiscovery;
