//! Ferrous PathStore Infrastructure Layer
pub mod path_store;
