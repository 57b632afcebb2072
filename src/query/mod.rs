pub mod scope;
pub mod stats;
