pub mod filter;
pub mod mutators;
pub mod selectors;
pub mod spec;
