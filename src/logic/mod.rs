pub mod compat;
pub mod filter;
pub mod generator;
pub mod mutator;
pub mod occupancy;
pub mod resize;
pub mod scorer;
pub mod validator;
