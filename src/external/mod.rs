pub mod broker;
pub mod signal_provider;
pub mod simulated;
pub mod yahoo;
