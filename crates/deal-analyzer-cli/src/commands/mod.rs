pub mod deal;
pub mod scenarios;
