pub mod calculate;
pub mod export;
