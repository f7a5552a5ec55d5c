pub mod analysis;
pub mod config;
pub mod error;
pub mod layers;
pub mod page;
pub mod queries;
pub mod router;
pub mod state;
#[cfg(test)]
pub mod tests;
