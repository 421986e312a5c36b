pub mod calculators;
pub mod conditions;
pub mod effectiveness;
pub mod engine;
pub mod observation;
pub mod state;
pub mod turn_order;
pub mod validation;
pub mod victory;

#[cfg(test)]
mod tests;
