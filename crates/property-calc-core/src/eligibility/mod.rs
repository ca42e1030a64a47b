pub mod affordability;
pub mod calculator;
pub mod loan_limit;
pub mod sensitivity;
