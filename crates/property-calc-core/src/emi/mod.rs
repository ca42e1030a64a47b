pub mod calculator;
pub mod installment;
pub mod schedule;
