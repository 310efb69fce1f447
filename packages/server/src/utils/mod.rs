pub mod date;
pub mod hash;
pub mod jwt;
