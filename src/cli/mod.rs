pub mod check;
pub mod layout;
pub mod listen;
pub mod models;
pub mod resolve;
pub mod tools;
