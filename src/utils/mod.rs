pub mod date;
pub mod password;
pub mod validation;
