pub mod department;
pub mod employee;
pub mod position;
pub mod salary;
pub mod work_assignment;
