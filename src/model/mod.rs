pub mod access_code;
pub mod attendance;
pub mod employee;
pub mod work_shift;
