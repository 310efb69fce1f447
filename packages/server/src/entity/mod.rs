pub mod classroom;
pub mod complaint;
pub mod student;
pub mod student_attendance;
pub mod teacher;
pub mod teacher_attendance;
pub mod user;
