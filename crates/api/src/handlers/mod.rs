pub mod admin;
pub mod announcements;
pub mod auth;
pub mod categories;
pub mod courses;
pub mod student;
pub mod teacher;
pub mod uploads;
pub mod users;
