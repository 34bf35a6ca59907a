pub mod auditorium;
pub mod auth;
pub mod booking;
pub mod health;
pub mod v1;
