pub mod appointment;
pub mod branch;
pub mod health;
pub mod member;
pub mod message;
pub mod notification;
pub mod recommendation;
pub mod service;
pub mod ticket;
pub mod trainer;
