pub mod appointment;
pub mod availability;
pub mod branch;
pub mod member;
pub mod message;
pub mod notification;
pub mod recommendation;
pub mod service;
pub mod ticket;
pub mod trainer;
