pub mod controller;
pub mod error;
pub mod router;
pub mod service;
pub mod store;
