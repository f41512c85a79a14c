pub mod client;
pub mod error;

pub use client::{ContactClient, Delivery};
pub use error::DeliveryError;
