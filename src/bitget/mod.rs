pub mod auth;
pub mod client;

pub use auth::{BitgetAuth, Credentials};
pub use client::{BitgetClient, BITGET_API_BASE, PLACE_ORDER_PATH};
