pub mod order_service;
pub mod seed;
