pub mod bridge;
pub mod connection;
pub mod error;
pub mod message_creator;
pub mod ports;
pub mod protocol;
pub mod transport;
pub mod types;
pub mod ws_transport;
