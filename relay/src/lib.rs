pub mod config;
pub mod constants;
pub mod errors;
pub mod extract;
pub mod messenger;
pub mod observer;
pub mod rpc;
pub mod shared_state;
pub mod source;
pub mod structs;
pub mod waiter;
