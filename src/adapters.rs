//! Adapter implementations of the ports

pub mod msgpack_repository;

pub use msgpack_repository::MsgPackRepository;
