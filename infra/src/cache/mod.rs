//! Cache module - Redis-backed captcha store

pub mod redis_store;

pub use redis_store::RedisStore;
