pub mod in_memory;
pub mod redis_cache;

pub use in_memory::InMemoryPageCache;
pub use redis_cache::RedisPageCache;
