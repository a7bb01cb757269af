// The single hashing scheme the published trees are built with.
pub const HASH_FUNCTION: &str = "keccak256";
