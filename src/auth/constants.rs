pub const ACCESS_TOKEN_DURATION_SECONDS: i64 = 3600;
pub const TOKEN_LEEWAY_SECONDS: u64 = 30;
pub const STORE_HEADER: &str = "Store";
