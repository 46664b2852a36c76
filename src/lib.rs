pub mod dehazing;
pub mod logger;
