pub mod cluster;
pub mod namespace;
pub mod pod;
pub mod utils;
