pub mod decode;
pub mod search;
