pub mod model;

pub use model::{RANDOM_LEN, Transaction};
