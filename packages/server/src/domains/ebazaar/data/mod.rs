pub mod ebazaar;

pub use ebazaar::{CustomerData, EBazaarData, MediaData, OrderData};
