pub mod ebazaar;
pub mod media;
pub mod order;

pub use ebazaar::{EBazaar, EBazaarChanges, NewEBazaar};
pub use media::{Media, MediaKind, NewMedia};
pub use order::{Order, OrderWithCustomer};
