pub mod song_dedication;

pub use song_dedication::{DedicationStatus, SongDedication};
