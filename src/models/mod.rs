pub mod park;

pub use park::{MeasurementTable, ParkRecord};
