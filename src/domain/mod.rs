pub mod appointment;
pub mod row;

pub use appointment::{classify, AppointmentKind, AppointmentRecord};
pub use row::DisplayRow;
