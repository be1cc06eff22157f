//! Database rows and their projections into the client-safe `store` models.

mod calculation;
mod note;
mod user;

pub use calculation::{calculations_from_rows, CalculationRow};
pub use note::NoteRow;
pub use user::User;
