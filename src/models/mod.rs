//! Frontend Models
//!
//! Data structures matching backend REST resources, plus the request
//! bodies ("drafts") the pages send back.

mod status;
mod people;
mod operations;
mod finance;
mod messaging;

pub use status::*;
pub use people::*;
pub use operations::*;
pub use finance::*;
pub use messaging::*;
