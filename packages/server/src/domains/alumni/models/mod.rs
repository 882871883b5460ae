pub mod alumnus;

pub use alumnus::{Alumnus, AlumnusChanges, AlumnusListing, NewAlumnus};
