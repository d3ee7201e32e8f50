//! Record types: contacts and the job applications attached to them.

mod application;
mod contact;

pub use application::{ApplicationStatus, JobApplication};
pub use contact::Contact;
