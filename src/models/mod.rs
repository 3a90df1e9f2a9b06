pub mod candidate;
pub mod institution;
pub mod proposal;
pub mod vacancy;
