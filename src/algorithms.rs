pub mod application;
pub mod dds_solutions;
pub mod divided_difference;
pub mod expansion;
