pub mod competitors;
pub mod page;
