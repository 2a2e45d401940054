pub mod factbook;
pub mod rfp;
