// Factbook API: create (synthesize + persist), list, detail, delete.

pub mod handlers;
