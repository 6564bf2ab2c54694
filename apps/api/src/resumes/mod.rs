// Resume API: score, rescore, list, get and delete.

pub mod handlers;
