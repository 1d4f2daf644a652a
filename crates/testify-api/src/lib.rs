pub mod error;
pub mod extract;
pub mod media;
pub mod routes;
pub mod state;
pub mod study;
pub mod testimonies;
pub mod token;
pub mod users;
pub mod webhook;

#[cfg(test)]
mod test_support;
