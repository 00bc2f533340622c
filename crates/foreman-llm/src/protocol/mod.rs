//! Wire formats for upstream model APIs

pub mod cohere;
