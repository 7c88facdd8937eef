//! Inbound adapters that turn user input into domain calls.
//!
//! The command-line front end lives under [`cli`]; it plays the role the
//! page components play in the browser client.

pub mod cli;
