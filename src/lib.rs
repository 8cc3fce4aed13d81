// Library root
// ------------
// - `config`: settings read from the environment / `.env`.
// - `models`: session, request bodies and typed vendor responses.
// - `services`: signing client, signed request pipeline and the
//   pagination drivers built on top of it.
// - `cli`: interactive menu, views and file output used by `main.rs`.
pub mod cli;
pub mod config;
pub mod models;
pub mod services;
