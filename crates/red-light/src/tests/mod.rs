mod app;
mod credential_store;
mod error;
mod notice;
