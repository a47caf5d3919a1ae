mod auth;
mod connect;
mod support;
mod transport;
