mod common;
mod notifications;
mod service;
