mod common;
mod lineup;
mod opponent;
