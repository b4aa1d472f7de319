mod assignment;
mod common;
mod ranking;
