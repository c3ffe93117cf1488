mod common;
mod display;
