mod common;
mod weighted;
