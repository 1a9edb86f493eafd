mod common;
mod effectiveness;
mod roi;
