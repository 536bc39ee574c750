pub mod on_road;
