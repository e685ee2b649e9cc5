pub mod minifb_window;
