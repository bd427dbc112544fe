pub mod distribute;
pub mod draw;
pub mod gradient_icon;
mod png;
