pub mod concatenate;
pub mod list;
pub mod reconstruct;

pub use concatenate::run as concatenate;
pub use list::run as list;
pub use reconstruct::run as reconstruct;
