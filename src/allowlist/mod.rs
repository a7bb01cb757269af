pub mod schemas;
pub mod typedefs;
pub mod validate;
pub mod verify;
