pub mod firebird;
pub mod local_storage;
