pub mod firebird_data_source;
