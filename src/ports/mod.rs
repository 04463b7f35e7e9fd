pub mod data_source_port;
pub mod result_writer_port;
