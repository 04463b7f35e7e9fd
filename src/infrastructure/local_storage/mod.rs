pub mod local_result_writer;
