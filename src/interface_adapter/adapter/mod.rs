pub mod prompt_io_factory;
