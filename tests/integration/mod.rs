/// Integration test suite for the progress service
mod service_flow;
