/// Unit test suite for the progress service
mod core_rules;
