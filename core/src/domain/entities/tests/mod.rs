mod expirable_key_tests;
mod jwk_tests;
