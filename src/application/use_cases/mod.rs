pub mod generate_tests;
