mod delete_test;
mod get_test;
