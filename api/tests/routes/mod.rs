mod evaluations;
mod health_test;
mod reports;
mod rules;
mod students;
