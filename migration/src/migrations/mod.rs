pub mod m202510160001_create_teachers;
pub mod m202510160002_create_reports;
