pub mod grader;

pub use app::{authed_json, create_teacher, get_json_body, make_app, make_app_with, sample_result};
pub use grader::StubGrader;
