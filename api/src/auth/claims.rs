use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Teacher id.
    pub sub: i64,
    /// Teacher display name at login time. Saved reports take the name from
    /// the teacher row instead.
    pub name: String,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
