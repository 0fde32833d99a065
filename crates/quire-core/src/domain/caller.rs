use uuid::Uuid;

/// Who is making a request: a verified user, or the public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Caller {
    Anonymous,
    User(Uuid),
}

impl Caller {
    /// The authenticated user's id, if any.
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Caller::Anonymous => None,
            Caller::User(id) => Some(*id),
        }
    }
}
