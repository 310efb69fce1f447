use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

use crate::entity::{student, teacher, user};
use crate::error::AppError;

pub const TEACHER_PAGE_DENIED: &str = "Only teachers can view this page.";
pub const MARK_ATTENDANCE_DENIED: &str = "Only teachers can mark attendance.";
pub const STUDENT_PAGE_DENIED: &str = "Only students can view this page.";
pub const ADMIN_PAGE_DENIED: &str = "Only superusers can view this page.";

/// Where unauthenticated or unassigned callers are sent from `/`.
pub const LOGIN_PATH: &str = "/accounts/login/";

/// What an authenticated user is allowed to do.
///
/// The superuser flag wins over any attached record; otherwise an attached
/// teacher record wins over an attached student record.
#[derive(Debug, Clone)]
pub enum Role {
    Superuser(user::Model),
    Teacher(user::Model, teacher::Model),
    Student(user::Model, student::Model),
    Unassigned(user::Model),
}

impl Role {
    pub fn user(&self) -> &user::Model {
        match self {
            Role::Superuser(u) | Role::Teacher(u, _) | Role::Student(u, _) | Role::Unassigned(u) => u,
        }
    }

    /// Landing page for this role, or the login page when there is none.
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Superuser(_) => "/admin-dashboard/",
            Role::Teacher(..) => "/teacher/",
            Role::Student(..) => "/student/",
            Role::Unassigned(_) => LOGIN_PATH,
        }
    }

    pub fn require_teacher(
        self,
        denied: &'static str,
    ) -> Result<(user::Model, teacher::Model), AppError> {
        match self {
            Role::Teacher(u, t) => Ok((u, t)),
            _ => Err(AppError::Forbidden(denied)),
        }
    }

    pub fn require_student(
        self,
        denied: &'static str,
    ) -> Result<(user::Model, student::Model), AppError> {
        match self {
            Role::Student(u, s) => Ok((u, s)),
            _ => Err(AppError::Forbidden(denied)),
        }
    }

    pub fn require_superuser(self, denied: &'static str) -> Result<user::Model, AppError> {
        match self {
            Role::Superuser(u) => Ok(u),
            _ => Err(AppError::Forbidden(denied)),
        }
    }
}

/// Look up a user and classify it. Returns `None` if the user does not exist.
pub async fn resolve_role<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<Option<Role>, DbErr> {
    let Some(u) = user::Entity::find_by_id(user_id).one(db).await? else {
        return Ok(None);
    };

    if u.is_superuser {
        return Ok(Some(Role::Superuser(u)));
    }

    if let Some(t) = teacher::Entity::find()
        .filter(teacher::Column::UserId.eq(u.id))
        .one(db)
        .await?
    {
        return Ok(Some(Role::Teacher(u, t)));
    }

    if let Some(s) = student::Entity::find()
        .filter(student::Column::UserId.eq(u.id))
        .one(db)
        .await?
    {
        return Ok(Some(Role::Student(u, s)));
    }

    Ok(Some(Role::Unassigned(u)))
}
