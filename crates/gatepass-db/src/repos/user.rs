//! User repository.
//!
//! Users are provisioned by the import command or an external admin flow;
//! the check path only reads them.

use chrono::Utc;
use serde::Deserialize;

use gatepass_core::entities::User;
use gatepass_core::enums::{Gender, HostelType, Role};
use gatepass_core::ids::PREFIX_USER;

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_bool, get_opt_string, parse_datetime, parse_enum, parse_optional_enum};
use crate::service::GateService;

const USER_COLUMNS: &str = "id, name, phone, email, role, gender, hostel_type, assigned_hostel, \
     room_number, parent_phone, session, branch, college, is_approved, created_at";

const fn default_role() -> Role {
    Role::Student
}

const fn default_approved() -> bool {
    true
}

/// Fields for a new user, as written in an import file.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_role")]
    pub role: Role,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub hostel_type: Option<HostelType>,
    #[serde(default)]
    pub assigned_hostel: Option<HostelType>,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub parent_phone: Option<String>,
    #[serde(default)]
    pub session: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default = "default_approved")]
    pub is_approved: bool,
}

impl Default for NewUser {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            email: None,
            role: default_role(),
            gender: None,
            hostel_type: None,
            assigned_hostel: None,
            room_number: None,
            parent_phone: None,
            session: None,
            branch: None,
            college: None,
            is_approved: default_approved(),
        }
    }
}

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        phone: row.get::<String>(2)?,
        email: get_opt_string(row, 3)?,
        role: parse_enum(&row.get::<String>(4)?)?,
        gender: parse_optional_enum(row, 5)?,
        hostel_type: parse_optional_enum(row, 6)?,
        assigned_hostel: parse_optional_enum(row, 7)?,
        room_number: get_opt_string(row, 8)?,
        parent_phone: get_opt_string(row, 9)?,
        session: get_opt_string(row, 10)?,
        branch: get_opt_string(row, 11)?,
        college: get_opt_string(row, 12)?,
        is_approved: get_bool(row, 13)?,
        created_at: parse_datetime(&row.get::<String>(14)?)?,
    })
}

impl GateService {
    /// Insert a user.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` for a blank name or phone, and
    /// `DatabaseError::LibSql` when the phone or email is already taken.
    pub async fn create_user(&self, new: &NewUser) -> Result<User, DatabaseError> {
        let name = new.name.trim();
        let phone = new.phone.trim();
        if name.is_empty() || phone.is_empty() {
            return Err(DatabaseError::InvalidState(
                "user name and phone are required".into(),
            ));
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_USER).await?;
        let email = new
            .email
            .as_deref()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty());

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO users ({USER_COLUMNS}, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?15)"
                ),
                libsql::params![
                    id.as_str(),
                    name,
                    phone,
                    email.as_deref(),
                    new.role.as_str(),
                    new.gender.map(Gender::as_str),
                    new.hostel_type.map(HostelType::as_str),
                    new.assigned_hostel.map(HostelType::as_str),
                    new.room_number.as_deref(),
                    new.parent_phone.as_deref(),
                    new.session.as_deref(),
                    new.branch.as_deref(),
                    new.college.as_deref(),
                    i64::from(new.is_approved),
                    format_timestamp(&now)
                ],
            )
            .await?;

        self.get_user(&id).await
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the user does not exist.
    pub async fn get_user(&self, id: &str) -> Result<User, DatabaseError> {
        self.find_user(id).await?.ok_or(DatabaseError::NoResult)
    }

    /// Look up a user by ID, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_user(&self, id: &str) -> Result<Option<User>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    /// Look up a user by phone number.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_user_by_phone(&self, phone: &str) -> Result<Option<User>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE phone = ?1"),
                [phone.trim()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{memory_service, new_guard, new_student};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_user_roundtrip() {
        let svc = memory_service().await.unwrap();
        let created = svc
            .create_user(&NewUser {
                email: Some(" Priya@Example.COM ".into()),
                gender: Some(Gender::Female),
                ..new_student("Priya", "9000000010", Some(HostelType::Girls))
            })
            .await
            .unwrap();

        assert!(created.id.starts_with("usr-"));
        assert_eq!(created.role, Role::Student);
        assert_eq!(created.email.as_deref(), Some("priya@example.com"));
        assert_eq!(created.hostel_type, Some(HostelType::Girls));
        assert!(created.is_approved);

        let fetched = svc.get_user(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn guard_keeps_assigned_hostel() {
        let svc = memory_service().await.unwrap();
        let guard = svc
            .create_user(&new_guard("Mahesh", "9000000020", Some(HostelType::Boys)))
            .await
            .unwrap();
        assert_eq!(guard.role, Role::Guard);
        assert_eq!(guard.assigned_hostel, Some(HostelType::Boys));
        assert_eq!(guard.hostel_type, None);
    }

    #[tokio::test]
    async fn duplicate_phone_is_rejected() {
        let svc = memory_service().await.unwrap();
        svc.create_user(&new_student("A", "9000000030", None))
            .await
            .unwrap();
        let err = svc
            .create_user(&new_student("B", "9000000030", None))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::LibSql(_)), "{err}");
    }

    #[tokio::test]
    async fn blank_phone_is_rejected() {
        let svc = memory_service().await.unwrap();
        let err = svc
            .create_user(&new_student("A", "  ", None))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidState(_)));
    }

    #[tokio::test]
    async fn missing_user() {
        let svc = memory_service().await.unwrap();
        assert!(svc.find_user("usr-deadbeef").await.unwrap().is_none());
        assert!(matches!(
            svc.get_user("usr-deadbeef").await,
            Err(DatabaseError::NoResult)
        ));
    }

    #[tokio::test]
    async fn find_by_phone() {
        let svc = memory_service().await.unwrap();
        let created = svc
            .create_user(&new_student("Rohan", "9000000040", Some(HostelType::Boys)))
            .await
            .unwrap();
        let found = svc.find_user_by_phone("9000000040").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(created.id));
    }
}
