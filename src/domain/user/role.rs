use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "doctor")]
    Doctor,
    #[serde(rename = "user")]
    User,
    #[serde(rename = "appointment staff")]
    AppointmentStaff,
    #[serde(rename = "online support staff")]
    OnlineSupportStaff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::User => "user",
            Role::AppointmentStaff => "appointment staff",
            Role::OnlineSupportStaff => "online support staff",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "admin" => Ok(Role::Admin),
            "doctor" => Ok(Role::Doctor),
            "user" => Ok(Role::User),
            "appointment staff" => Ok(Role::AppointmentStaff),
            "online support staff" => Ok(Role::OnlineSupportStaff),
            other => Err(format!("unknown role: {other}")),
        }
    }

    pub fn can_publish(&self) -> bool {
        matches!(self, Role::Admin | Role::Doctor)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
