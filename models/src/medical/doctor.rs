// models/src/medical/doctor.rs

use serde::{Deserialize, Serialize};

use crate::identifiers::DoctorId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub doctor_id: DoctorId,
    pub name: String,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body for `POST /doctors` and `PUT /doctors/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewDoctor {
    pub name: String,
    pub specialization: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
}

impl From<&Doctor> for NewDoctor {
    fn from(doctor: &Doctor) -> Self {
        NewDoctor {
            name: doctor.name.clone(),
            specialization: doctor.specialization.clone(),
            contact_number: doctor.contact_number.clone(),
            email: doctor.email.clone(),
        }
    }
}
